// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::kv::KvStore;
use crate::models::Category;
use crate::store::{Issue, ReadingStore};
use crate::utils::pretty_table;

pub fn collect<K: KvStore>(kv: K) -> Result<Vec<Issue>> {
    let store = ReadingStore::new(kv);
    let mut issues = Vec::new();
    for category in Category::ALL {
        issues.extend(store.inspect(category)?);
    }
    Ok(issues)
}

pub fn handle<K: KvStore>(kv: K) -> Result<()> {
    let issues = collect(kv)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|i| vec![i.key, i.detail]).collect();
        println!("{}", pretty_table(&["Key", "Issue"], rows));
    }
    Ok(())
}
