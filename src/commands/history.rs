// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::kv::KvStore;
use crate::store::ReadingStore;
use crate::utils::{category_arg, maybe_print_json, pretty_table};

pub fn handle<K: KvStore>(kv: K, sub: &clap::ArgMatches) -> Result<()> {
    let category = category_arg(sub)?;
    let mut store = ReadingStore::new(kv);
    let state = store.load(category);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.history)? {
        return Ok(());
    }

    let rows = state
        .history
        .iter()
        .map(|e| vec![e.date.to_string(), e.consumption.to_string(), e.bill.to_string()])
        .collect();
    let consumption_header = format!("Consumption ({})", category.unit());
    println!("{} History", category);
    println!(
        "{}",
        pretty_table(&["Date", consumption_header.as_str(), "Bill ($)"], rows)
    );
    println!("Previous reading: {}", state.previous_reading);
    Ok(())
}
