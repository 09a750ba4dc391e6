// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::kv::KvStore;
use crate::utils::session_from_args;

pub fn handle<K: KvStore>(kv: K, sub: &clap::ArgMatches) -> Result<()> {
    let session = session_from_args(kv, sub)?;
    println!("{}", session.share_text());
    Ok(())
}
