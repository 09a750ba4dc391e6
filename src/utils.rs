// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::kv::KvStore;
use crate::models::Category;
use crate::session::Session;

pub fn parse_category(s: &str) -> Result<Category> {
    s.parse::<Category>().map_err(|e| anyhow!(e))
}

pub fn category_arg(sub: &clap::ArgMatches) -> Result<Category> {
    parse_category(
        sub.get_one::<String>("category")
            .map(String::as_str)
            .unwrap_or_default(),
    )
}

/// Builds a session for the command's category with the reading fields filled
/// in, as if typed on the calculator screen.
pub fn session_from_args<K: KvStore>(kv: K, sub: &clap::ArgMatches) -> Result<Session<K>> {
    let category = category_arg(sub)?;
    let field = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
    let mut session = Session::today(kv);
    session.select_category(category);
    session.set_current_reading(field("current"));
    session.set_major_consumption(field("major-usage"));
    session.set_major_bill(field("major-bill"));
    Ok(session)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
