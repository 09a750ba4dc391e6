// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

use crate::kv::KvStore;
use crate::store::ReadingStore;
use crate::utils::category_arg;

pub fn handle<K: KvStore>(kv: K, sub: &clap::ArgMatches) -> Result<()> {
    let category = category_arg(sub)?;
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let out = sub
        .get_one::<String>("out")
        .context("--out is required")?
        .trim()
        .to_string();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut store = ReadingStore::new(kv);
    let state = store.load(category);

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["id", "date", "consumption", "bill", "unit"])?;
            for e in &state.history {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.consumption.to_string(),
                    e.bill.to_string(),
                    category.unit().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(&out, serde_json::to_string_pretty(&state.history)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!(
        "Exported {} {} entries to {}",
        state.history.len(),
        category,
        out
    );
    Ok(())
}
