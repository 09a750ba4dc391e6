// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculator::round_2dp;
use crate::kv::KvStore;
use crate::models::Category;
use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table, session_from_args};

#[derive(Debug, Serialize)]
pub struct CalcReport {
    pub category: Category,
    pub unit: &'static str,
    pub previous_reading: Decimal,
    pub consumption: Decimal,
    pub bill_share: Decimal,
    pub is_invalid: bool,
}

impl CalcReport {
    pub fn from_session<K: KvStore>(session: &Session<K>) -> Self {
        let calc = session.calculation();
        Self {
            category: session.category(),
            unit: session.unit(),
            previous_reading: session.previous_reading(),
            consumption: round_2dp(calc.consumption_delta),
            bill_share: round_2dp(calc.display_bill_share()),
            is_invalid: calc.is_invalid,
        }
    }
}

pub fn handle<K: KvStore>(kv: K, sub: &clap::ArgMatches) -> Result<()> {
    let session = session_from_args(kv, sub)?;
    let report = CalcReport::from_session(&session);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let status = session
        .validation_hint()
        .unwrap_or_else(|| "OK".to_string());
    let rows = vec![
        vec!["Reading date".into(), session.date().to_string()],
        vec![
            format!("Previous reading ({})", report.unit),
            report.previous_reading.to_string(),
        ],
        vec![
            format!("Consumption ({})", report.unit),
            report.consumption.to_string(),
        ],
        vec![
            format!("{} sub-bill ($)", report.category),
            report.bill_share.to_string(),
        ],
        vec!["Status".into(), status],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
