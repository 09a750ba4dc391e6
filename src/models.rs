// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calculator::{Calculation, round_2dp};

/// Maximum number of entries kept per category, newest first.
pub const HISTORY_LIMIT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Electricity,
    Water,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Electricity, Category::Water];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Electricity => "Electricity",
            Category::Water => "Water",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Category::Electricity => "units",
            Category::Water => "m³",
        }
    }

    fn key_prefix(&self) -> &'static str {
        match self {
            Category::Electricity => "elec",
            Category::Water => "water",
        }
    }

    pub fn prev_key(&self) -> String {
        format!("{}_prev", self.key_prefix())
    }

    pub fn hist_key(&self) -> String {
        format!("{}_hist", self.key_prefix())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electricity" | "elec" => Ok(Category::Electricity),
            "water" => Ok(Category::Water),
            other => Err(format!(
                "Unknown category '{}', expected electricity|water",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub consumption: Decimal, // 2dp
    pub bill: Decimal,        // 2dp
}

impl HistoryEntry {
    /// Freezes a calculation into an entry; values are rounded here and never recomputed.
    pub fn from_calculation(id: i64, date: NaiveDate, calc: &Calculation) -> Self {
        Self {
            id,
            date,
            consumption: round_2dp(calc.consumption_delta),
            bill: round_2dp(calc.display_bill_share()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadingState {
    pub previous_reading: Decimal,
    pub history: Vec<HistoryEntry>,
}

impl ReadingState {
    // Millisecond clock, bumped past the newest id if the clock has not moved.
    pub fn next_entry_id(&self, now_millis: i64) -> i64 {
        match self.history.first() {
            Some(newest) if newest.id >= now_millis => newest.id.saturating_add(1),
            _ => now_millis,
        }
    }

    pub(crate) fn with_entry(&self, previous_reading: Decimal, entry: HistoryEntry) -> Self {
        let mut history = Vec::with_capacity(HISTORY_LIMIT + 1);
        history.push(entry);
        history.extend(self.history.iter().cloned());
        history.truncate(HISTORY_LIMIT);
        Self {
            previous_reading,
            history,
        }
    }
}
