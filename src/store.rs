// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::calculator::coerce_decimal;
use crate::kv::{KvStore, StorageError};
use crate::models::{Category, HISTORY_LIMIT, HistoryEntry, ReadingState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Check your readings: {0}")]
    Validation(String),
    #[error("Save failed: {0}")]
    Persistence(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub key: String,
    pub detail: String,
}

pub struct ReadingStore<K: KvStore> {
    kv: K,
    states: HashMap<Category, ReadingState>,
}

impl<K: KvStore> ReadingStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            states: HashMap::new(),
        }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    pub fn state(&self, category: Category) -> Option<&ReadingState> {
        self.states.get(&category)
    }

    /// Never fails: missing or unreadable values fall back to defaults.
    pub fn load(&mut self, category: Category) -> ReadingState {
        let state = self.read_state(category);
        self.states.insert(category, state.clone());
        state
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using default");
                None
            }
        }
    }

    fn read_state(&self, category: Category) -> ReadingState {
        let prev_key = category.prev_key();
        let hist_key = category.hist_key();

        let mut history = match self.read_key(&hist_key) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(h) => h,
                Err(e) => {
                    tracing::warn!(key = %hist_key, error = %e, "stored history is corrupt, resetting");
                    return ReadingState::default();
                }
            },
        };
        history.truncate(HISTORY_LIMIT);

        let previous_reading = match self.read_key(&prev_key) {
            None => Decimal::ZERO,
            Some(raw) => raw.trim().parse::<Decimal>().unwrap_or_else(|e| {
                // Read it the way a typed reading is read ("150 kWh" is 150).
                let lenient = coerce_decimal(&raw);
                tracing::warn!(key = %prev_key, value = %raw, error = %e, using = %lenient, "stored reading is not a plain decimal");
                lenient
            }),
        };

        ReadingState {
            previous_reading,
            history,
        }
    }

    pub fn save(
        &mut self,
        category: Category,
        current_reading: &str,
        entry: HistoryEntry,
    ) -> Result<ReadingState, StoreError> {
        if current_reading.trim().is_empty() {
            return Err(StoreError::Validation(
                "current reading is empty".to_string(),
            ));
        }
        let base = match self.states.get(&category) {
            Some(s) => s.clone(),
            None => self.load(category),
        };
        let current = coerce_decimal(current_reading);
        if current < base.previous_reading {
            return Err(StoreError::Validation(format!(
                "reading {} is below previous reading {}",
                current, base.previous_reading
            )));
        }

        let next = base.with_entry(current, entry);
        let prev_value = current.to_string();
        let hist_value = serde_json::to_string(&next.history)
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let prev_key = category.prev_key();
        let hist_key = category.hist_key();
        if let Err(e) = self
            .kv
            .set_all(&[
                (prev_key.as_str(), prev_value.as_str()),
                (hist_key.as_str(), hist_value.as_str()),
            ])
        {
            tracing::error!(category = %category, error = %e, "saving reading failed");
            return Err(e.into());
        }

        tracing::info!(
            category = %category,
            reading = %prev_value,
            entries = next.history.len(),
            "reading saved"
        );
        self.states.insert(category, next.clone());
        Ok(next)
    }

    pub fn inspect(&self, category: Category) -> Result<Vec<Issue>, StorageError> {
        let mut issues = Vec::new();

        let prev_key = category.prev_key();
        if let Some(raw) = self.kv.get(&prev_key)? {
            if raw.trim().parse::<Decimal>().is_err() {
                issues.push(Issue {
                    key: prev_key,
                    detail: format!("not a decimal: '{}'", raw),
                });
            }
        }

        let hist_key = category.hist_key();
        if let Some(raw) = self.kv.get(&hist_key)? {
            match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Err(e) => issues.push(Issue {
                    key: hist_key,
                    detail: format!("unreadable history: {}", e),
                }),
                Ok(h) => {
                    if h.len() > HISTORY_LIMIT {
                        issues.push(Issue {
                            key: hist_key.clone(),
                            detail: format!("{} entries, limit is {}", h.len(), HISTORY_LIMIT),
                        });
                    }
                    if h.windows(2).any(|w| w[0].id <= w[1].id) {
                        issues.push(Issue {
                            key: hist_key,
                            detail: "entries are not newest first".to_string(),
                        });
                    }
                }
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;

    #[test]
    fn unloaded_category_has_no_state() {
        let mut store = ReadingStore::new(MemoryKv::new());
        assert!(store.state(Category::Water).is_none());
        store.load(Category::Water);
        assert_eq!(
            store.state(Category::Water),
            Some(&ReadingState::default())
        );
        assert!(store.state(Category::Electricity).is_none());
    }

    #[test]
    fn oversized_stored_history_is_trimmed_on_load() {
        let kv = MemoryKv::new();
        let entries: Vec<serde_json::Value> = (0..15)
            .rev()
            .map(|i| {
                serde_json::json!({"id": i, "date": "2025-01-01", "consumption": "1.00", "bill": "1.00"})
            })
            .collect();
        kv.set("elec_hist", &serde_json::to_string(&entries).unwrap())
            .unwrap();
        let mut store = ReadingStore::new(kv);
        let state = store.load(Category::Electricity);
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(state.history[0].id, 14);

        let issues = store.inspect(Category::Electricity).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].detail.contains("limit is 12"));
    }
}
