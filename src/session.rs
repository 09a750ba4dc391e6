// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::calculator::{Calculation, calculate, invalid_reading_hint, share_text};
use crate::kv::KvStore;
use crate::models::{Category, HistoryEntry, ReadingState};
use crate::store::{ReadingStore, StoreError};

pub struct Session<K: KvStore> {
    store: ReadingStore<K>,
    category: Category,
    current_reading: String,
    major_consumption: String,
    major_bill: String,
    history_visible: bool,
    date: NaiveDate,
}

impl<K: KvStore> Session<K> {
    pub fn new(kv: K, date: NaiveDate) -> Self {
        let mut store = ReadingStore::new(kv);
        let category = Category::default();
        store.load(category);
        Self {
            store,
            category,
            current_reading: String::new(),
            major_consumption: String::new(),
            major_bill: String::new(),
            history_visible: false,
            date,
        }
    }

    pub fn today(kv: K) -> Self {
        Self::new(kv, chrono::Local::now().date_naive())
    }

    pub fn store(&self) -> &ReadingStore<K> {
        &self.store
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn unit(&self) -> &'static str {
        self.category.unit()
    }

    pub fn select_category(&mut self, category: Category) -> ReadingState {
        let state = self.store.load(category);
        self.category = category;
        state
    }

    pub fn set_current_reading(&mut self, raw: impl Into<String>) {
        self.current_reading = raw.into();
    }

    pub fn set_major_consumption(&mut self, raw: impl Into<String>) {
        self.major_consumption = raw.into();
    }

    pub fn set_major_bill(&mut self, raw: impl Into<String>) {
        self.major_bill = raw.into();
    }

    pub fn current_reading(&self) -> &str {
        &self.current_reading
    }

    pub fn major_consumption(&self) -> &str {
        &self.major_consumption
    }

    pub fn major_bill(&self) -> &str {
        &self.major_bill
    }

    pub fn previous_reading(&self) -> Decimal {
        self.store
            .state(self.category)
            .map(|s| s.previous_reading)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.store
            .state(self.category)
            .map(|s| s.history.as_slice())
            .unwrap_or(&[])
    }

    pub fn calculation(&self) -> Calculation {
        calculate(
            self.previous_reading(),
            &self.current_reading,
            &self.major_consumption,
            &self.major_bill,
        )
    }

    pub fn validation_hint(&self) -> Option<String> {
        self.calculation()
            .is_invalid
            .then(|| invalid_reading_hint(self.previous_reading()))
    }

    pub fn save(&mut self) -> Result<ReadingState, StoreError> {
        self.save_at(Utc::now().timestamp_millis())
    }

    // Only the current reading is cleared on success.
    pub fn save_at(&mut self, now_millis: i64) -> Result<ReadingState, StoreError> {
        let calc = self.calculation();
        if calc.is_invalid {
            return Err(StoreError::Validation(invalid_reading_hint(
                self.previous_reading(),
            )));
        }
        let id = match self.store.state(self.category) {
            Some(s) => s.next_entry_id(now_millis),
            None => now_millis,
        };
        let entry = HistoryEntry::from_calculation(id, self.date, &calc);
        let state = self
            .store
            .save(self.category, &self.current_reading, entry)?;
        self.current_reading.clear();
        Ok(state)
    }

    pub fn clear(&mut self) {
        self.current_reading.clear();
        self.major_consumption.clear();
        self.major_bill.clear();
    }

    pub fn share_text(&self) -> String {
        share_text(self.category, self.calculation().display_bill_share())
    }

    pub fn saved_message(&self) -> String {
        format!("{} record saved.", self.category)
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn toggle_history(&mut self) -> bool {
        self.history_visible = !self.history_visible;
        self.history_visible
    }
}
