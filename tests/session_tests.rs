// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use utilshare::kv::{KvStore, MemoryKv};
use utilshare::models::Category;
use utilshare::session::Session;
use utilshare::store::StoreError;

fn session(kv: MemoryKv) -> Session<MemoryKv> {
    Session::new(kv, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
}

#[test]
fn live_calculation_tracks_typed_fields() {
    let kv = MemoryKv::new();
    kv.set("elec_prev", "100").unwrap();
    let mut s = session(kv);
    assert_eq!(s.previous_reading(), Decimal::from(100));

    s.set_current_reading("1");
    assert!(s.calculation().is_invalid);
    s.set_current_reading("15");
    assert!(s.calculation().is_invalid);
    s.set_current_reading("150");
    s.set_major_consumption("500");
    s.set_major_bill("200");
    let c = s.calculation();
    assert!(!c.is_invalid);
    assert_eq!(c.bill_share, Decimal::from(20));
    assert_eq!(s.share_text(), "Utility Bill (Electricity): $20.00");
}

#[test]
fn rejected_save_keeps_inputs_and_state() {
    let kv = MemoryKv::new();
    kv.set("elec_prev", "100").unwrap();
    let mut s = session(kv);
    s.set_current_reading("90");
    let err = s.save_at(1).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(s.current_reading(), "90");
    assert_eq!(s.previous_reading(), Decimal::from(100));
    assert!(s.history().is_empty());
}

#[test]
fn thirteen_session_saves_drop_the_first() {
    let mut s = session(MemoryKv::new());
    s.set_major_consumption("1000");
    s.set_major_bill("100");
    for i in 1..=13 {
        s.set_current_reading((i * 5).to_string());
        // Same clock tick every time: ids still increase.
        s.save_at(1_700_000_000_000).unwrap();
    }

    let history = s.history();
    assert_eq!(history.len(), 12);
    assert!(history.windows(2).all(|w| w[0].id > w[1].id));
    // Every save consumed 5 units of 1000, i.e. $0.50.
    assert!(history.iter().all(|e| e.bill.to_string() == "0.50"));
    assert_eq!(history[0].id, 1_700_000_000_012);
    assert_eq!(history[11].id, 1_700_000_000_001);
    assert_eq!(s.previous_reading(), Decimal::from(65));
    assert_eq!(
        history[0].date,
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    );
}

#[test]
fn category_switch_swaps_working_state() {
    let mut s = session(MemoryKv::new());
    s.set_current_reading("10");
    s.save_at(1).unwrap();

    let water = s.select_category(Category::Water);
    assert_eq!(s.category(), Category::Water);
    assert_eq!(water.previous_reading, Decimal::ZERO);
    assert!(s.history().is_empty());
    s.set_current_reading("2");
    s.save_at(2).unwrap();

    let elec = s.select_category(Category::Electricity);
    assert_eq!(elec.previous_reading, Decimal::from(10));
    assert_eq!(s.history().len(), 1);
    assert_eq!(
        s.store()
            .state(Category::Water)
            .map(|w| w.previous_reading),
        Some(Decimal::from(2))
    );
}

#[test]
fn double_save_records_one_entry() {
    let mut s = session(MemoryKv::new());
    s.set_current_reading("20");
    s.set_major_consumption("100");
    s.set_major_bill("50");
    s.save_at(1).unwrap();

    // The first save cleared the reading, so a second trigger has nothing to save.
    let err = s.save_at(1).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.previous_reading(), Decimal::from(20));
    assert_eq!(s.history()[0].bill.to_string(), "10.00");
}
