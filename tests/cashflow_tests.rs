// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerscope::analytics::cashflow::cash_flow;
use ledgerscope::config::EngineConfig;
use ledgerscope::models::Transaction;
use rust_decimal::Decimal;

fn tx(id: i64, date: &str, amount: &str, category: Option<&str>) -> Transaction {
    Transaction {
        id,
        account_id: 1,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: format!("tx {}", id),
        amount: amount.parse().unwrap(),
        category: category.map(|s| s.to_string()),
        is_verified: false,
        import_batch_id: None,
        created_at: String::new(),
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn series_is_oldest_first_and_complete() {
    let txns = vec![
        tx(1, "2026-06-05", "1000", Some("Income")),
        tx(2, "2026-07-03", "-40", Some("Groceries")),
        tx(3, "2026-08-01", "-60", Some("Groceries")),
    ];
    let series = cash_flow(&txns, 3, None, d("2026-08-07"), &EngineConfig::default()).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].month, "2026-06");
    assert_eq!(series[1].month, "2026-07");
    assert_eq!(series[2].month, "2026-08");
    assert_eq!(series[0].income, Decimal::from(1000));
    assert_eq!(series[0].net, Decimal::from(1000));
    assert_eq!(series[1].expenses, Decimal::from(40));
    assert_eq!(series[1].net, Decimal::from(-40));
}

#[test]
fn months_without_data_read_as_zero() {
    let series = cash_flow(&[], 4, None, d("2026-08-07"), &EngineConfig::default()).unwrap();
    assert_eq!(series.len(), 4);
    assert!(series
        .iter()
        .all(|p| p.income == Decimal::ZERO && p.expenses == Decimal::ZERO));
}

#[test]
fn income_keeps_movement_expenses_drop_it() {
    // a transfer out is not spending; a transfer in still lands in income
    let txns = vec![
        tx(1, "2026-08-02", "-500", Some("Transfer")),
        tx(2, "2026-08-03", "500", Some("Transfer")),
        tx(3, "2026-08-04", "-75", Some("Dining")),
    ];
    let series = cash_flow(&txns, 1, None, d("2026-08-07"), &EngineConfig::default()).unwrap();
    assert_eq!(series[0].income, Decimal::from(500));
    assert_eq!(series[0].expenses, Decimal::from(75));
    assert_eq!(series[0].net, Decimal::from(425));
}

#[test]
fn zero_months_is_rejected() {
    assert!(cash_flow(&[], 0, None, d("2026-08-07"), &EngineConfig::default()).is_err());
}

#[test]
fn window_rolls_across_years() {
    let txns = vec![tx(1, "2025-12-20", "-30", Some("Gifts"))];
    let series = cash_flow(&txns, 10, None, d("2026-08-07"), &EngineConfig::default()).unwrap();
    assert_eq!(series[0].month, "2025-11");
    let december = series.iter().find(|p| p.month == "2025-12").unwrap();
    assert_eq!(december.expenses, Decimal::from(30));
}

#[test]
fn account_filter_is_applied() {
    let mut other = tx(2, "2026-08-03", "-300", Some("Dining"));
    other.account_id = 9;
    let txns = vec![tx(1, "2026-08-02", "-100", Some("Dining")), other];
    let series = cash_flow(&txns, 1, None, d("2026-08-07"), &EngineConfig::default()).unwrap();
    assert_eq!(series[0].expenses, Decimal::from(400));
    let filtered = cash_flow(&txns, 1, Some(&[1]), d("2026-08-07"), &EngineConfig::default())
        .unwrap();
    assert_eq!(filtered[0].expenses, Decimal::from(100));
}
