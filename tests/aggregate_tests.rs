// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerscope::analytics::aggregate::{by_category, by_category_month};
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

#[test]
fn groups_by_category_and_month() {
    let txns = vec![
        tx(1, "2026-07-01", "-20", Some("Groceries")),
        tx(2, "2026-07-15", "-30", Some("Groceries")),
        tx(3, "2026-08-01", "-40", Some("Groceries")),
        tx(4, "2026-07-02", "-5", Some("Dining")),
    ];
    let cells = by_category_month(&txns, None, &[], None);
    assert_eq!(cells.len(), 3);
    let groceries_july = cells
        .iter()
        .find(|c| c.category == "Groceries" && c.month == "2026-07")
        .unwrap();
    assert_eq!(groceries_july.total, Decimal::from(-50));
    assert_eq!(groceries_july.count, 2);
}

#[test]
fn blank_and_missing_categories_fold_into_uncategorized() {
    let txns = vec![
        tx(1, "2026-07-01", "-10", None),
        tx(2, "2026-07-02", "-15", Some("  ")),
        tx(3, "2026-07-03", "-5", Some("Dining")),
    ];
    let cells = by_category_month(&txns, None, &[], None);
    let uncat = cells.iter().find(|c| c.category == "Uncategorized").unwrap();
    assert_eq!(uncat.total, Decimal::from(-25));
    assert_eq!(uncat.count, 2);
}

#[test]
fn excluded_categories_are_dropped_not_zeroed() {
    let txns = vec![
        tx(1, "2026-07-01", "-100", Some("Transfer")),
        tx(2, "2026-07-02", "-5", Some("Dining")),
    ];
    let cells = by_category_month(&txns, None, &["Transfer".to_string()], None);
    assert_eq!(cells.len(), 1);
    assert!(cells.iter().all(|c| c.category != "Transfer"));
}

#[test]
fn month_filter_keeps_only_that_month() {
    let txns = vec![
        tx(1, "2026-07-01", "-10", Some("Dining")),
        tx(2, "2026-08-01", "-20", Some("Dining")),
    ];
    let cells = by_category_month(&txns, Some("2026-08"), &[], None);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].month, "2026-08");
    assert_eq!(cells[0].total, Decimal::from(-20));
}

#[test]
fn account_filter_is_applied() {
    let mut other = tx(2, "2026-07-02", "-99", Some("Dining"));
    other.account_id = 7;
    let txns = vec![tx(1, "2026-07-01", "-10", Some("Dining")), other];
    let cells = by_category_month(&txns, None, &[], Some(&[1]));
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].total, Decimal::from(-10));
}

#[test]
fn category_totals_conserve_the_filtered_sum() {
    // sum of per-category totals == signed sum of all non-excluded amounts
    let excluded = vec!["Transfer".to_string()];
    let txns = vec![
        tx(1, "2026-07-01", "1000", Some("Income")),
        tx(2, "2026-07-03", "-120.50", Some("Groceries")),
        tx(3, "2026-07-04", "-42.25", None),
        tx(4, "2026-07-05", "-500", Some("Transfer")),
        tx(5, "2026-07-09", "-7.25", Some("Dining")),
    ];
    let total: Decimal = by_category(&txns, "2026-07", &excluded, None)
        .into_iter()
        .map(|(_, t)| t)
        .sum();
    let expected: Decimal = txns
        .iter()
        .filter(|t| t.category_label() != "Transfer")
        .map(|t| t.amount)
        .sum();
    assert_eq!(total, expected);
}

#[test]
fn output_is_deterministic_for_a_snapshot() {
    let txns = vec![
        tx(1, "2026-07-01", "-10", Some("B")),
        tx(2, "2026-07-02", "-20", Some("A")),
        tx(3, "2026-06-01", "-30", Some("B")),
    ];
    let a = serde_json::to_string(&by_category_month(&txns, None, &[], None)).unwrap();
    let b = serde_json::to_string(&by_category_month(&txns, None, &[], None)).unwrap();
    assert_eq!(a, b);
}
