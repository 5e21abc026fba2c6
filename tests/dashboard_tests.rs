// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerscope::analytics::dashboard::{balance_history, dashboard};
use ledgerscope::config::EngineConfig;
use ledgerscope::models::{Account, Budget, Transaction};
use rust_decimal::Decimal;

fn tx(id: i64, account_id: i64, date: &str, amount: &str, category: Option<&str>) -> Transaction {
    Transaction {
        id,
        account_id,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: format!("tx {}", id),
        amount: amount.parse().unwrap(),
        category: category.map(|s| s.to_string()),
        is_verified: false,
        import_batch_id: None,
        created_at: String::new(),
    }
}

fn account(id: i64, name: &str, initial: &str, active: bool) -> Account {
    Account {
        id,
        name: name.to_string(),
        account_type: "checking".to_string(),
        initial_balance: initial.parse().unwrap(),
        is_active: active,
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn kpis_cover_balance_and_current_month_flow() {
    let accounts = vec![
        account(1, "Chequing", "1000", true),
        account(2, "Old", "9999", false), // inactive, excluded from balance
    ];
    let txns = vec![
        tx(1, 1, "2026-07-20", "-100", Some("Groceries")), // prior month
        tx(2, 1, "2026-08-01", "2500", Some("Income")),
        tx(3, 1, "2026-08-03", "-80", Some("Groceries")),
        tx(4, 1, "2026-08-04", "-300", Some("Transfer")), // movement, not spending
    ];
    let report = dashboard(
        &txns,
        &accounts,
        &[],
        None,
        d("2026-08-07"),
        &EngineConfig::default(),
    )
    .unwrap();
    // balance counts every transaction ever, including movement
    assert_eq!(report.kpis.total_balance, Decimal::from(3020));
    assert_eq!(report.kpis.monthly_income, Decimal::from(2500));
    assert_eq!(report.kpis.monthly_spending, Decimal::from(80));
    assert_eq!(report.kpis.net_cash_flow, Decimal::from(2420));
}

#[test]
fn alerts_fire_at_threshold_worst_first() {
    let accounts = vec![account(1, "Chequing", "0", true)];
    let budgets = vec![
        Budget {
            id: 1,
            category_name: "Groceries".into(),
            monthly_limit: Decimal::from(500),
            alert_threshold: 80,
            is_active: true,
        },
        Budget {
            id: 2,
            category_name: "Dining".into(),
            monthly_limit: Decimal::from(100),
            alert_threshold: 80,
            is_active: true,
        },
        Budget {
            id: 3,
            category_name: "Fuel".into(),
            monthly_limit: Decimal::from(200),
            alert_threshold: 80,
            is_active: true,
        },
    ];
    let txns = vec![
        tx(1, 1, "2026-08-02", "-450", Some("Groceries")), // 90%
        tx(2, 1, "2026-08-03", "-120", Some("Dining")),    // 120%
        tx(3, 1, "2026-08-04", "-40", Some("Fuel")),       // 20%, no alert
    ];
    let report = dashboard(
        &txns,
        &accounts,
        &budgets,
        None,
        d("2026-08-07"),
        &EngineConfig::default(),
    )
    .unwrap();
    let names: Vec<&str> = report
        .budget_alerts
        .iter()
        .map(|b| b.category_name.as_str())
        .collect();
    assert_eq!(names, vec!["Dining", "Groceries"]);
}

#[test]
fn balance_history_walks_day_by_day() {
    let accounts = vec![account(1, "Chequing", "100", true)];
    let txns = vec![
        tx(1, 1, "2026-07-01", "50", None),  // before the window
        tx(2, 1, "2026-08-06", "-30", None), // inside
    ];
    let series = balance_history(&txns, &accounts, 3, None, d("2026-08-07")).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].date, "2026-08-05");
    assert_eq!(series[0].balance, Decimal::from(150));
    assert_eq!(series[1].balance, Decimal::from(120));
    assert_eq!(series[2].balance, Decimal::from(120));
}

#[test]
fn balance_history_for_a_single_account() {
    let accounts = vec![
        account(1, "Chequing", "100", true),
        account(2, "Savings", "900", true),
    ];
    let txns = vec![tx(1, 2, "2026-08-07", "-30", None)];
    let series = balance_history(&txns, &accounts, 2, Some(2), d("2026-08-07")).unwrap();
    assert_eq!(series[0].balance, Decimal::from(900));
    assert_eq!(series[1].balance, Decimal::from(870));
}

#[test]
fn zero_days_is_rejected() {
    let accounts = vec![account(1, "Chequing", "0", true)];
    assert!(balance_history(&[], &accounts, 0, None, d("2026-08-07")).is_err());
}
