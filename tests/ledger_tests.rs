// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerscope::analytics::dashboard::account_balance;
use ledgerscope::cache::SnapshotCache;
use ledgerscope::config::{self, EngineConfig};
use ledgerscope::ledger;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::time::Duration;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE accounts(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            account_type TEXT NOT NULL DEFAULT 'checking',
            initial_balance TEXT NOT NULL DEFAULT '0',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (datetime('now')));
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            category TEXT,
            is_verified INTEGER NOT NULL DEFAULT 0,
            import_batch_id TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')));
        CREATE TABLE budgets(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_name TEXT NOT NULL UNIQUE,
            monthly_limit TEXT NOT NULL,
            alert_threshold INTEGER NOT NULL DEFAULT 80,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (datetime('now')));
    "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO accounts(name, account_type, initial_balance) VALUES('Chequing','checking','250.00')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn snapshot_round_trips_rows() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(account_id, date, description, amount, category) VALUES(1,'2026-08-01','groceries','-42.17','Groceries')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO budgets(category_name, monthly_limit) VALUES('Groceries','500')",
        [],
    )
    .unwrap();

    let snap = ledger::snapshot(&conn).unwrap();
    assert_eq!(snap.accounts.len(), 1);
    assert_eq!(snap.accounts[0].initial_balance, Decimal::new(25000, 2));
    assert_eq!(snap.transactions.len(), 1);
    assert_eq!(snap.transactions[0].amount, Decimal::new(-4217, 2));
    assert_eq!(snap.transactions[0].category_label(), "Groceries");
    assert_eq!(snap.budgets.len(), 1);
    assert_eq!(snap.budgets[0].alert_threshold, 80);
    assert!(snap.budgets[0].is_active);
}

#[test]
fn unparseable_amount_reads_as_zero() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(account_id, date, description, amount) VALUES(1,'2026-08-01','bad row','not-a-number')",
        [],
    )
    .unwrap();
    let snap = ledger::snapshot(&conn).unwrap();
    assert_eq!(snap.transactions[0].amount, Decimal::ZERO);
    assert_eq!(snap.transactions[0].category_label(), "Uncategorized");
}

#[test]
fn balance_is_derived_not_stored() {
    let conn = setup();
    for amount in ["-50.00", "100.00", "-25.50"] {
        conn.execute(
            "INSERT INTO transactions(account_id, date, description, amount) VALUES(1,'2026-08-01','t',?1)",
            params![amount],
        )
        .unwrap();
    }
    let snap = ledger::snapshot(&conn).unwrap();
    let balance = account_balance(&snap.accounts[0], &snap.transactions);
    // 250 - 50 + 100 - 25.50
    assert_eq!(balance, Decimal::new(27450, 2));
}

#[test]
fn account_lookup_distinguishes_absent() {
    let conn = setup();
    assert!(ledger::account_id_by_name(&conn, "Chequing")
        .unwrap()
        .is_some());
    assert!(ledger::account_id_by_name(&conn, "No Such Account")
        .unwrap()
        .is_none());
}

#[test]
fn cache_serves_within_ttl_and_invalidates() {
    let conn = setup();
    let mut cache = SnapshotCache::new(Duration::from_secs(60));
    assert!(cache.get().is_none());

    cache.fetch(&conn).unwrap();
    assert!(cache.get().is_some());

    // a write after the snapshot is not visible until invalidation
    conn.execute(
        "INSERT INTO transactions(account_id, date, description, amount) VALUES(1,'2026-08-01','late','-1')",
        [],
    )
    .unwrap();
    assert_eq!(cache.fetch(&conn).unwrap().transactions.len(), 0);

    cache.invalidate();
    assert!(cache.get().is_none());
    assert_eq!(cache.fetch(&conn).unwrap().transactions.len(), 1);
}

#[test]
fn zero_ttl_never_serves_stale() {
    let conn = setup();
    let mut cache = SnapshotCache::new(Duration::ZERO);
    cache.fetch(&conn).unwrap();
    assert!(cache.get().is_none());
}

#[test]
fn engine_config_defaults_and_stored_override() {
    let conn = setup();
    let cfg = config::load(&conn).unwrap();
    assert_eq!(cfg.risk.baseline_months, 3);
    assert_eq!(cfg.risk.history_months, 5);
    assert_eq!(cfg.risk.min_current_spend, Decimal::from(20));
    assert_eq!(cfg.risk.max_flagged, 6);
    assert_eq!(cfg.rental.account_name, "Rental Property");

    let mut custom = EngineConfig::default();
    custom.rental.account_name = "Duplex".into();
    custom.risk.max_flagged = 3;
    config::store(&conn, &custom).unwrap();

    let loaded = config::load(&conn).unwrap();
    assert_eq!(loaded.rental.account_name, "Duplex");
    assert_eq!(loaded.risk.max_flagged, 3);
    // untouched fields keep their defaults through the round trip
    assert_eq!(loaded.risk.baseline_months, 3);
}
