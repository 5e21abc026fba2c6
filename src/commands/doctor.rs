// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at accounts that no longer exist
    let mut stmt = conn.prepare(
        "SELECT t.id, t.account_id FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id WHERE a.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let acct: i64 = r.get(1)?;
        rows.push(vec![
            "orphaned_transaction".into(),
            format!("tx {} -> account {}", id, acct),
        ]);
    }

    // 2) Uncategorized backlog
    let uncategorized: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE category IS NULL OR trim(category)=''",
        [],
        |r| r.get(0),
    )?;
    if uncategorized > 0 {
        rows.push(vec![
            "uncategorized".into(),
            format!("{} transactions need a category", uncategorized),
        ]);
    }

    // 3) Amounts that will read as zero
    let mut stmt3 = conn.prepare("SELECT id, amount FROM transactions")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        if amount.trim().parse::<rust_decimal::Decimal>().is_err() {
            rows.push(vec![
                "unparseable_amount".into(),
                format!("tx {}: '{}'", id, amount),
            ]);
        }
    }

    // 4) Budgets that can never trigger
    let mut stmt4 =
        conn.prepare("SELECT category_name, monthly_limit FROM budgets WHERE is_active=1")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let cat: String = r.get(0)?;
        let limit: String = r.get(1)?;
        let parsed = limit.trim().parse::<rust_decimal::Decimal>();
        if parsed.map(|v| v <= rust_decimal::Decimal::ZERO).unwrap_or(true) {
            rows.push(vec![
                "non_positive_budget".into(),
                format!("{}: limit '{}'", cat, limit),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
