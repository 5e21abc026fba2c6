// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Budget, Transaction};
use crate::utils::{parse_date, parse_decimal_lenient};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// One read of the ledger. The analytics engine only ever sees one of
/// these, never the connection, so every report is computed against a
/// consistent view of the data.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub accounts: Vec<Account>,
    pub budgets: Vec<Budget>,
}

pub fn snapshot(conn: &Connection) -> Result<Snapshot> {
    Ok(Snapshot {
        transactions: all_transactions(conn)?,
        accounts: all_accounts(conn)?,
        budgets: all_budgets(conn)?,
    })
}

pub fn all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, date, description, amount, category,
                is_verified, import_batch_id, created_at
         FROM transactions ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(2)?;
        let amount_s: String = r.get(4)?;
        out.push(Transaction {
            id: r.get(0)?,
            account_id: r.get(1)?,
            date: parse_date(&date_s)?,
            description: r.get(3)?,
            amount: parse_decimal_lenient(&amount_s),
            category: r.get(5)?,
            is_verified: r.get::<_, i64>(6)? != 0,
            import_batch_id: r.get(7)?,
            created_at: r.get(8)?,
        });
    }
    Ok(out)
}

pub fn all_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, account_type, initial_balance, is_active
         FROM accounts ORDER BY name",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let initial_s: String = r.get(3)?;
        out.push(Account {
            id: r.get(0)?,
            name: r.get(1)?,
            account_type: r.get(2)?,
            initial_balance: parse_decimal_lenient(&initial_s),
            is_active: r.get::<_, i64>(4)? != 0,
        });
    }
    Ok(out)
}

pub fn all_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, category_name, monthly_limit, alert_threshold, is_active
         FROM budgets ORDER BY category_name",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let limit_s: String = r.get(2)?;
        out.push(Budget {
            id: r.get(0)?,
            category_name: r.get(1)?,
            monthly_limit: parse_decimal_lenient(&limit_s),
            alert_threshold: r.get::<_, i64>(3)? as u32,
            is_active: r.get::<_, i64>(4)? != 0,
        });
    }
    Ok(out)
}

/// Name lookup that distinguishes "absent" from a query error; reports that
/// reference an account by name degrade to an empty result when it is gone.
pub fn account_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id: Option<i64> = conn
        .query_row("SELECT id FROM accounts WHERE name=?1", params![name], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(id)
}
