// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_account, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("categorize", sub)) => categorize(conn, sub)?,
        Some(("verify", sub)) => verify(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let account_name = sub.get_one::<String>("account").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let batch = sub.get_one::<String>("batch").map(|s| s.to_string());

    let account_id = id_for_account(conn, account_name)?;
    conn.execute(
        "INSERT INTO transactions(account_id, date, description, amount, category, import_batch_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account_id,
            date.to_string(),
            description,
            amount.to_string(),
            category,
            batch
        ],
    )?;
    println!(
        "Recorded {} on {} '{}' (acct: {})",
        amount, date, description, account_name
    );
    Ok(())
}

/// The one mutation the ledger allows after import.
fn categorize(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let category = sub.get_one::<String>("category").unwrap();
    let changed = conn
        .execute(
            "UPDATE transactions SET category=?1 WHERE id=?2",
            params![category, id],
        )
        .with_context(|| format!("Update category for transaction {}", id))?;
    if changed == 0 {
        println!("No transaction with id {}", id);
    } else {
        println!("Transaction {} -> '{}'", id, category);
    }
    Ok(())
}

fn verify(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "UPDATE transactions SET is_verified=1 WHERE id=?1",
        params![id],
    )?;
    if changed == 0 {
        println!("No transaction with id {}", id);
    } else {
        println!("Transaction {} verified", id);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    if r.verified { "*".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Account", "Description", "Amount", "Category", "Ok"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub verified: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, a.name, t.description, t.amount, t.category, t.is_verified FROM transactions t LEFT JOIN accounts a ON t.account_id=a.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND a.name=?");
        params_vec.push(acct.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND t.category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let account: Option<String> = r.get(2)?;
        let description: String = r.get(3)?;
        let amount: String = r.get(4)?;
        let category: Option<String> = r.get(5)?;
        let verified: i64 = r.get(6)?;
        data.push(TransactionRow {
            id,
            date,
            account: account.unwrap_or_default(),
            description,
            amount,
            category: category.unwrap_or_default(),
            verified: verified != 0,
        });
    }
    Ok(data)
}
