// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::dashboard::account_balance;
use crate::ledger;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let typ = sub.get_one::<String>("type").unwrap();
            let initial = parse_decimal(sub.get_one::<String>("initial-balance").unwrap())?;
            conn.execute(
                "INSERT INTO accounts(name, account_type, initial_balance) VALUES (?1, ?2, ?3)",
                params![name, typ, initial.to_string()],
            )?;
            println!("Added account '{}' ({}, opening {})", name, typ, initial);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("close", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let changed = conn.execute(
                "UPDATE accounts SET is_active=0 WHERE name=?1",
                params![name],
            )?;
            if changed == 0 {
                println!("No account named '{}'", name);
            } else {
                println!("Closed account '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    name: String,
    account_type: String,
    balance: String,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = ledger::all_accounts(conn)?;
    let transactions = ledger::all_transactions(conn)?;

    let rows: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            account_type: a.account_type.clone(),
            balance: fmt_money(&account_balance(a, &transactions)),
            active: a.is_active,
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.account_type,
                    r.balance,
                    if r.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Type", "Balance", "Active"], data)
        );
    }
    Ok(())
}
