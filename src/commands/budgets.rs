// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::budget::{budget_status, BudgetState};
use crate::analytics::timeline;
use crate::ledger;
use crate::utils::{fmt_money, maybe_print_json, parse_account_ids, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let threshold = *sub.get_one::<u32>("alert-threshold").unwrap();
    conn.execute(
        "INSERT INTO budgets(category_name, monthly_limit, alert_threshold) VALUES (?1,?2,?3)
         ON CONFLICT(category_name) DO UPDATE
             SET monthly_limit=excluded.monthly_limit,
                 alert_threshold=excluded.alert_threshold,
                 is_active=1",
        params![category, limit.to_string(), threshold],
    )?;
    println!(
        "Budget set for {} = {} (alert at {}%)",
        category, limit, threshold
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let budgets = ledger::all_budgets(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let data = budgets
            .iter()
            .map(|b| {
                vec![
                    b.category_name.clone(),
                    fmt_money(&b.monthly_limit),
                    format!("{}%", b.alert_threshold),
                    if b.is_active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Monthly limit", "Alert", "Active"], data)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap();
    let changed = conn.execute(
        "DELETE FROM budgets WHERE category_name=?1",
        params![category],
    )?;
    if changed == 0 {
        println!("No budget for '{}'", category);
    } else {
        println!("Removed budget for '{}'", category);
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => m.clone(),
        None => timeline::month_key(Local::now().date_naive()),
    };
    let account_ids = sub
        .get_one::<String>("accounts")
        .map(|s| parse_account_ids(s))
        .transpose()?;

    let snap = ledger::snapshot(conn)?;
    let report = budget_status(
        &snap.budgets,
        &snap.transactions,
        &month,
        account_ids.as_deref(),
    )?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let data = report
            .budgets
            .iter()
            .map(|b| {
                let state = match b.status {
                    BudgetState::OnTrack => "on_track",
                    BudgetState::Warning => "warning",
                    BudgetState::Exceeded => "exceeded",
                };
                vec![
                    b.category_name.clone(),
                    fmt_money(&b.monthly_limit),
                    fmt_money(&b.spent),
                    fmt_money(&b.remaining),
                    format!("{:.1}%", b.percentage_used),
                    state.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Used", "Status"],
                data
            )
        );
    }
    Ok(())
}
