// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{cashflow, dashboard, monthly, risk, tax, utility};
use crate::utils::{fmt_money, id_for_account, maybe_print_json, parse_account_ids, pretty_table};
use crate::{config, ledger};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly_report(conn, sub)?,
        Some(("cashflow", sub)) => cashflow_report(conn, sub)?,
        Some(("risks", sub)) => risks_report(conn, sub)?,
        Some(("dashboard", sub)) => dashboard_report(conn, sub)?,
        Some(("balance-history", sub)) => balance_history_report(conn, sub)?,
        Some(("tax", sub)) => tax_report(conn, sub)?,
        Some(("utilities", sub)) => utilities_report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn account_filter(sub: &clap::ArgMatches) -> Result<Option<Vec<i64>>> {
    sub.get_one::<String>("accounts")
        .map(|s| parse_account_ids(s))
        .transpose()
}

fn monthly_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub.get_one::<String>("month").unwrap();
    let account_ids = account_filter(sub)?;

    let cfg = config::load(conn)?;
    let snap = ledger::snapshot(conn)?;
    let report = monthly::monthly_breakdown(
        &snap.transactions,
        month,
        account_ids.as_deref(),
        Local::now().date_naive(),
        &cfg,
    )?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        println!(
            "{} income {} / expenses {} / net {}",
            report.month,
            fmt_money(&report.income),
            fmt_money(&report.expenses),
            fmt_money(&report.net)
        );
        let data = report
            .category_breakdown
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], data));
        let data = report
            .top_transactions
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    fmt_money(&t.amount),
                    t.category_label().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Category"], data)
        );
    }
    Ok(())
}

fn cashflow_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<usize>("months").unwrap();
    let account_ids = account_filter(sub)?;

    let cfg = config::load(conn)?;
    let snap = ledger::snapshot(conn)?;
    let series = cashflow::cash_flow(
        &snap.transactions,
        months,
        account_ids.as_deref(),
        Local::now().date_naive(),
        &cfg,
    )?;

    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let data = series
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    fmt_money(&p.income),
                    fmt_money(&p.expenses),
                    fmt_money(&p.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], data)
        );
    }
    Ok(())
}

fn risks_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account_ids = account_filter(sub)?;

    let cfg = config::load(conn)?;
    let snap = ledger::snapshot(conn)?;
    let report = risk::spending_risks(
        &snap.transactions,
        account_ids.as_deref(),
        Local::now().date_naive(),
        &cfg.risk,
    );

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        println!(
            "{}: {} flagged, {} on track of {} categories",
            report.current_month,
            report.risks.len(),
            report.on_track_count,
            report.total_categories
        );
        let data = report
            .risks
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_money(&r.current_spend),
                    fmt_money(&r.avg_spend),
                    format!("{:+}%", r.delta_percent),
                    format!("{:?}", r.level).to_lowercase(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "This month", "3-mo avg", "Delta", "Level"], data)
        );
    }
    Ok(())
}

fn dashboard_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account_ids = account_filter(sub)?;

    let cfg = config::load(conn)?;
    let snap = ledger::snapshot(conn)?;
    let report = dashboard::dashboard(
        &snap.transactions,
        &snap.accounts,
        &snap.budgets,
        account_ids.as_deref(),
        Local::now().date_naive(),
        &cfg,
    )?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        println!(
            "Balance {} | month income {} / spending {} / net {}",
            fmt_money(&report.kpis.total_balance),
            fmt_money(&report.kpis.monthly_income),
            fmt_money(&report.kpis.monthly_spending),
            fmt_money(&report.kpis.net_cash_flow)
        );
        if !report.budget_alerts.is_empty() {
            let data = report
                .budget_alerts
                .iter()
                .map(|b| {
                    vec![
                        b.category_name.clone(),
                        fmt_money(&b.spent),
                        fmt_money(&b.monthly_limit),
                        format!("{:.1}%", b.percentage_used),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Alert", "Spent", "Limit", "Used"], data));
        }
    }
    Ok(())
}

fn balance_history_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let days = *sub.get_one::<usize>("days").unwrap();
    let account_id = sub
        .get_one::<String>("account")
        .map(|name| id_for_account(conn, name))
        .transpose()?;

    let snap = ledger::snapshot(conn)?;
    let series = dashboard::balance_history(
        &snap.transactions,
        &snap.accounts,
        days,
        account_id,
        Local::now().date_naive(),
    )?;

    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let data = series
            .iter()
            .map(|p| vec![p.date.clone(), fmt_money(&p.balance)])
            .collect();
        println!("{}", pretty_table(&["Date", "Balance"], data));
    }
    Ok(())
}

fn tax_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();

    let cfg = config::load(conn)?;
    // Absent rental account degrades to an empty report, not an error.
    let rental = ledger::account_id_by_name(conn, &cfg.rental.account_name)?;
    let snap = ledger::snapshot(conn)?;
    let report = tax::tax_summary(&snap.transactions, rental, year);

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        println!(
            "{}: income {} / expenses {} / net {}  (prev {}: net {})",
            report.year,
            fmt_money(&report.annual_summary.total_income),
            fmt_money(&report.annual_summary.total_expenses),
            fmt_money(&report.annual_summary.net),
            report.prev_year,
            fmt_money(&report.prev_annual_summary.net)
        );
        let data = report
            .t776_summary
            .iter()
            .map(|g| {
                vec![
                    g.group_name.clone(),
                    fmt_money(&g.selected_year_total),
                    fmt_money(&g.prev_year_total),
                    fmt_money(&g.delta_dollars),
                    g.delta_percent
                        .map(|p| format!("{:+.1}%", p))
                        .unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["T776 line", &report.year.to_string(), &report.prev_year.to_string(), "Delta", "Delta %"],
                data
            )
        );
    }
    Ok(())
}

fn utilities_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();

    let cfg = config::load(conn)?;
    let rental = ledger::account_id_by_name(conn, &cfg.rental.account_name)?;
    let snap = ledger::snapshot(conn)?;
    let records = utility::utility_tracker(&snap.transactions, rental, year, &cfg.rental);

    if !maybe_print_json(json_flag, jsonl_flag, &records)? {
        let data = records
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    fmt_money(&r.total_billed),
                    fmt_money(&r.total_collected),
                    fmt_money(&r.delta),
                    fmt_money(&r.running_balance),
                    if r.pending { "pending".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Billed", "Collected", "Delta", "Balance", ""],
                data
            )
        );
    }
    Ok(())
}
