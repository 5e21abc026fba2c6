// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::budget::{budget_status, BudgetStatus};
use super::{in_accounts, is_excluded, is_expense, spend_amount, timeline, AnalyticsError};
use crate::config::EngineConfig;
use crate::models::{Account, Budget, Transaction};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct KpiData {
    pub total_balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_spending: Decimal,
    pub net_cash_flow: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub kpis: KpiData,
    pub budget_alerts: Vec<BudgetStatus>,
}

/// Balance is always derived: starting balance plus every amount since.
pub fn account_balance(account: &Account, transactions: &[Transaction]) -> Decimal {
    let delta: Decimal = transactions
        .iter()
        .filter(|t| t.account_id == account.id)
        .map(|t| t.amount)
        .sum();
    (account.initial_balance + delta).round_dp(2)
}

/// Headline numbers for the landing view: total balance across active
/// accounts, the current month's income and spending, and every budget
/// sitting at or past its alert threshold, worst first.
pub fn dashboard(
    transactions: &[Transaction],
    accounts: &[Account],
    budgets: &[Budget],
    account_ids: Option<&[i64]>,
    today: NaiveDate,
    cfg: &EngineConfig,
) -> Result<DashboardReport, AnalyticsError> {
    let total_balance: Decimal = accounts
        .iter()
        .filter(|a| a.is_active && account_ids.map_or(true, |ids| ids.contains(&a.id)))
        .map(|a| account_balance(a, transactions))
        .sum();

    let month = timeline::month_key(today);
    let mut monthly_income = Decimal::ZERO;
    let mut monthly_spending = Decimal::ZERO;
    for t in transactions {
        if !in_accounts(t, account_ids)
            || timeline::month_key(t.date) != month
            || is_excluded(t.category_label(), &cfg.transfer_categories)
        {
            continue;
        }
        if is_expense(t.amount) {
            monthly_spending += spend_amount(t.amount);
        } else {
            monthly_income += t.amount;
        }
    }
    let monthly_income = monthly_income.round_dp(2);
    let monthly_spending = monthly_spending.round_dp(2);

    let status = budget_status(budgets, transactions, &month, account_ids)?;
    let mut budget_alerts: Vec<BudgetStatus> = status
        .budgets
        .into_iter()
        .filter(|s| {
            budgets
                .iter()
                .find(|b| b.category_name == s.category_name)
                .is_some_and(|b| s.percentage_used >= b.alert_threshold as f64)
        })
        .collect();
    budget_alerts.sort_by(|a, b| {
        b.percentage_used
            .partial_cmp(&a.percentage_used)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(DashboardReport {
        kpis: KpiData {
            total_balance,
            monthly_income,
            monthly_spending,
            net_cash_flow: monthly_income - monthly_spending,
        },
        budget_alerts,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancePoint {
    pub date: String,
    pub balance: Decimal,
}

/// Daily running balance for the trailing `days` window: starting balances
/// plus everything dated before the window, then one point per day through
/// today.
pub fn balance_history(
    transactions: &[Transaction],
    accounts: &[Account],
    days: usize,
    account_id: Option<i64>,
    today: NaiveDate,
) -> Result<Vec<BalancePoint>, AnalyticsError> {
    if days == 0 {
        return Err(AnalyticsError::InvalidDays(days));
    }
    let start = today - Duration::days(days as i64 - 1);

    let initial: Decimal = accounts
        .iter()
        .filter(|a| match account_id {
            Some(id) => a.id == id,
            None => a.is_active,
        })
        .map(|a| a.initial_balance)
        .sum();

    let mut balance = initial;
    let mut by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    for t in transactions {
        if let Some(id) = account_id {
            if t.account_id != id {
                continue;
            }
        }
        if t.date < start {
            balance += t.amount;
        } else if t.date <= today {
            *by_day.entry(t.date).or_insert(Decimal::ZERO) += t.amount;
        }
    }

    let mut out = Vec::with_capacity(days);
    let mut day = start;
    while day <= today {
        if let Some(amount) = by_day.get(&day) {
            balance += *amount;
        }
        out.push(BalancePoint {
            date: day.to_string(),
            balance: balance.round_dp(2),
        });
        day += Duration::days(1);
    }
    Ok(out)
}
