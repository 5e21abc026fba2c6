// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{in_accounts, is_excluded, is_expense, spend_amount, timeline, AnalyticsError};
use crate::config::EngineConfig;
use crate::models::Transaction;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySpend {
    pub date: String,
    pub amount: Decimal,
    pub cumulative: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyBreakdown {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub category_breakdown: Vec<CategoryTotal>,
    pub daily_spending: Vec<DailySpend>,
    pub top_transactions: Vec<Transaction>,
}

/// Full picture of one calendar month: income/expense/net, category ranking,
/// cumulative daily spend, and the largest transactions. Money-movement
/// categories are stripped throughout.
pub fn monthly_breakdown(
    transactions: &[Transaction],
    month: &str,
    account_ids: Option<&[i64]>,
    today: NaiveDate,
    cfg: &EngineConfig,
) -> Result<MonthlyBreakdown, AnalyticsError> {
    let (year, mon) = timeline::parse_month(month)?;
    let excluded = &cfg.transfer_categories;

    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| {
            in_accounts(t, account_ids)
                && timeline::month_key(t.date) == month
                && !is_excluded(t.category_label(), excluded)
        })
        .collect();

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut by_category: HashMap<&str, Decimal> = HashMap::new();
    let mut by_day: HashMap<u32, Decimal> = HashMap::new();
    for t in &in_month {
        if is_expense(t.amount) {
            expenses += spend_amount(t.amount);
            *by_day.entry(t.date.day()).or_insert(Decimal::ZERO) += spend_amount(t.amount);
        } else {
            income += t.amount;
        }
        *by_category.entry(t.category_label()).or_insert(Decimal::ZERO) += t.amount;
    }

    let mut category_breakdown: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total: total.round_dp(2),
        })
        .collect();
    category_breakdown.sort_by(|a, b| {
        b.total
            .abs()
            .cmp(&a.total.abs())
            .then_with(|| a.category.cmp(&b.category))
    });

    // Day 1 through month end, or through today when the month is still in
    // progress; the cumulative line never decreases.
    let last_day = if timeline::month_key(today) == month {
        today.day()
    } else {
        timeline::days_in_month(year, mon)
    };
    let mut daily_spending = Vec::with_capacity(last_day as usize);
    let mut cumulative = Decimal::ZERO;
    for day in 1..=last_day {
        let amount = by_day.get(&day).copied().unwrap_or(Decimal::ZERO).round_dp(2);
        cumulative += amount;
        daily_spending.push(DailySpend {
            date: format!("{:04}-{:02}-{:02}", year, mon, day),
            amount,
            cumulative,
        });
    }

    // Stable sort keeps ties in original ledger order.
    let mut top: Vec<&Transaction> = in_month.clone();
    top.sort_by(|a, b| b.amount.abs().cmp(&a.amount.abs()));
    let top_transactions: Vec<Transaction> = top.into_iter().take(10).cloned().collect();

    let income = income.round_dp(2);
    let expenses = expenses.round_dp(2);
    Ok(MonthlyBreakdown {
        month: month.to_string(),
        income,
        expenses,
        net: (income - expenses).round_dp(2),
        category_breakdown,
        daily_spending,
        top_transactions,
    })
}
