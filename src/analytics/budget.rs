// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{in_accounts, spend_amount, timeline, AnalyticsError};
use crate::models::{Budget, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    OnTrack,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub category_name: String,
    pub monthly_limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_used: f64,
    pub status: BudgetState,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatusReport {
    pub month: String,
    pub budgets: Vec<BudgetStatus>,
}

/// Spend against every active budget for one month. Pure function of
/// (budgets, transactions, month); inactive budgets are not reported.
pub fn budget_status(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: &str,
    account_ids: Option<&[i64]>,
) -> Result<BudgetStatusReport, AnalyticsError> {
    timeline::parse_month(month)?;
    let mut out: Vec<BudgetStatus> = budgets
        .iter()
        .filter(|b| b.is_active)
        .map(|b| evaluate(b, transactions, month, account_ids))
        .collect();
    out.sort_by(|a, b| a.category_name.cmp(&b.category_name));
    Ok(BudgetStatusReport {
        month: month.to_string(),
        budgets: out,
    })
}

fn evaluate(
    budget: &Budget,
    transactions: &[Transaction],
    month: &str,
    account_ids: Option<&[i64]>,
) -> BudgetStatus {
    let spent: Decimal = transactions
        .iter()
        .filter(|t| {
            in_accounts(t, account_ids)
                && t.category_label() == budget.category_name
                && timeline::month_key(t.date) == month
        })
        .map(|t| spend_amount(t.amount))
        .sum();
    let spent = spent.round_dp(2);
    let limit = budget.monthly_limit;

    // A non-positive limit reads as 0% used, never a division error.
    let percentage_used = if limit > Decimal::ZERO {
        ((spent / limit) * Decimal::new(100, 0))
            .round_dp(1)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };

    let status = if percentage_used >= 100.0 {
        BudgetState::Exceeded
    } else if percentage_used >= budget.alert_threshold as f64 {
        BudgetState::Warning
    } else {
        BudgetState::OnTrack
    };

    BudgetStatus {
        category_name: budget.category_name.clone(),
        monthly_limit: limit,
        spent,
        remaining: (limit - spent).max(Decimal::ZERO).round_dp(2),
        percentage_used,
        status,
    }
}
