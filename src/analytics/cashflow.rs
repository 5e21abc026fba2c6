// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{in_accounts, is_excluded, is_expense, spend_amount, timeline, AnalyticsError};
use crate::config::EngineConfig;
use crate::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowPoint {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Income vs. expenses for `months` consecutive months ending at the
/// reference month, oldest first. Income keeps every positive amount;
/// expenses drop money-movement categories so transfers out never read as
/// spending.
pub fn cash_flow(
    transactions: &[Transaction],
    months: usize,
    account_ids: Option<&[i64]>,
    today: NaiveDate,
    cfg: &EngineConfig,
) -> Result<Vec<CashFlowPoint>, AnalyticsError> {
    let window = timeline::trailing_months(today, months)?;
    let mut by_month: HashMap<&str, (Decimal, Decimal)> = HashMap::new();
    for m in &window {
        by_month.insert(m.as_str(), (Decimal::ZERO, Decimal::ZERO));
    }

    for t in transactions {
        if !in_accounts(t, account_ids) {
            continue;
        }
        let key = timeline::month_key(t.date);
        let Some(cell) = by_month.get_mut(key.as_str()) else {
            continue;
        };
        if is_expense(t.amount) {
            if !is_excluded(t.category_label(), &cfg.transfer_categories) {
                cell.1 += spend_amount(t.amount);
            }
        } else {
            cell.0 += t.amount;
        }
    }

    Ok(window
        .iter()
        .map(|m| {
            let (income, expenses) = by_month[m.as_str()];
            let income = income.round_dp(2);
            let expenses = expenses.round_dp(2);
            CashFlowPoint {
                month: m.clone(),
                income,
                expenses,
                net: (income - expenses).round_dp(2),
            }
        })
        .collect())
}
