// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod budget;
pub mod cashflow;
pub mod dashboard;
pub mod monthly;
pub mod risk;
pub mod tax;
pub mod timeline;
pub mod utility;

use crate::models::Transaction;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Invalid month count {0}, expected at least 1")]
    InvalidWindow(usize),
    #[error("Invalid day count {0}, expected at least 1")]
    InvalidDays(usize),
}

/// The sign convention, in one place. Expense = negative amount; everything
/// that needs spend as a positive number goes through `spend_amount` instead
/// of re-deriving the sign locally.
pub fn is_expense(amount: Decimal) -> bool {
    amount < Decimal::ZERO
}

pub fn spend_amount(amount: Decimal) -> Decimal {
    if is_expense(amount) {
        amount.abs()
    } else {
        Decimal::ZERO
    }
}

pub(crate) fn in_accounts(t: &Transaction, filter: Option<&[i64]>) -> bool {
    match filter {
        Some(ids) => ids.contains(&t.account_id),
        None => true,
    }
}

pub(crate) fn is_excluded(category: &str, excluded: &[String]) -> bool {
    excluded.iter().any(|c| c == category)
}
