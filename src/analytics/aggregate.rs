// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{in_accounts, is_excluded, timeline};
use crate::models::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Signed sum and count for one (category, month) cell.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMonthTotal {
    pub category: String,
    pub month: String,
    pub total: Decimal,
    pub count: usize,
}

/// Group a transaction set by (category, month). Blank or missing categories
/// fold into "Uncategorized"; excluded categories are dropped from the
/// output entirely, not zeroed. Output is sorted by (category, month) so the
/// same snapshot always serializes identically.
pub fn by_category_month(
    transactions: &[Transaction],
    month: Option<&str>,
    excluded: &[String],
    account_ids: Option<&[i64]>,
) -> Vec<CategoryMonthTotal> {
    let mut cells: BTreeMap<(String, String), (Decimal, usize)> = BTreeMap::new();
    for t in transactions {
        if !in_accounts(t, account_ids) {
            continue;
        }
        let label = t.category_label();
        if is_excluded(label, excluded) {
            continue;
        }
        let key = timeline::month_key(t.date);
        if let Some(m) = month {
            if key != m {
                continue;
            }
        }
        let cell = cells
            .entry((label.to_string(), key))
            .or_insert((Decimal::ZERO, 0));
        cell.0 += t.amount;
        cell.1 += 1;
    }
    cells
        .into_iter()
        .map(|((category, month), (total, count))| CategoryMonthTotal {
            category,
            month,
            total,
            count,
        })
        .collect()
}

/// Per-category signed totals for one month, category-sorted.
pub fn by_category(
    transactions: &[Transaction],
    month: &str,
    excluded: &[String],
    account_ids: Option<&[i64]>,
) -> Vec<(String, Decimal)> {
    by_category_month(transactions, Some(month), excluded, account_ids)
        .into_iter()
        .map(|c| (c.category, c.total))
        .collect()
}
