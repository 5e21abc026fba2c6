// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label applied wherever a transaction carries no usable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub initial_balance: Decimal,
    pub is_active: bool,
}

/// A single ledger entry. Positive amounts are inflows, negative amounts are
/// expenses; every aggregate downstream is a sum over this signed field.
/// Only `category` may change after import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub is_verified: bool,
    pub import_batch_id: Option<String>,
    pub created_at: String,
}

impl Transaction {
    /// Category label with blank/missing values folded into "Uncategorized".
    pub fn category_label(&self) -> &str {
        match &self.category {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_name: String,
    pub monthly_limit: Decimal,
    pub alert_threshold: u32,
    pub is_active: bool,
}
