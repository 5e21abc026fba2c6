// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Engine configuration. Household-specific constants from the spreadsheet
/// era (noise floors, rent heuristics, category sets) live here as data with
/// their historical values as defaults, overridable via the `engine_config`
/// settings row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pure money-movement categories: stripped from income/expense totals
    /// so internal moves never double-count.
    pub transfer_categories: Vec<String>,
    pub risk: RiskConfig,
    pub rental: RentalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Non-spending categories invisible to the detector.
    pub excluded_categories: Vec<String>,
    /// Trailing months averaged into the baseline.
    pub baseline_months: usize,
    /// Months retained for trend display, current month included.
    pub history_months: usize,
    /// Current-month spend at or below this never makes the risk list.
    pub min_current_spend: Decimal,
    /// Risk list is capped at this many categories.
    pub max_flagged: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalConfig {
    pub account_name: String,
    pub income_category: String,
    pub electricity_category: String,
    pub gas_category: String,
    pub water_category: String,
    /// Ordered: the first rule whose pattern matches a deposit description
    /// decides payer and contribution policy.
    pub tenant_rules: Vec<TenantRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRule {
    pub payer: String,
    /// Regex matched against the transaction description.
    pub pattern: String,
    pub policy: ContributionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContributionPolicy {
    /// Deposit covers rent plus utilities: only the excess over the flat
    /// rent counts as a utility contribution.
    ExcessOverRent { base_rent: Decimal },
    /// Deposit is a utility reimbursement only when at or under the cap;
    /// anything larger is rent and contributes nothing.
    CappedReimbursement { cap: Decimal },
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transfer_categories: vec![
                "Transfer".into(),
                "Credit Card Payment".into(),
                "Investment".into(),
            ],
            risk: RiskConfig::default(),
            rental: RentalConfig::default(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            excluded_categories: vec![
                "Transfer".into(),
                "Credit Card Payment".into(),
                "Investment".into(),
                "Income".into(),
                "Rental Income".into(),
            ],
            baseline_months: 3,
            history_months: 5,
            min_current_spend: Decimal::new(20, 0),
            max_flagged: 6,
        }
    }
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            account_name: "Rental Property".into(),
            income_category: "Rental Income".into(),
            electricity_category: "Electricity".into(),
            gas_category: "Gas".into(),
            water_category: "Water".into(),
            tenant_rules: vec![
                TenantRule {
                    payer: "Unit A".into(),
                    pattern: "(?i)unit a".into(),
                    policy: ContributionPolicy::ExcessOverRent {
                        base_rent: Decimal::new(2000, 0),
                    },
                },
                TenantRule {
                    payer: "Unit B".into(),
                    pattern: "(?i)unit b".into(),
                    policy: ContributionPolicy::CappedReimbursement {
                        cap: Decimal::new(500, 0),
                    },
                },
            ],
        }
    }
}

/// Load the engine config, applying any stored override on top of defaults.
pub fn load(conn: &Connection) -> Result<EngineConfig> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='engine_config'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match stored {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(EngineConfig::default()),
    }
}

pub fn store(conn: &Connection, cfg: &EngineConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(cfg)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('engine_config', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [&json],
    )?;
    Ok(())
}
