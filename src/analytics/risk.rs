// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{in_accounts, is_excluded, spend_amount, timeline};
use crate::config::RiskConfig;
use crate::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Normal,
    Elevated,
    High,
    Critical,
}

/// Deviation of current-month spend from the rolling baseline, banded by
/// percentage over average.
pub fn classify(delta_percent: i64) -> RiskLevel {
    if delta_percent <= 10 {
        RiskLevel::Normal
    } else if delta_percent <= 50 {
        RiskLevel::Elevated
    } else if delta_percent <= 100 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSpend {
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub category: String,
    pub current_spend: Decimal,
    pub avg_spend: Decimal,
    pub delta_dollars: Decimal,
    pub delta_percent: i64,
    pub level: RiskLevel,
    pub monthly_history: Vec<MonthSpend>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingRiskReport {
    pub current_month: String,
    pub risks: Vec<RiskAssessment>,
    pub on_track_count: usize,
    pub total_categories: usize,
}

/// Flag categories whose current-month spend runs hot against their own
/// recent history, no budget configuration required.
///
/// A category is considered only when it spent something this month and has
/// expense data in every baseline month; one with no history never appears,
/// as risk or as on-track. Spend at or below the noise floor stays off the
/// risk list but still counts as on-track when its deviation is normal.
pub fn spending_risks(
    transactions: &[Transaction],
    account_ids: Option<&[i64]>,
    today: NaiveDate,
    cfg: &RiskConfig,
) -> SpendingRiskReport {
    let empty = || SpendingRiskReport {
        current_month: timeline::month_key(today),
        risks: Vec::new(),
        on_track_count: 0,
        total_categories: 0,
    };
    if cfg.baseline_months == 0 {
        return empty();
    }
    let window_len = cfg.history_months.max(cfg.baseline_months + 1);
    let months = match timeline::trailing_months(today, window_len) {
        Ok(m) => m,
        Err(_) => return empty(),
    };
    let current_month = months[months.len() - 1].clone();
    let history_start = months.len().saturating_sub(cfg.history_months);
    let baseline: &[String] = &months[months.len() - 1 - cfg.baseline_months..months.len() - 1];

    // category -> month -> expense total (absolute value of outflows only)
    let mut spend: BTreeMap<&str, HashMap<&str, Decimal>> = BTreeMap::new();
    for t in transactions {
        if !in_accounts(t, account_ids) {
            continue;
        }
        let label = t.category_label();
        if is_excluded(label, &cfg.excluded_categories) {
            continue;
        }
        let amount = spend_amount(t.amount);
        if amount == Decimal::ZERO {
            continue;
        }
        let key = timeline::month_key(t.date);
        let Some(month) = months.iter().find(|m| **m == key) else {
            continue;
        };
        *spend
            .entry(label)
            .or_default()
            .entry(month.as_str())
            .or_insert(Decimal::ZERO) += amount;
    }

    let mut risks = Vec::new();
    let mut on_track_count = 0;
    let mut total_categories = 0;

    for (category, by_month) in &spend {
        let current = by_month
            .get(current_month.as_str())
            .copied()
            .unwrap_or(Decimal::ZERO);
        if current <= Decimal::ZERO {
            continue;
        }
        // Insufficient history: every baseline month must have data.
        if !baseline
            .iter()
            .all(|m| by_month.get(m.as_str()).is_some_and(|v| *v > Decimal::ZERO))
        {
            continue;
        }
        let avg: Decimal = baseline
            .iter()
            .map(|m| by_month.get(m.as_str()).copied().unwrap_or(Decimal::ZERO))
            .sum::<Decimal>()
            / Decimal::from(cfg.baseline_months as i64);
        if avg <= Decimal::ZERO {
            continue;
        }
        total_categories += 1;

        let delta = current - avg;
        let delta_percent = ((delta / avg) * Decimal::new(100, 0))
            .round()
            .to_i64()
            .unwrap_or(0);
        let level = classify(delta_percent);

        if level == RiskLevel::Normal {
            on_track_count += 1;
            continue;
        }
        if current <= cfg.min_current_spend {
            continue;
        }

        let monthly_history = months[history_start..]
            .iter()
            .map(|m| MonthSpend {
                month: m.clone(),
                amount: by_month
                    .get(m.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(2),
            })
            .collect();

        risks.push(RiskAssessment {
            category: category.to_string(),
            current_spend: current.round_dp(2),
            avg_spend: avg.round_dp(2),
            delta_dollars: delta.round_dp(2),
            delta_percent,
            level,
            monthly_history,
        });
    }

    risks.sort_by(|a, b| {
        b.delta_percent
            .cmp(&a.delta_percent)
            .then_with(|| a.category.cmp(&b.category))
    });
    risks.truncate(cfg.max_flagged);

    SpendingRiskReport {
        current_month,
        risks,
        on_track_count,
        total_categories,
    }
}
