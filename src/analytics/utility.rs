// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{is_expense, spend_amount, timeline};
use crate::config::{ContributionPolicy, RentalConfig, TenantRule};
use crate::models::Transaction;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct BilledMonth {
    electricity: Decimal,
    gas: Decimal,
    water: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct UtilityMonthRecord {
    pub month: String,
    pub electricity: Decimal,
    pub gas: Decimal,
    pub water: Decimal,
    pub total_billed: Decimal,
    pub contributions_by_payer: BTreeMap<String, Decimal>,
    pub total_collected: Decimal,
    pub delta: Decimal,
    pub running_balance: Decimal,
    pub pending: bool,
}

/// Tenant contribution for one deposit under the first matching rule.
/// Invalid patterns are skipped the same way malformed import rules are.
fn contribution(rules: &[(Option<Regex>, &TenantRule)], t: &Transaction) -> Option<(String, Decimal)> {
    for (re, rule) in rules {
        let Some(re) = re else { continue };
        if !re.is_match(&t.description) {
            continue;
        }
        let amount = match &rule.policy {
            // Excess over the flat rent is the utility share.
            ContributionPolicy::ExcessOverRent { base_rent } => {
                (t.amount - base_rent).max(Decimal::ZERO)
            }
            // Over the cap it is rent, not a reimbursement.
            ContributionPolicy::CappedReimbursement { cap } => {
                if t.amount <= *cap {
                    t.amount
                } else {
                    Decimal::ZERO
                }
            }
        };
        return Some((rule.payer.clone(), amount));
    }
    None
}

/// Monthly ledger of utility bills against tenant reimbursements for the
/// rental account, with a balance carried forward from the first billed
/// month ever recorded. Only months that were actually billed get a row;
/// the target year's rows are returned, balances intact from prior years.
pub fn utility_tracker(
    transactions: &[Transaction],
    rental_account: Option<i64>,
    year: i32,
    cfg: &RentalConfig,
) -> Vec<UtilityMonthRecord> {
    let Some(account_id) = rental_account else {
        return Vec::new();
    };

    let rules: Vec<(Option<Regex>, &TenantRule)> = cfg
        .tenant_rules
        .iter()
        .map(|r| (Regex::new(&r.pattern).ok(), r))
        .collect();

    let mut billed: BTreeMap<String, BilledMonth> = BTreeMap::new();
    let mut collected: BTreeMap<String, BTreeMap<String, Decimal>> = BTreeMap::new();

    for t in transactions {
        if t.account_id != account_id {
            continue;
        }
        let month = timeline::month_key(t.date);
        let label = t.category_label();
        if is_expense(t.amount) {
            let amount = spend_amount(t.amount);
            if label == cfg.electricity_category {
                billed.entry(month).or_default().electricity += amount;
            } else if label == cfg.gas_category {
                billed.entry(month).or_default().gas += amount;
            } else if label == cfg.water_category {
                billed.entry(month).or_default().water += amount;
            }
        } else if label == cfg.income_category && t.amount > Decimal::ZERO {
            if let Some((payer, amount)) = contribution(&rules, t) {
                if amount > Decimal::ZERO {
                    *collected
                        .entry(month)
                        .or_default()
                        .entry(payer)
                        .or_insert(Decimal::ZERO) += amount;
                }
            }
        }
    }

    // Strictly ascending month walk over the full history; the balance is
    // cumulative and never resets.
    let mut running_balance = Decimal::ZERO;
    let mut out = Vec::new();
    for (month, bill) in &billed {
        let total_billed = (bill.electricity + bill.gas + bill.water).round_dp(2);
        let contributions_by_payer: BTreeMap<String, Decimal> = collected
            .get(month)
            .map(|m| {
                m.iter()
                    .map(|(payer, amt)| (payer.clone(), amt.round_dp(2)))
                    .collect()
            })
            .unwrap_or_default();
        let total_collected: Decimal = contributions_by_payer.values().copied().sum();
        let delta = (total_collected - total_billed).round_dp(2);
        running_balance += delta;

        let in_year = month.starts_with(&format!("{:04}-", year));
        if !in_year {
            continue;
        }
        out.push(UtilityMonthRecord {
            month: month.clone(),
            electricity: bill.electricity.round_dp(2),
            gas: bill.gas.round_dp(2),
            water: bill.water.round_dp(2),
            total_billed,
            total_collected,
            delta,
            running_balance,
            pending: total_collected == Decimal::ZERO && total_billed > Decimal::ZERO,
            contributions_by_payer,
        })
    }
    out
}
