// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::timeline;
use crate::models::Transaction;
use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// T776 reporting buckets, in form order. Every category lands in exactly
/// one group; anything unmapped falls through to "Other Expenses".
struct GroupDef {
    name: &'static str,
    is_income: bool,
    categories: &'static [&'static str],
}

static GROUPS: &[GroupDef] = &[
    GroupDef {
        name: "Gross Rents",
        is_income: true,
        categories: &["Rental Income"],
    },
    GroupDef {
        name: "Advertising",
        is_income: false,
        categories: &["Advertising"],
    },
    GroupDef {
        name: "Insurance",
        is_income: false,
        categories: &["Insurance", "Home Insurance"],
    },
    GroupDef {
        name: "Interest and Bank Charges",
        is_income: false,
        categories: &["Mortgage Interest", "Bank Fees"],
    },
    GroupDef {
        name: "Office Expenses",
        is_income: false,
        categories: &["Office Supplies"],
    },
    GroupDef {
        name: "Professional Fees",
        is_income: false,
        categories: &["Legal Fees", "Accounting"],
    },
    GroupDef {
        name: "Management and Administration",
        is_income: false,
        categories: &["Property Management", "Condo Fees"],
    },
    GroupDef {
        name: "Maintenance and Repairs",
        is_income: false,
        categories: &["Repairs", "Maintenance"],
    },
    GroupDef {
        name: "Property Taxes",
        is_income: false,
        categories: &["Property Tax"],
    },
    GroupDef {
        name: "Travel",
        is_income: false,
        categories: &["Travel"],
    },
    GroupDef {
        name: "Utilities",
        is_income: false,
        categories: &["Electricity", "Gas", "Water", "Internet"],
    },
    GroupDef {
        name: "Other Expenses",
        is_income: false,
        categories: &[],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct TaxCategoryRow {
    pub category: String,
    pub is_income: bool,
    pub selected_year_total: Decimal,
    pub prev_year_total: Decimal,
    pub delta_dollars: Decimal,
    pub delta_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct T776Group {
    pub group_name: String,
    pub is_income: bool,
    pub selected_year_total: Decimal,
    pub prev_year_total: Decimal,
    pub delta_dollars: Decimal,
    pub delta_percent: Option<f64>,
    pub children: Vec<TaxCategoryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotals {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaxSummary {
    pub year: i32,
    pub prev_year: i32,
    pub annual_summary: AnnualTotals,
    pub prev_annual_summary: AnnualTotals,
    pub t776_summary: Vec<T776Group>,
    pub monthly_data: Vec<MonthlyTotals>,
    pub category_breakdown: Vec<TaxCategoryRow>,
}

/// Year-over-year change as a percentage of the prior year. No prior-year
/// baseline means no percentage, which is not the same thing as 0%.
fn delta_percent(selected: Decimal, prev: Decimal) -> Option<f64> {
    if prev == Decimal::ZERO {
        return None;
    }
    (((selected - prev) / prev) * Decimal::new(100, 0))
        .round_dp(1)
        .to_f64()
}

/// Rental tax report for one year against the year before: T776 line-item
/// groups with per-category children, a flat category view, and annual plus
/// monthly totals. A missing rental account yields an all-zero report so the
/// dashboard degrades instead of failing.
pub fn tax_summary(
    transactions: &[Transaction],
    rental_account: Option<i64>,
    year: i32,
) -> TaxSummary {
    let prev_year = year - 1;
    let Some(account_id) = rental_account else {
        return empty_summary(year, prev_year);
    };

    // Per-category signed totals for both years.
    let mut selected: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut previous: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut monthly: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for m in 1..=12u32 {
        monthly.insert(format!("{:04}-{:02}", year, m), (Decimal::ZERO, Decimal::ZERO));
    }
    let mut annual = (Decimal::ZERO, Decimal::ZERO);
    let mut prev_annual = (Decimal::ZERO, Decimal::ZERO);

    for t in transactions {
        if t.account_id != account_id {
            continue;
        }
        let ty = t.date.year();
        if ty == year {
            *selected.entry(t.category_label()).or_insert(Decimal::ZERO) += t.amount;
            if t.amount > Decimal::ZERO {
                annual.0 += t.amount;
            } else {
                annual.1 += t.amount.abs();
            }
            if let Some(cell) = monthly.get_mut(&timeline::month_key(t.date)) {
                if t.amount > Decimal::ZERO {
                    cell.0 += t.amount;
                } else {
                    cell.1 += t.amount.abs();
                }
            }
        } else if ty == prev_year {
            *previous.entry(t.category_label()).or_insert(Decimal::ZERO) += t.amount;
            if t.amount > Decimal::ZERO {
                prev_annual.0 += t.amount;
            } else {
                prev_annual.1 += t.amount.abs();
            }
        }
    }

    let mut all_categories: Vec<&str> = selected.keys().chain(previous.keys()).copied().collect();
    all_categories.sort_unstable();
    all_categories.dedup();

    // Group membership: first explicit mention wins; leftovers go to the
    // catch-all.
    let group_of = |category: &str| -> usize {
        GROUPS
            .iter()
            .position(|g| g.categories.contains(&category))
            .unwrap_or(GROUPS.len() - 1)
    };

    let row_for = |category: &str, is_income: bool| -> TaxCategoryRow {
        let raw_sel = selected.get(category).copied().unwrap_or(Decimal::ZERO);
        let raw_prev = previous.get(category).copied().unwrap_or(Decimal::ZERO);
        let (sel, prev) = if is_income {
            (raw_sel, raw_prev)
        } else {
            (raw_sel.abs(), raw_prev.abs())
        };
        TaxCategoryRow {
            category: category.to_string(),
            is_income,
            selected_year_total: sel.round_dp(2),
            prev_year_total: prev.round_dp(2),
            delta_dollars: (sel - prev).round_dp(2),
            delta_percent: delta_percent(sel, prev),
        }
    };

    let mut t776_summary = Vec::new();
    for (idx, def) in GROUPS.iter().enumerate() {
        let children: Vec<TaxCategoryRow> = all_categories
            .iter()
            .filter(|c| group_of(c) == idx)
            .map(|c| row_for(c, def.is_income))
            .filter(|row| {
                row.selected_year_total != Decimal::ZERO || row.prev_year_total != Decimal::ZERO
            })
            .collect();
        let sel: Decimal = children.iter().map(|c| c.selected_year_total).sum();
        let prev: Decimal = children.iter().map(|c| c.prev_year_total).sum();
        if sel == Decimal::ZERO && prev == Decimal::ZERO {
            continue;
        }
        t776_summary.push(T776Group {
            group_name: def.name.to_string(),
            is_income: def.is_income,
            selected_year_total: sel.round_dp(2),
            prev_year_total: prev.round_dp(2),
            delta_dollars: (sel - prev).round_dp(2),
            delta_percent: delta_percent(sel, prev),
            children,
        });
    }

    // Flat view: income flag inferred from the raw totals themselves.
    let mut category_breakdown: Vec<TaxCategoryRow> = all_categories
        .iter()
        .map(|c| {
            let raw_sel = selected.get(*c).copied().unwrap_or(Decimal::ZERO);
            let raw_prev = previous.get(*c).copied().unwrap_or(Decimal::ZERO);
            let is_income = raw_sel > Decimal::ZERO || raw_prev > Decimal::ZERO;
            row_for(c, is_income)
        })
        .collect();
    category_breakdown.sort_by(|a, b| {
        b.selected_year_total
            .cmp(&a.selected_year_total)
            .then_with(|| a.category.cmp(&b.category))
    });

    TaxSummary {
        year,
        prev_year,
        annual_summary: AnnualTotals {
            total_income: annual.0.round_dp(2),
            total_expenses: annual.1.round_dp(2),
            net: (annual.0 - annual.1).round_dp(2),
        },
        prev_annual_summary: AnnualTotals {
            total_income: prev_annual.0.round_dp(2),
            total_expenses: prev_annual.1.round_dp(2),
            net: (prev_annual.0 - prev_annual.1).round_dp(2),
        },
        t776_summary,
        monthly_data: monthly
            .into_iter()
            .map(|(month, (income, expenses))| MonthlyTotals {
                month,
                income: income.round_dp(2),
                expenses: expenses.round_dp(2),
                net: (income - expenses).round_dp(2),
            })
            .collect(),
        category_breakdown,
    }
}

fn empty_summary(year: i32, prev_year: i32) -> TaxSummary {
    let zeros = || AnnualTotals {
        total_income: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        net: Decimal::ZERO,
    };
    TaxSummary {
        year,
        prev_year,
        annual_summary: zeros(),
        prev_annual_summary: zeros(),
        t776_summary: Vec::new(),
        monthly_data: Vec::new(),
        category_breakdown: Vec::new(),
    }
}
