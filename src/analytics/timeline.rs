// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AnalyticsError;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("month regex"));

/// "YYYY-MM" key for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Strict month parse: exactly YYYY-MM with a real month number.
pub fn parse_month(s: &str) -> Result<(i32, u32), AnalyticsError> {
    if !MONTH_RE.is_match(s) {
        return Err(AnalyticsError::InvalidMonth(s.to_string()));
    }
    let (y, m) = s.split_at(4);
    let year: i32 = y
        .parse()
        .map_err(|_| AnalyticsError::InvalidMonth(s.to_string()))?;
    let month: u32 = m[1..]
        .parse()
        .map_err(|_| AnalyticsError::InvalidMonth(s.to_string()))?;
    if !(1..=12).contains(&month) {
        return Err(AnalyticsError::InvalidMonth(s.to_string()));
    }
    Ok((year, month))
}

/// The last `n` month keys ending at the reference month, oldest first.
/// Month arithmetic rolls back through year boundaries (month 0 of 2026 is
/// month 12 of 2025).
pub fn trailing_months(reference: NaiveDate, n: usize) -> Result<Vec<String>, AnalyticsError> {
    if n == 0 {
        return Err(AnalyticsError::InvalidWindow(n));
    }
    let mut out = Vec::with_capacity(n);
    for i in (0..n).rev() {
        let mut year = reference.year();
        let mut month = reference.month() as i32 - i as i32;
        while month <= 0 {
            month += 12;
            year -= 1;
        }
        out.push(format!("{:04}-{:02}", year, month));
    }
    Ok(out)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}
