//! Pure aggregation over transaction collections.
//!
//! Every function takes its reference date as an explicit parameter; nothing
//! here reads the wall clock. [`crate::store::Tracker`] provides the
//! now-defaulting conveniences.

pub mod buckets;

pub use buckets::{group_all_time, group_current, iso_week_key, month_key, Period};

use std::cmp::Ordering;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::store::Transaction;

/// Summary statistics computed from a transaction collection at call time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSnapshot {
    pub count: usize,
    pub total: f64,
    pub last7_total: f64,
    pub last30_total: f64,
    pub avg_transaction: f64,
    /// Per-category sums in first-encounter order.
    pub category_totals: Vec<(String, f64)>,
    /// January through December of the reference date's year.
    pub monthly_totals: [f64; 12],
    /// `"N/A"` when the collection is empty.
    pub top_category: String,
}

/// Computes the dashboard snapshot relative to `today`.
///
/// Trailing windows include every transaction dated on or after the cutoff.
/// Ties for the top category resolve to the earliest category logged.
pub fn calculate_stats(transactions: &[Transaction], today: NaiveDate) -> StatsSnapshot {
    let total: f64 = transactions.iter().map(|txn| txn.amount).sum();

    let cutoff7 = today - Duration::days(7);
    let last7_total: f64 = transactions
        .iter()
        .filter(|txn| txn.date >= cutoff7)
        .map(|txn| txn.amount)
        .sum();

    let cutoff30 = today - Duration::days(30);
    let last30_total: f64 = transactions
        .iter()
        .filter(|txn| txn.date >= cutoff30)
        .map(|txn| txn.amount)
        .sum();

    let mut category_totals: Vec<(String, f64)> = Vec::new();
    for txn in transactions {
        match category_totals
            .iter_mut()
            .find(|(category, _)| *category == txn.category)
        {
            Some((_, sum)) => *sum += txn.amount,
            None => category_totals.push((txn.category.clone(), txn.amount)),
        }
    }

    let mut monthly_totals = [0.0; 12];
    for txn in transactions {
        if txn.date.year() == today.year() {
            monthly_totals[txn.date.month0() as usize] += txn.amount;
        }
    }

    let mut ranked: Vec<&(String, f64)> = category_totals.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let top_category = ranked
        .first()
        .map(|(category, _)| category.clone())
        .unwrap_or_else(|| "N/A".to_string());

    let count = transactions.len();
    let avg_transaction = if count > 0 { total / count as f64 } else { 0.0 };

    StatsSnapshot {
        count,
        total,
        last7_total,
        last30_total,
        avg_transaction,
        category_totals,
        monthly_totals,
        top_category,
    }
}

/// One month of the dashboard carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthSpend {
    /// Human label, e.g. `"Jan 2026"`.
    pub label: String,
    pub spending: f64,
    /// Zero-padded `"YYYY-MM"` key for exact-month filtering.
    pub month_key: String,
}

/// Spending for the six months before `today`'s month plus the current month,
/// oldest first. Always exactly seven entries.
pub fn monthly_spend_last_six_months(
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<MonthSpend> {
    (0..=6i32)
        .rev()
        .map(|offset| {
            let start = buckets::shift_month_start(today, -offset);
            let spending = transactions
                .iter()
                .filter(|txn| {
                    txn.date.year() == start.year() && txn.date.month() == start.month()
                })
                .map(|txn| txn.amount)
                .sum();
            MonthSpend {
                label: format!("{} {}", buckets::month_label(start.month()), start.year()),
                spending,
                month_key: month_key(start),
            }
        })
        .collect()
}
