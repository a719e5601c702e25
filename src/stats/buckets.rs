//! Time-period bucketing and the date-key helpers shared across reports.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;
use crate::store::Transaction;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A reporting period for the trend views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = TrackerError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(TrackerError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Sums transactions inside the current instance of `period`, bucketed by
/// sub-period in natural order. Only non-empty buckets appear.
///
/// The current week is the trailing seven days ending at `today`, so a bucket
/// can combine today with the same weekday one week earlier.
pub fn group_current(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<(String, f64)> {
    let mut buckets: Vec<(String, f64)> = Vec::new();
    for txn in transactions {
        let in_window = match period {
            Period::Day => txn.date == today,
            Period::Week => txn.date >= today - Duration::days(7) && txn.date <= today,
            Period::Month => {
                txn.date.year() == today.year() && txn.date.month() == today.month()
            }
            Period::Year => txn.date.year() == today.year(),
        };
        if !in_window {
            continue;
        }
        let key = match period {
            Period::Day => hour_label(txn.date),
            Period::Week => weekday_label(txn.date.weekday()).to_string(),
            Period::Month => txn.date.day().to_string(),
            Period::Year => month_label(txn.date.month()).to_string(),
        };
        accumulate(&mut buckets, key, txn.amount);
    }

    match period {
        Period::Day => buckets.sort_by(|a, b| a.0.cmp(&b.0)),
        Period::Week => buckets.sort_by_key(|(label, _)| weekday_position(label)),
        Period::Month => buckets.sort_by_key(|(label, _)| label.parse::<u32>().unwrap_or(0)),
        Period::Year => buckets.sort_by_key(|(label, _)| month_position(label)),
    }
    buckets
}

/// Sums the entire collection into per-period keys, ascending.
///
/// Keys are zero padded, so lexical order is chronological order.
pub fn group_all_time(transactions: &[Transaction], period: Period) -> Vec<(String, f64)> {
    let mut buckets: Vec<(String, f64)> = Vec::new();
    for txn in transactions {
        let key = match period {
            Period::Day => txn.date.format("%Y-%m-%d").to_string(),
            Period::Week => iso_week_key(txn.date),
            Period::Month => month_key(txn.date),
            Period::Year => txn.date.year().to_string(),
        };
        accumulate(&mut buckets, key, txn.amount);
    }
    buckets.sort_by(|a, b| a.0.cmp(&b.0));
    buckets
}

fn accumulate(buckets: &mut Vec<(String, f64)>, key: String, amount: f64) {
    match buckets.iter_mut().find(|(label, _)| *label == key) {
        Some((_, sum)) => *sum += amount,
        None => buckets.push((key, amount)),
    }
}

/// Zero-padded `"YYYY-MM"` key used for exact-month filtering.
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// ISO 8601 `"YYYY-Www"` key: Monday-anchored weeks, the week holding the
/// year's first Thursday is week 1, and the year is the ISO week-based year.
pub fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// First day of the month `months` away from `date`'s month.
pub(crate) fn shift_month_start(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap()
}

pub(crate) fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.num_days_from_sunday() as usize]
}

// Transactions carry dates without a time component, so every record sits at
// its date's midnight instant.
fn hour_label(date: NaiveDate) -> String {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    format!("{:02}:00", midnight.hour())
}

fn weekday_position(label: &str) -> usize {
    WEEKDAY_LABELS
        .iter()
        .position(|&day| day == label)
        .unwrap_or(WEEKDAY_LABELS.len())
}

fn month_position(label: &str) -> usize {
    MONTH_LABELS
        .iter()
        .position(|&month| month == label)
        .unwrap_or(MONTH_LABELS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(amount: f64, date: NaiveDate) -> Transaction {
        Transaction::new("Test entry", amount, "Food", date)
    }

    #[test]
    fn period_parses_lowercase_tokens() {
        assert_eq!("day".parse::<Period>().unwrap(), Period::Day);
        assert_eq!("year".parse::<Period>().unwrap(), Period::Year);
        let err = "fortnight".parse::<Period>().expect_err("unknown token");
        assert!(matches!(err, TrackerError::UnknownPeriod(token) if token == "fortnight"));
    }

    #[test]
    fn current_day_buckets_at_midnight() {
        let today = sample_date(2026, 3, 18);
        let transactions = vec![
            entry(10.0, today),
            entry(15.0, today),
            entry(99.0, sample_date(2026, 3, 17)),
        ];
        let buckets = group_current(&transactions, Period::Day, today);
        assert_eq!(buckets, vec![("00:00".to_string(), 25.0)]);
    }

    #[test]
    fn current_week_spans_trailing_seven_days() {
        // 2026-03-18 is a Wednesday; so is 2026-03-11, exactly a week back.
        let today = sample_date(2026, 3, 18);
        let transactions = vec![
            entry(10.0, today),
            entry(20.0, sample_date(2026, 3, 11)),
            entry(40.0, sample_date(2026, 3, 10)),
            entry(5.0, sample_date(2026, 3, 15)),
        ];
        let buckets = group_current(&transactions, Period::Week, today);
        assert_eq!(
            buckets,
            vec![("Sun".to_string(), 5.0), ("Wed".to_string(), 30.0)]
        );
    }

    #[test]
    fn current_month_buckets_sort_numerically() {
        let today = sample_date(2026, 3, 18);
        let transactions = vec![
            entry(1.0, sample_date(2026, 3, 10)),
            entry(2.0, sample_date(2026, 3, 2)),
            entry(4.0, sample_date(2026, 2, 28)),
        ];
        let buckets = group_current(&transactions, Period::Month, today);
        assert_eq!(
            buckets,
            vec![("2".to_string(), 2.0), ("10".to_string(), 1.0)]
        );
    }

    #[test]
    fn current_year_buckets_in_calendar_order() {
        let today = sample_date(2026, 6, 1);
        let transactions = vec![
            entry(30.0, sample_date(2026, 5, 4)),
            entry(10.0, sample_date(2026, 1, 20)),
            entry(99.0, sample_date(2025, 12, 31)),
        ];
        let buckets = group_current(&transactions, Period::Year, today);
        assert_eq!(
            buckets,
            vec![("Jan".to_string(), 10.0), ("May".to_string(), 30.0)]
        );
    }

    #[test]
    fn all_time_month_keys_ascend() {
        let transactions = vec![
            entry(20.0, sample_date(2024, 2, 20)),
            entry(10.0, sample_date(2024, 1, 15)),
        ];
        let buckets = group_all_time(&transactions, Period::Month);
        assert_eq!(
            buckets,
            vec![
                ("2024-01".to_string(), 10.0),
                ("2024-02".to_string(), 20.0)
            ]
        );
    }

    #[test]
    fn all_time_week_keys_use_the_iso_year() {
        assert_eq!(iso_week_key(sample_date(2024, 1, 15)), "2024-W03");
        // The last Monday of 2025 belongs to ISO week 1 of 2026.
        assert_eq!(iso_week_key(sample_date(2025, 12, 29)), "2026-W01");

        let transactions = vec![
            entry(10.0, sample_date(2025, 12, 29)),
            entry(20.0, sample_date(2026, 1, 2)),
        ];
        let buckets = group_all_time(&transactions, Period::Week);
        assert_eq!(buckets, vec![("2026-W01".to_string(), 30.0)]);
    }

    #[test]
    fn all_time_day_and_year_keys() {
        let transactions = vec![
            entry(10.0, sample_date(2025, 12, 31)),
            entry(20.0, sample_date(2026, 1, 1)),
            entry(40.0, sample_date(2026, 1, 1)),
        ];
        let by_day = group_all_time(&transactions, Period::Day);
        assert_eq!(
            by_day,
            vec![
                ("2025-12-31".to_string(), 10.0),
                ("2026-01-01".to_string(), 60.0)
            ]
        );
        let by_year = group_all_time(&transactions, Period::Year);
        assert_eq!(
            by_year,
            vec![("2025".to_string(), 10.0), ("2026".to_string(), 60.0)]
        );
    }

    #[test]
    fn month_shift_rolls_across_year_boundaries() {
        assert_eq!(
            shift_month_start(sample_date(2026, 2, 15), -3),
            sample_date(2025, 11, 1)
        );
        assert_eq!(
            shift_month_start(sample_date(2025, 11, 30), 2),
            sample_date(2026, 1, 1)
        );
    }
}
