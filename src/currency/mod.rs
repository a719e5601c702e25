//! Currency metadata, exchange-rate bookkeeping, and display formatting.
//!
//! Every stored amount is denominated in [`BASE_CURRENCY`]; conversion to the
//! selected display currency happens only at render time.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// The currency every stored amount is denominated in.
pub const BASE_CURRENCY: &str = "USD";

/// Display metadata for a supported currency.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyMeta {
    pub symbol: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

/// Metadata for the currencies the tracker ships with.
pub static CURRENCY_META: Lazy<BTreeMap<&'static str, CurrencyMeta>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "USD",
            CurrencyMeta {
                symbol: "$",
                name: "US Dollar",
                flag: "🇺🇸",
            },
        ),
        (
            "KES",
            CurrencyMeta {
                symbol: "KSh",
                name: "Kenyan Shilling",
                flag: "🇰🇪",
            },
        ),
        (
            "EUR",
            CurrencyMeta {
                symbol: "€",
                name: "Euro",
                flag: "🇪🇺",
            },
        ),
        (
            "GBP",
            CurrencyMeta {
                symbol: "£",
                name: "British Pound",
                flag: "🇬🇧",
            },
        ),
    ])
});

pub fn meta_for(code: &str) -> Option<&'static CurrencyMeta> {
    CURRENCY_META.get(code)
}

/// Units of each currency per one unit of the base currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        let mut table = Self::new();
        table.rates.insert(BASE_CURRENCY.into(), 1.00);
        table.rates.insert("KES".into(), 129.50);
        table.rates.insert("EUR".into(), 0.92);
        table.rates.insert("GBP".into(), 0.78);
        table
    }
}

impl RateTable {
    /// Creates an empty table; unknown codes resolve to a rate of 1.
    pub fn new() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Stored rate for `code`, or 1 when the code is absent.
    pub fn rate_for(&self, code: &str) -> f64 {
        self.rates.get(code).copied().unwrap_or(1.0)
    }

    pub fn rates(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// Stores a manually entered rate. The base currency cannot be changed.
    pub fn set(&mut self, code: impl Into<String>, rate: f64) -> Result<(), TrackerError> {
        let code = code.into().to_uppercase();
        if code == BASE_CURRENCY {
            return Err(TrackerError::BaseRateFixed);
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(TrackerError::InvalidRate { code, rate });
        }
        self.rates.insert(code, rate);
        Ok(())
    }

    /// Merges freshly fetched rates into the table.
    ///
    /// Positive fetched rates overwrite or add their codes, codes absent from
    /// the fetch keep their previous value, and the base currency is pinned
    /// back to exactly 1. Returns how many stored rates changed.
    pub fn apply_refresh<I>(&mut self, fetched: I) -> usize
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut changed = 0;
        for (code, rate) in fetched {
            if !rate.is_finite() || rate <= 0.0 {
                continue;
            }
            let code = code.to_uppercase();
            if code == BASE_CURRENCY {
                continue;
            }
            if self.rates.get(&code) != Some(&rate) {
                self.rates.insert(code, rate);
                changed += 1;
            }
        }
        let previous_base = self.rates.insert(BASE_CURRENCY.into(), 1.0);
        if matches!(previous_base, Some(rate) if rate != 1.0) {
            changed += 1;
        }
        if changed > 0 {
            tracing::debug!(changed, "exchange rates refreshed");
        }
        changed
    }

    /// Parses a fetched `{"rates": {code: rate, ...}}` payload and merges it.
    pub fn apply_refresh_json(&mut self, payload: &str) -> Result<usize, TrackerError> {
        let parsed: RatesPayload = serde_json::from_str(payload)?;
        Ok(self.apply_refresh(parsed.rates))
    }
}

#[derive(Debug, Deserialize)]
struct RatesPayload {
    rates: BTreeMap<String, f64>,
}

/// The selected display currency and the rate table behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyPrefs {
    pub current: String,
    pub rates: RateTable,
}

impl Default for CurrencyPrefs {
    fn default() -> Self {
        Self {
            current: BASE_CURRENCY.into(),
            rates: RateTable::default(),
        }
    }
}

impl CurrencyPrefs {
    pub fn convert(&self, amount_base: f64) -> f64 {
        convert(amount_base, &self.rates, &self.current)
    }

    pub fn to_base(&self, amount_current: f64) -> f64 {
        to_base(amount_current, &self.rates, &self.current)
    }

    pub fn format(&self, amount_base: f64) -> String {
        format_amount(amount_base, &self.rates, &self.current)
    }
}

/// Converts a base-currency amount into the given display currency.
pub fn convert(amount_base: f64, rates: &RateTable, code: &str) -> f64 {
    amount_base * rates.rate_for(code)
}

/// Converts a display-currency amount back into the base currency.
pub fn to_base(amount_current: f64, rates: &RateTable, code: &str) -> f64 {
    amount_current / rates.rate_for(code)
}

/// Converts and renders an amount with the currency's symbol and two decimals.
///
/// Unknown codes fall back to the raw code in place of a symbol.
pub fn format_amount(amount_base: f64, rates: &RateTable, code: &str) -> String {
    let converted = convert(amount_base, rates, code);
    let symbol = meta_for(code).map(|meta| meta.symbol).unwrap_or(code);
    format!("{} {}", symbol, format_grouped(converted))
}

fn format_grouped(value: f64) -> String {
    let mut body = format!("{:.2}", value);
    if let Some(pos) = body.find('.') {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part);
        body = format!("{}{}", int_part, &body[pos..]);
    }
    body
}

fn insert_grouping(int_part: &mut String) {
    let mut cleaned = int_part.clone();
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        let grouped = group_digits(&cleaned);
        *int_part = format!("{}{}", sign, grouped);
    } else {
        *int_part = group_digits(&cleaned);
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
