//! The owned in-memory store behind the tracker's views.

pub mod budget;
pub mod transaction;

pub use budget::{
    compare_with_actuals, month_spend, BudgetBook, CapStatus, CategoryComparison,
    STANDARD_CATEGORIES,
};
pub use transaction::{Transaction, TransactionPatch};

use std::cmp::Ordering;

use chrono::{Local, NaiveDate, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyPrefs;
use crate::errors::TrackerError;
use crate::stats::{calculate_stats, month_key, StatsSnapshot};

/// Sortable transaction columns.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Description,
    Category,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Builds the case-insensitive search filter.
///
/// Blank or invalid patterns return `None`, which matches everything.
pub fn compile_filter(input: &str) -> Option<Regex> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(trimmed)
        .case_insensitive(true)
        .build()
        .ok()
}

/// All tracker state: transactions, budgets, and currency preferences.
///
/// Owned by the caller and mutated only through the operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: BudgetBook,
    #[serde(default)]
    pub currency: CurrencyPrefs,
}

impl Tracker {
    /// A fresh tracker with the standard budget categories seeded at zero.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: BudgetBook::with_standard_categories(),
            currency: CurrencyPrefs::default(),
        }
    }

    /// Logs a new transaction and returns its identifier.
    pub fn add_transaction(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Uuid {
        let txn = Transaction::new(description, amount, category, date);
        let id = txn.id;
        self.transactions.push(txn);
        id
    }

    /// Applies the patch to the transaction identified by `id`.
    ///
    /// A patch with no fields set succeeds without touching the audit stamp.
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<(), TrackerError> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(TrackerError::UnknownTransaction(id))?;
        if !patch.has_effect() {
            return Ok(());
        }
        if let Some(description) = patch.description {
            txn.description = description;
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(category) = patch.category {
            txn.category = category;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        txn.updated_at = Utc::now();
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed record.
    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction, TrackerError> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(TrackerError::UnknownTransaction(id))?;
        Ok(self.transactions.remove(index))
    }

    /// Deletes every transaction and resets the cap. Category budgets stay.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.budgets.cap = 0.0;
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn set_category_budget(&mut self, label: impl Into<String>, amount: f64) {
        self.budgets.set_category(label, amount);
    }

    pub fn set_cap(&mut self, amount: f64) {
        self.budgets.set_cap(amount);
    }

    /// Selects the display currency. Unknown codes are allowed; they format
    /// with the raw code and an implicit rate of 1.
    pub fn set_display_currency(&mut self, code: impl Into<String>) {
        self.currency.current = code.into().to_uppercase();
    }

    pub fn set_rate(&mut self, code: impl Into<String>, rate: f64) -> Result<(), TrackerError> {
        self.currency.rates.set(code, rate)
    }

    /// Transactions dated in the given `"YYYY-MM"` month.
    pub fn transactions_in_month(&self, key: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| month_key(txn.date) == key)
            .collect()
    }

    /// Non-destructive sorted view. String columns compare case-insensitively.
    pub fn sorted(&self, field: SortField, order: SortOrder) -> Vec<&Transaction> {
        let mut view: Vec<&Transaction> = self.transactions.iter().collect();
        view.sort_by(|a, b| {
            let ordering = match field {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
                SortField::Description => a
                    .description
                    .to_lowercase()
                    .cmp(&b.description.to_lowercase()),
                SortField::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        view
    }

    /// Transactions whose description or category matches the filter.
    pub fn matching(&self, filter: Option<&Regex>) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| match filter {
                Some(re) => re.is_match(&txn.description) || re.is_match(&txn.category),
                None => true,
            })
            .collect()
    }

    pub fn stats_at(&self, today: NaiveDate) -> StatsSnapshot {
        calculate_stats(&self.transactions, today)
    }

    /// Snapshot relative to the local calendar date.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats_at(Local::now().date_naive())
    }

    pub fn cap_status_at(&self, today: NaiveDate) -> CapStatus {
        CapStatus::from_parts(self.budgets.cap, month_spend(&self.transactions, today))
    }

    /// Cap status relative to the local calendar date.
    pub fn cap_status(&self) -> CapStatus {
        self.cap_status_at(Local::now().date_naive())
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
