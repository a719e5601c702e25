use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Category labels seeded into a fresh budget book.
pub const STANDARD_CATEGORIES: [&str; 10] = [
    "Education",
    "Housing",
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Health",
    "Shopping",
    "Travel",
    "Other",
];

/// Drift tolerated between the cap and the category sum before the cap snaps.
const CAP_DRIFT_TOLERANCE: f64 = 0.01;

/// Per-category budgets plus the derived overall monthly cap.
///
/// The cap must equal the sum of the category budgets; [`BudgetBook::reconcile`]
/// restores the invariant after either side is edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetBook {
    #[serde(default)]
    pub categories: BTreeMap<String, f64>,
    #[serde(default)]
    pub cap: f64,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A book holding every standard category at zero.
    pub fn with_standard_categories() -> Self {
        let categories = STANDARD_CATEGORIES
            .iter()
            .map(|label| (label.to_string(), 0.0))
            .collect();
        Self {
            categories,
            cap: 0.0,
        }
    }

    pub fn category(&self, label: &str) -> f64 {
        self.categories.get(label).copied().unwrap_or(0.0)
    }

    pub fn budgeted_total(&self) -> f64 {
        self.categories.values().sum()
    }

    /// Stores a category budget and re-derives the cap.
    pub fn set_category(&mut self, label: impl Into<String>, amount: f64) -> bool {
        self.categories.insert(label.into(), amount);
        self.reconcile()
    }

    /// Stores the cap, which the next reconciliation may snap back.
    pub fn set_cap(&mut self, amount: f64) -> bool {
        self.cap = amount;
        self.reconcile()
    }

    /// Snaps the cap to the category sum when the two drift apart.
    /// Returns whether the cap moved.
    pub fn reconcile(&mut self) -> bool {
        let budgeted = self.budgeted_total();
        if (budgeted - self.cap).abs() > CAP_DRIFT_TOLERANCE {
            tracing::debug!(from = self.cap, to = budgeted, "budget cap reconciled");
            self.cap = budgeted;
            true
        } else {
            false
        }
    }
}

/// Current-month spend measured against the overall cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CapStatus {
    Unset,
    Over { by: f64 },
    Within { remaining: f64 },
}

impl CapStatus {
    pub fn from_parts(cap: f64, month_spend: f64) -> Self {
        if cap == 0.0 {
            return CapStatus::Unset;
        }
        let diff = cap - month_spend;
        if diff < 0.0 {
            CapStatus::Over { by: -diff }
        } else {
            CapStatus::Within { remaining: diff }
        }
    }
}

/// Sum of amounts dated in the same calendar month as `today`.
pub fn month_spend(transactions: &[Transaction], today: NaiveDate) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.date.year() == today.year() && txn.date.month() == today.month())
        .map(|txn| txn.amount)
        .sum()
}

/// One row of a budget-versus-actual comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryComparison {
    pub category: String,
    pub budgeted: f64,
    pub actual: f64,
    pub over_budget: bool,
}

/// Pairs every budgeted category with its actual spend, then appends
/// categories that were spent against without a budget.
pub fn compare_with_actuals(
    book: &BudgetBook,
    actuals: &[(String, f64)],
) -> Vec<CategoryComparison> {
    let mut rows: Vec<CategoryComparison> = book
        .categories
        .iter()
        .map(|(label, budgeted)| {
            let actual = actuals
                .iter()
                .find(|(category, _)| category == label)
                .map(|(_, amount)| *amount)
                .unwrap_or(0.0);
            CategoryComparison {
                category: label.clone(),
                budgeted: *budgeted,
                actual,
                over_budget: actual > *budgeted && *budgeted > 0.0,
            }
        })
        .collect();
    for (category, actual) in actuals {
        if !book.categories.contains_key(category) {
            rows.push(CategoryComparison {
                category: category.clone(),
                budgeted: 0.0,
                actual: *actual,
                over_budget: false,
            });
        }
    }
    rows
}
