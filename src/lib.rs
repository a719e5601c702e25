#![doc(test(attr(deny(warnings))))]

//! Fintrack Core offers the transaction store, aggregation, charting, and
//! currency primitives that power a personal finance tracker's views.

pub mod chart;
pub mod currency;
pub mod errors;
pub mod stats;
pub mod store;
pub mod utils;

pub use chart::{cardinal_spline, ChartFrame, PieSlice, Point};
pub use currency::{CurrencyPrefs, RateTable, BASE_CURRENCY};
pub use errors::TrackerError;
pub use stats::{calculate_stats, MonthSpend, Period, StatsSnapshot};
pub use store::{BudgetBook, CapStatus, Tracker, Transaction, TransactionPatch};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
