use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common tracker failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(Uuid),
    #[error("Invalid rate {rate} for {code}")]
    InvalidRate { code: String, rate: f64 },
    #[error("The base currency rate is fixed at 1")]
    BaseRateFixed,
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
