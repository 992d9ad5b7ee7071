use thiserror::Error;

/// Error type for the few faults the analytics crate can raise.
///
/// Missing data is never an error: an unknown rate or ETA is `None`.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown account: {0}")]
    UnknownAccount(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
