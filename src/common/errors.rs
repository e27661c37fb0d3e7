//! Error types for the backtest engine

use thiserror::Error;

/// Result type alias using our BacktestError
pub type Result<T> = std::result::Result<T, BacktestError>;

/// Main error type for backtest operations
#[derive(Error, Debug)]
pub enum BacktestError {
    /// Strategy/engine configuration errors (fatal at construction)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed order intent (non-positive quantity or price).
    /// Recoverable: the order is dropped and recorded, the tick continues.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Malformed tick (non-positive or non-finite price).
    /// Recoverable: only that tick's decision is aborted.
    #[error("Invalid tick: {0}")]
    InvalidTick(String),

    /// A run produced no history ("no data"). Distinct from a zero-return
    /// result: reporting must branch on this, never fabricate 0%.
    #[error("No history to report: the price feed produced no ticks")]
    EmptyHistory,

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl BacktestError {
    /// Whether this error aborts at most the current tick, not the run
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BacktestError::InvalidOrder(_) | BacktestError::InvalidTick(_)
        )
    }
}
