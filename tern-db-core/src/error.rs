//! Error types for tern-db-core.

use crate::tracking::FuelExceededError;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading or writing vocabulary files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violation; indicates a programming error
    #[error("check failed: {0}")]
    Check(String),

    /// Fuel budget exhausted during evaluation
    #[error(transparent)]
    FuelExceeded(#[from] FuelExceededError),

    /// Evaluation was cancelled cooperatively
    #[error("evaluation cancelled")]
    Cancelled,
}

impl Error {
    /// Create a check-failed error
    pub fn check(msg: impl Into<String>) -> Self {
        Error::Check(msg.into())
    }
}
