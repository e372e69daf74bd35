//! Error types for query execution.

use thiserror::Error;

/// Result type alias using our QueryError
pub type Result<T> = std::result::Result<T, QueryError>;

/// Query execution errors
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error from tern-db-core (cancellation, fuel, I/O)
    #[error(transparent)]
    Core(#[from] tern_db_core::Error),

    /// Plan-shape violation; indicates a programming error in the planner
    #[error("check failed: {0}")]
    Check(String),
}

impl QueryError {
    /// Create a plan-shape check error
    pub fn check(msg: impl Into<String>) -> Self {
        QueryError::Check(msg.into())
    }
}
