//! Parse errors surfaced by the AST rewrite passes.
//!
//! These abort the parse with a message carrying the offending fragment;
//! nothing here is recovered locally.

use thiserror::Error;

/// Result type alias using our ParseError
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors from prefix expansion and alias parsing
#[derive(Error, Debug)]
pub enum ParseError {
    /// Langtagged predicate without the closing delimiter
    #[error("langtagged predicates must have the form @lang@Predicate; second @ is missing in {0}")]
    MissingLangtagDelimiter(String),

    /// Alias without a space-surrounded `as` keyword
    #[error("alias ({0}) is malformed: keyword 'as' is missing or not surrounded by spaces")]
    MissingAsKeyword(String),

    /// Alias without an input variable
    #[error("alias ({0}) is malformed: no input variable given (e.g. COUNT(?a))")]
    MissingInputVariable(String),

    /// Alias head is not a recognized aggregate
    #[error("unknown or malformed alias: ({0})")]
    UnknownAlias(String),

    /// Two different aliases target the same output variable
    #[error("two aliases try to bind values to the variable {0}")]
    ConflictingAlias(String),

    /// Error from tern-db-core (cancellation during expansion)
    #[error(transparent)]
    Core(#[from] tern_db_core::Error),
}
