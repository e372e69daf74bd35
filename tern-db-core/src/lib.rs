//! # tern-db-core
//!
//! Core types for the tern-db query engine.
//!
//! This crate provides:
//! - Dense term identifiers and id ranges (`Id`, `IdRange`, `ID_NO_VALUE`)
//! - Term collation (`TermComparator`, plain or case-insensitive)
//! - The sorted vocabulary with optional prefix compression and an
//!   externalized literal store
//! - Row-major id tables materialized by physical operators
//! - Cooperative cancellation and fuel accounting (`Tracker`)
//!
//! ## Design Principles
//!
//! 1. **Order is identity**: a word's id is its rank under the active
//!    collation; every range lookup depends on it
//! 2. **Immutable after build**: vocabularies and parsed queries are frozen
//!    once constructed, so concurrent readers need no synchronization
//! 3. **Per-instance collation**: the comparator is a field of each
//!    vocabulary, never process-wide state

pub mod comparator;
pub mod error;
pub mod external;
pub mod id_table;
pub mod ids;
mod records;
pub mod term;
pub mod tracking;
pub mod vocabulary;

pub use comparator::TermComparator;
pub use error::{Error, Result};
pub use external::ExternalVocabulary;
pub use id_table::IdTable;
pub use ids::{Id, IdRange, ID_NO_VALUE, PREFIX_CHAR};
pub use tracking::{FuelExceededError, Tracker, TrackingOptions};
pub use vocabulary::{Vocabulary, VocabularyOptions, NUM_COMPRESSION_PREFIXES};
