//! # tern-db-query
//!
//! Physical operators for tern-db.
//!
//! Operators form a tree of shared [`ExecutionTree`] handles; each operator
//! materializes its whole result as an id table and results are cached per
//! tree, so a sub-plan referenced by several parents is computed once.
//!
//! The centerpiece is the [`TransitivePath`] operator, which evaluates
//! fixed-, bounded-, and unbounded-length path expressions over a two-column
//! step relation, optionally constrained on either endpoint by a constant or
//! a bound sub-result.

pub mod context;
pub mod error;
pub mod operator;
pub mod transitive_path;
pub mod values;

pub use context::{ExecutionContext, DEFAULT_TEXT_LIMIT};
pub use error::{QueryError, Result};
pub use operator::{ExecutionTree, Operation};
pub use transitive_path::{PathEnd, TransitivePath};
pub use values::ValuesOperation;
