//! Parsed-query AST types.

pub mod path;
pub mod pattern;
pub mod query;

pub use path::PropertyPath;
pub use pattern::{FilterKind, GraphPattern, GraphPatternOperation, SparqlFilter, SparqlTriple};
pub use query::{
    Alias, OrderKey, ParsedQuery, SparqlPrefix, INTERNAL_PREFIX, INTERNAL_PREFIX_IRI,
};
