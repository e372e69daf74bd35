//! # tern-db-sparql
//!
//! The parsed SPARQL query representation for tern-db.
//!
//! This crate defines the AST produced by the grammar driver: prefix
//! declarations, projections with aliased aggregates, a graph-pattern tree
//! with filters, OPTIONAL, UNION, sub-selects and transitive-path
//! placeholders, and property paths in predicate position. It also owns the
//! two rewrite passes that run between parsing and planning:
//!
//! 1. **Prefix expansion** turns `short:local` forms (and `@lang@` tagged
//!    predicates) into absolute IRIs
//! 2. **Alias parsing** lifts `(AGG(?v) as ?out)` projection entries into
//!    [`Alias`] records and rewrites ORDER BY keys accordingly
//!
//! After those passes and [`ParsedQuery::recompute_ids`], the AST is frozen
//! and safe to share across threads.

pub mod ast;
pub mod error;

pub use ast::{
    Alias, FilterKind, GraphPattern, GraphPatternOperation, OrderKey, ParsedQuery, PropertyPath,
    SparqlFilter, SparqlPrefix, SparqlTriple, INTERNAL_PREFIX, INTERNAL_PREFIX_IRI,
};
pub use error::{ParseError, Result};
