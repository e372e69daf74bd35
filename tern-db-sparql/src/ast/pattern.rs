//! Graph pattern tree: triples, filters, and child operations.
//!
//! A [`GraphPattern`] is the WHERE-clause building block. Its children are
//! tagged operations (OPTIONAL, UNION, sub-select, transitive path); every
//! subtree has a single owner and sub-selects carry an independent query with
//! their own prefix and id namespaces.

use super::path::PropertyPath;
use super::query::ParsedQuery;
use std::fmt;

/// A triple pattern. Subject and object are raw term strings (variables
/// included); the predicate is a property path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparqlTriple {
    pub s: String,
    pub p: PropertyPath,
    pub o: String,
}

impl SparqlTriple {
    pub fn new(s: impl Into<String>, p: PropertyPath, o: impl Into<String>) -> Self {
        Self {
            s: s.into(),
            p,
            o: o.into(),
        }
    }
}

impl fmt::Display for SparqlTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{s: {}, p: {}, o: {}}}", self.s, self.p, self.o)
    }
}

/// Comparison type of a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LangMatches,
    Prefix,
    Regex,
}

/// A FILTER constraint over two term strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparqlFilter {
    pub lhs: String,
    pub rhs: String,
    pub kind: FilterKind,
    pub regex_ignore_case: bool,
}

impl SparqlFilter {
    pub fn new(lhs: impl Into<String>, rhs: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            kind,
            regex_ignore_case: false,
        }
    }
}

impl fmt::Display for SparqlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FILTER({}", self.lhs)?;
        match self.kind {
            FilterKind::Eq => write!(f, " < ")?,
            FilterKind::Ne => write!(f, " != ")?,
            FilterKind::Lt => write!(f, " < ")?,
            FilterKind::Le => write!(f, " <= ")?,
            FilterKind::Gt => write!(f, " > ")?,
            FilterKind::Ge => write!(f, " >= ")?,
            FilterKind::LangMatches => write!(f, " LANG_MATCHES ")?,
            FilterKind::Prefix => write!(f, " PREFIX ")?,
            FilterKind::Regex => {
                write!(f, " REGEX ")?;
                if self.regex_ignore_case {
                    write!(f, "ignoring case ")?;
                }
            }
        }
        write!(f, "{})", self.rhs)
    }
}

/// A node of the graph-pattern tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphPattern {
    pub triples: Vec<SparqlTriple>,
    pub filters: Vec<SparqlFilter>,
    pub optional: bool,
    pub children: Vec<GraphPatternOperation>,
    /// Assigned by [`GraphPattern::recompute_ids`]; pre-order rank within
    /// the owning query.
    pub id: usize,
}

impl GraphPattern {
    pub fn new(optional: bool) -> Self {
        Self {
            optional,
            ..Self::default()
        }
    }

    /// Assign pattern ids in a single pre-order walk starting at zero.
    /// Sub-select patterns restart from zero: their ids live in their own
    /// query's namespace.
    pub fn recompute_ids(&mut self) {
        let mut counter = 0;
        self.assign_ids(&mut counter);
    }

    pub(crate) fn assign_ids(&mut self, counter: &mut usize) {
        self.id = *counter;
        *counter += 1;
        for child in &mut self.children {
            match child {
                GraphPatternOperation::Optional { pattern } => pattern.assign_ids(counter),
                GraphPatternOperation::Union { left, right } => {
                    left.assign_ids(counter);
                    right.assign_ids(counter);
                }
                GraphPatternOperation::TransPath { pattern, .. } => pattern.assign_ids(counter),
                GraphPatternOperation::Subquery { query } => {
                    // Own id space, own counter.
                    query.recompute_ids();
                }
            }
        }
    }

    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indentation: usize) -> fmt::Result {
        let pad = "  ".repeat(indentation);
        write!(f, "{}{{", "  ".repeat(indentation.saturating_sub(1)))?;
        for (i, triple) in self.triples.iter().enumerate() {
            let sep = if i + 1 < self.triples.len() { "," } else { "" };
            write!(f, "\n{pad}{triple}{sep}")?;
        }
        for (i, filter) in self.filters.iter().enumerate() {
            let sep = if i + 1 < self.filters.len() { "," } else { "" };
            write!(f, "\n{pad}{filter}{sep}")?;
        }
        for child in &self.children {
            writeln!(f)?;
            child.fmt_indented(f, indentation + 1)?;
        }
        write!(f, "\n{}}}", "  ".repeat(indentation.saturating_sub(1)))
    }
}

impl fmt::Display for GraphPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 1)
    }
}

/// A tagged child operation of a graph pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphPatternOperation {
    /// `OPTIONAL { ... }`
    Optional { pattern: GraphPattern },
    /// `{ ... } UNION { ... }`
    Union {
        left: GraphPattern,
        right: GraphPattern,
    },
    /// A sub-select with its own prefix and id namespace
    Subquery { query: Box<ParsedQuery> },
    /// Placeholder for a transitive-path operator: a path of `min..=max`
    /// steps of `pattern` connecting the `left` and `right` terms
    TransPath {
        left: String,
        right: String,
        min: usize,
        max: usize,
        pattern: GraphPattern,
    },
}

impl GraphPatternOperation {
    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indentation: usize) -> fmt::Result {
        write!(f, "{}", "  ".repeat(indentation.saturating_sub(1)))?;
        match self {
            GraphPatternOperation::Optional { pattern } => {
                write!(f, "OPTIONAL ")?;
                pattern.fmt_indented(f, indentation)
            }
            GraphPatternOperation::Union { left, right } => {
                left.fmt_indented(f, indentation)?;
                write!(f, " UNION ")?;
                right.fmt_indented(f, indentation)
            }
            GraphPatternOperation::Subquery { query } => write!(f, "{query}"),
            GraphPatternOperation::TransPath {
                left,
                right,
                min,
                max,
                pattern,
            } => {
                write!(
                    f,
                    "TRANS PATH from {left} to {right} with at least {min} and at most {max} steps of "
                )?;
                pattern.fmt_indented(f, indentation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(s: &str, p: &str, o: &str) -> SparqlTriple {
        SparqlTriple::new(s, PropertyPath::iri(p), o)
    }

    fn pattern_with(children: Vec<GraphPatternOperation>) -> GraphPattern {
        GraphPattern {
            children,
            ..GraphPattern::default()
        }
    }

    #[test]
    fn ids_are_assigned_pre_order() {
        let mut root = pattern_with(vec![
            GraphPatternOperation::Optional {
                pattern: GraphPattern::new(true),
            },
            GraphPatternOperation::Union {
                left: GraphPattern::default(),
                right: GraphPattern::default(),
            },
            GraphPatternOperation::TransPath {
                left: "?x".to_string(),
                right: "?y".to_string(),
                min: 1,
                max: 3,
                pattern: GraphPattern::default(),
            },
        ]);
        root.recompute_ids();
        assert_eq!(root.id, 0);
        let ids: Vec<usize> = root
            .children
            .iter()
            .flat_map(|child| match child {
                GraphPatternOperation::Optional { pattern } => vec![pattern.id],
                GraphPatternOperation::Union { left, right } => vec![left.id, right.id],
                GraphPatternOperation::TransPath { pattern, .. } => vec![pattern.id],
                GraphPatternOperation::Subquery { .. } => vec![],
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn subqueries_do_not_share_the_counter() {
        let mut sub = ParsedQuery::default();
        sub.root.children.push(GraphPatternOperation::Optional {
            pattern: GraphPattern::new(true),
        });
        let mut root = pattern_with(vec![
            GraphPatternOperation::Subquery {
                query: Box::new(sub),
            },
            GraphPatternOperation::Optional {
                pattern: GraphPattern::new(true),
            },
        ]);
        root.recompute_ids();
        assert_eq!(root.id, 0);
        let (sub_ids, outer_id) = match (&root.children[0], &root.children[1]) {
            (
                GraphPatternOperation::Subquery { query },
                GraphPatternOperation::Optional { pattern },
            ) => {
                let inner = match &query.root.children[0] {
                    GraphPatternOperation::Optional { pattern } => pattern.id,
                    _ => unreachable!(),
                };
                ((query.root.id, inner), pattern.id)
            }
            _ => unreachable!(),
        };
        // The subquery restarts at zero; the outer walk continues at 1.
        assert_eq!(sub_ids, (0, 1));
        assert_eq!(outer_id, 1);
    }

    #[test]
    fn id_assignment_is_deterministic() {
        let build = || {
            let mut root = pattern_with(vec![GraphPatternOperation::Union {
                left: pattern_with(vec![GraphPatternOperation::Optional {
                    pattern: GraphPattern::new(true),
                }]),
                right: GraphPattern::default(),
            }]);
            root.triples.push(triple("?x", "<p>", "?y"));
            root.recompute_ids();
            root
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn triple_and_filter_display() {
        assert_eq!(
            triple("?x", "<p>", "?y").to_string(),
            "{s: ?x, p: <p>, o: ?y}"
        );
        let mut filter = SparqlFilter::new("?x", "\"a\"", FilterKind::Regex);
        filter.regex_ignore_case = true;
        assert_eq!(filter.to_string(), "FILTER(?x REGEX ignoring case \"a\")");
        assert_eq!(
            SparqlFilter::new("?x", "?y", FilterKind::Le).to_string(),
            "FILTER(?x <= ?y)"
        );
        // Eq shares the Lt print form.
        assert_eq!(
            SparqlFilter::new("?x", "?y", FilterKind::Eq).to_string(),
            "FILTER(?x < ?y)"
        );
    }
}
