//! The parsed-query root container and its rewrite passes.
//!
//! A [`ParsedQuery`] is produced by the grammar driver, mutated exactly twice
//! (prefix expansion, then alias parsing), and frozen. Both passes work on
//! the raw term strings; nothing here touches the vocabulary.

use super::pattern::{GraphPattern, GraphPatternOperation};
use super::path::PropertyPath;
use crate::error::{ParseError, Result};
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use std::fmt;
use tern_db_core::term;
use tern_db_core::Tracker;

/// The reserved internal prefix, implicitly declared in every query. An
/// explicit declaration of the same short name takes precedence.
pub const INTERNAL_PREFIX: &str = "ql";

/// Expansion of [`INTERNAL_PREFIX`].
pub const INTERNAL_PREFIX_IRI: &str = "<QLever-internal-function/>";

/// Predicates whose IRI contains this marker treat their object as a
/// space-separated term list. Deliberately a substring match; see
/// `expand_pattern`.
const IN_CONTEXT_MARKER: &str = "in-context";

/// Aggregate heads recognized in alias projections, lowercase.
const AGGREGATE_FUNCTIONS: [&str; 9] = [
    "count",
    "group_concat",
    "first",
    "last",
    "sample",
    "min",
    "max",
    "sum",
    "avg",
];

static BUILTIN_PREFIXES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from_iter([(INTERNAL_PREFIX, INTERNAL_PREFIX_IRI)]));

/// A PREFIX declaration. The stored IRI keeps its angle brackets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparqlPrefix {
    pub prefix: String,
    pub iri: String,
}

impl SparqlPrefix {
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

impl fmt::Display for SparqlPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: {}}}", self.prefix, self.iri)
    }
}

/// An ORDER BY key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderKey {
    pub key: String,
    pub desc: bool,
}

impl OrderKey {
    pub fn new(key: impl Into<String>, desc: bool) -> Self {
        Self {
            key: key.into(),
            desc,
        }
    }
}

/// An aliased aggregate projection, parsed from a `(EXPR AS ?out)` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    /// Variable inside the aggregate's parentheses
    pub in_var: String,
    /// Variable the result is bound to
    pub out_var: String,
    /// The full alias text, kept verbatim for duplicate comparison
    pub function: String,
    pub is_aggregate: bool,
}

/// Root of the parsed-query AST.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedQuery {
    pub prefixes: Vec<SparqlPrefix>,
    pub selected_variables: Vec<String>,
    pub aliases: Vec<Alias>,
    pub root: GraphPattern,
    pub order_by: Vec<OrderKey>,
    /// Limits and offset as written; empty string = not specified.
    pub limit: String,
    pub text_limit: String,
    pub offset: String,
    pub distinct: bool,
    pub reduced: bool,
}

impl ParsedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every abbreviated term in the pattern tree using the declared
    /// prefixes plus the implicit [`INTERNAL_PREFIX`]. Sub-selects inherit
    /// the outer prefix list by copy and expand on their own.
    ///
    /// `tracker` is checked once per visited pattern so the surrounding
    /// engine can abort a runaway expansion.
    pub fn expand_prefixes(&mut self, tracker: &Tracker) -> Result<()> {
        let mut prefix_map: HashMap<String, String> = BUILTIN_PREFIXES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for p in &self.prefixes {
            prefix_map.insert(p.prefix.clone(), p.iri.clone());
        }
        let outer_prefixes = self.prefixes.clone();
        expand_pattern(&mut self.root, &prefix_map, &outer_prefixes, tracker)
    }

    /// Parse `( ... )` projection entries into [`Alias`] records, replacing
    /// each entry (and each parenthesized ORDER BY key) with the alias
    /// output variable.
    pub fn parse_aliases(&mut self) -> Result<()> {
        for i in 0..self.selected_variables.len() {
            if self.selected_variables[i].starts_with('(') {
                let var = self.selected_variables[i].clone();
                let inner = strip_outer_parens(&var);
                self.selected_variables[i] = self.parse_alias(inner)?;
            }
        }
        for i in 0..self.order_by.len() {
            if self.order_by[i].key.starts_with('(') {
                let key = self.order_by[i].key.clone();
                // Keep the sort direction, only the key name changes.
                self.order_by[i].key = self.parse_alias(strip_outer_parens(&key))?;
            }
        }
        Ok(())
    }

    /// Assign pattern ids; see [`GraphPattern::recompute_ids`].
    pub fn recompute_ids(&mut self) {
        self.root.recompute_ids();
    }

    fn parse_alias(&mut self, alias: &str) -> Result<String> {
        let lower = alias.to_lowercase();
        if !AGGREGATE_FUNCTIONS
            .iter()
            .any(|head| lower.starts_with(head))
        {
            return Err(ParseError::UnknownAlias(alias.to_string()));
        }
        let as_pos = lower
            .find(" as ")
            .ok_or_else(|| ParseError::MissingAsKeyword(alias.to_string()))?;
        let out_var = alias
            .get(as_pos + " as ".len()..)
            .ok_or_else(|| ParseError::MissingAsKeyword(alias.to_string()))?
            .trim_matches(|c: char| c == ' ' || c == '\t' || c == '\n')
            .to_string();

        // Input variable: the token after the aggregate's opening paren,
        // with an optional DISTINCT in front.
        let bytes = alias.as_bytes();
        let mut pos = match alias[1..].find('(') {
            Some(p) => p + 2,
            None => return Err(ParseError::MissingInputVariable(alias.to_string())),
        };
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if alias
            .get(pos..pos + 8)
            .is_some_and(|s| s.eq_ignore_ascii_case("distinct"))
        {
            pos += 8;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
        }
        let start = pos;
        while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos == start || pos >= alias.len() {
            return Err(ParseError::MissingInputVariable(alias.to_string()));
        }
        // The scanned token carries the closing paren; drop it.
        let in_var = alias.get(start..pos - 1).unwrap_or_default().to_string();

        let candidate = Alias {
            in_var,
            out_var: out_var.clone(),
            function: alias.to_string(),
            is_aggregate: true,
        };
        for other in &self.aliases {
            if other.out_var == candidate.out_var {
                if other.is_aggregate != candidate.is_aggregate
                    || other.function != candidate.function
                {
                    return Err(ParseError::ConflictingAlias(candidate.out_var));
                }
                // Same alias spelled twice; keep the first record.
                return Ok(out_var);
            }
        }
        self.aliases.push(candidate);
        Ok(out_var)
    }
}

/// Drop the leading and trailing bracket of an alias entry.
fn strip_outer_parens(entry: &str) -> &str {
    entry
        .get(1..entry.len().saturating_sub(1))
        .unwrap_or_default()
}

fn expand_pattern(
    pattern: &mut GraphPattern,
    prefix_map: &HashMap<String, String>,
    outer_prefixes: &[SparqlPrefix],
    tracker: &Tracker,
) -> Result<()> {
    tracker.check()?;
    for triple in &mut pattern.triples {
        expand_term(&mut triple.s, prefix_map)?;
        triple
            .p
            .try_for_each_iri_mut(&mut |iri| expand_term(iri, prefix_map))?;
        // Substring match by design: any predicate mentioning the marker
        // splits its object into independently expanded terms.
        let in_context =
            matches!(&triple.p, PropertyPath::Iri(iri) if iri.contains(IN_CONTEXT_MARKER));
        if in_context {
            let mut tokens: Vec<String> = triple.o.split(' ').map(str::to_string).collect();
            for token in &mut tokens {
                expand_term(token, prefix_map)?;
            }
            triple.o = tokens.join(" ");
        } else {
            expand_term(&mut triple.o, prefix_map)?;
        }
    }
    for filter in &mut pattern.filters {
        expand_term(&mut filter.lhs, prefix_map)?;
        expand_term(&mut filter.rhs, prefix_map)?;
    }
    for child in &mut pattern.children {
        match child {
            GraphPatternOperation::Optional { pattern } => {
                expand_pattern(pattern, prefix_map, outer_prefixes, tracker)?;
            }
            GraphPatternOperation::Union { left, right } => {
                expand_pattern(left, prefix_map, outer_prefixes, tracker)?;
                expand_pattern(right, prefix_map, outer_prefixes, tracker)?;
            }
            GraphPatternOperation::TransPath { pattern, .. } => {
                expand_pattern(pattern, prefix_map, outer_prefixes, tracker)?;
            }
            GraphPatternOperation::Subquery { query } => {
                query.prefixes = outer_prefixes.to_vec();
                query.expand_prefixes(tracker)?;
            }
        }
    }
    Ok(())
}

/// Expand a single term in place.
///
/// Variables (`?`) and absolute IRIs (`<`) pass through. A leading
/// `@lang@` is peeled off first and re-applied as the canonical
/// language-tagged predicate form after expansion. The prefix is the text
/// between an optional `^^` marker and the following `:`; on a match the
/// declared IRI (minus its closing `>`) absorbs the local part.
fn expand_term(item: &mut String, prefix_map: &HashMap<String, String>) -> Result<()> {
    if item.starts_with('?') || item.starts_with('<') {
        return Ok(());
    }
    let mut langtag = None;
    if item.starts_with('@') {
        let Some(second) = item[1..].find('@') else {
            return Err(ParseError::MissingLangtagDelimiter(item.clone()));
        };
        langtag = Some(item[1..second + 1].to_string());
        *item = item[second + 2..].to_string();
    }
    let from = item.find("^^").map(|pos| pos + 2).unwrap_or(0);
    if let Some(colon) = item[from..].find(':').map(|pos| pos + from) {
        if let Some(prefix_iri) = prefix_map.get(&item[from..colon]) {
            let base = prefix_iri.strip_suffix('>').unwrap_or(prefix_iri);
            let mut expanded =
                String::with_capacity(from + base.len() + (item.len() - colon));
            expanded.push_str(&item[..from]);
            expanded.push_str(base);
            expanded.push_str(&item[colon + 1..]);
            expanded.push('>');
            *item = expanded;
        }
    }
    if let Some(lang) = langtag {
        *item = term::language_tagged_predicate(item, &lang);
    }
    Ok(())
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PREFIX: {{")?;
        for (i, prefix) in self.prefixes.iter().enumerate() {
            let sep = if i + 1 < self.prefixes.len() { "," } else { "" };
            write!(f, "\n\t{prefix}{sep}")?;
        }
        write!(f, "\n}}")?;

        write!(f, "\nSELECT: {{\n\t")?;
        for (i, var) in self.selected_variables.iter().enumerate() {
            let sep = if i + 1 < self.selected_variables.len() {
                ", "
            } else {
                ""
            };
            write!(f, "{var}{sep}")?;
        }
        write!(f, "\n}}")?;

        writeln!(f, "\nWHERE: ")?;
        self.root.fmt_indented(f, 1)?;

        let or_unspecified = |value: &str, fallback: &str| -> String {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };
        write!(f, "\nLIMIT: {}", or_unspecified(&self.limit, "no limit specified"))?;
        write!(
            f,
            "\nTEXTLIMIT: {}",
            or_unspecified(&self.text_limit, "no limit specified")
        )?;
        write!(
            f,
            "\nOFFSET: {}",
            or_unspecified(&self.offset, "no offset specified")
        )?;
        write!(
            f,
            "\nDISTINCT modifier is {}present.",
            if self.distinct { "" } else { "not " }
        )?;
        write!(
            f,
            "\nREDUCED modifier is {}present.",
            if self.reduced { "" } else { "not " }
        )?;
        write!(f, "\nORDER BY: ")?;
        if self.order_by.is_empty() {
            write!(f, "not specified")?;
        } else {
            for key in &self.order_by {
                write!(f, "{}{}\t", key.key, if key.desc { " (DESC)" } else { " (ASC)" })?;
            }
        }
        writeln!(f)
    }
}
