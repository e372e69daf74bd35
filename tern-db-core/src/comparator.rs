//! Term collation for vocabulary order and range lookups.
//!
//! Two modes, selected per vocabulary instance (never process-wide):
//!
//! | Mode | Order |
//! |------|-------|
//! | plain | byte-lexicographic over the raw term strings |
//! | ignore-case | literals and non-literals kept disjoint (non-literals first), then lowercased value, then language tag, then original value |
//!
//! ## Strict Total Ordering
//!
//! Both modes are strict total orders. The ignore-case tie-breakers (langtag,
//! then the original value) exist precisely so that distinct strings never
//! compare equal; id assignment and binary search both rely on this.

use crate::term::find_literal_end;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Comparator over term surface forms.
///
/// The build side and the lookup side of a vocabulary must use the same
/// setting, otherwise ids and ranks disagree and range queries are garbage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermComparator {
    ignore_case: bool,
}

impl TermComparator {
    pub fn new(ignore_case: bool) -> Self {
        Self { ignore_case }
    }

    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Compare two terms under the active collation.
    pub fn cmp(&self, a: &str, b: &str) -> Ordering {
        if !self.ignore_case {
            return a.cmp(b);
        }
        let split_a = SplitTerm::extract(a);
        let split_b = SplitTerm::extract(b);
        if split_a.is_literal != split_b.is_literal {
            // Keep the two classes disjoint in the ordering, non-literals
            // (IRIs, blank nodes) first.
            return split_a.is_literal.cmp(&split_b.is_literal);
        }
        split_a
            .value
            .to_lowercase()
            .cmp(&split_b.value.to_lowercase())
            .then_with(|| split_a.langtag.cmp(split_b.langtag))
            .then_with(|| split_a.value.cmp(split_b.value))
    }

    /// `a < b` under the active collation.
    pub fn less(&self, a: &str, b: &str) -> bool {
        self.cmp(a, b) == Ordering::Less
    }
}

/// A term split into the pieces the ignore-case order compares.
struct SplitTerm<'a> {
    is_literal: bool,
    /// Inner value: the literal body without quotes, or the whole string for
    /// non-literals.
    value: &'a str,
    /// Suffix after the closing quote (includes the leading `@` of a
    /// langtag); empty for non-literals and unterminated literals.
    langtag: &'a str,
}

impl<'a> SplitTerm<'a> {
    fn extract(word: &'a str) -> Self {
        if let Some(body) = word.strip_prefix('"') {
            // Prefix filters may produce literals without the closing quote;
            // the whole remainder is the value then.
            match find_literal_end(body) {
                Some(end) => Self {
                    is_literal: true,
                    value: &body[..end],
                    langtag: &body[end + 1..],
                },
                None => Self {
                    is_literal: true,
                    value: body,
                    langtag: "",
                },
            }
        } else {
            Self {
                is_literal: false,
                value: word,
                langtag: "",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_is_byte_order() {
        let cmp = TermComparator::new(false);
        assert_eq!(cmp.cmp("ant", "bee"), Ordering::Less);
        assert_eq!(cmp.cmp("bee", "bee"), Ordering::Equal);
        // quote sorts before '<' in plain mode
        assert!(cmp.less("\"a\"", "<a>"));
    }

    #[test]
    fn ignore_case_sorts_classes_then_value_then_langtag() {
        let cmp = TermComparator::new(true);
        let mut words = vec![
            "\"banana\"@en".to_string(),
            "\"Apple\"".to_string(),
            "<http://a>".to_string(),
            "\"apple\"@de".to_string(),
            "\"apple\"@en".to_string(),
        ];
        words.sort_by(|a, b| cmp.cmp(a, b));
        assert_eq!(
            words,
            vec![
                "<http://a>",
                "\"Apple\"",
                "\"apple\"@de",
                "\"apple\"@en",
                "\"banana\"@en",
            ]
        );
    }

    #[test]
    fn ignore_case_is_strict() {
        let cmp = TermComparator::new(true);
        // Same lowercase value and langtag, different case: still ordered.
        assert_ne!(cmp.cmp("\"Apple\"@en", "\"apple\"@en"), Ordering::Equal);
        assert_eq!(cmp.cmp("\"apple\"@en", "\"apple\"@en"), Ordering::Equal);
    }

    #[test]
    fn unterminated_literal_compares_by_full_body() {
        let cmp = TermComparator::new(true);
        // "app (no closing quote) is a prefix of "apple"'s value
        assert!(cmp.less("\"app", "\"apple\""));
    }
}
