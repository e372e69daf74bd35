//! SPARQL property path AST.
//!
//! Property paths appear in the predicate position of a triple pattern.
//!
//! | Syntax | Variant | Description |
//! |--------|---------|-------------|
//! | `iri` | `Iri` | Direct predicate |
//! | `^p` | `Inverse` | Reverse direction |
//! | `p/q` | `Sequence` | Path then path |
//! | `p\|q` | `Alternative` | Either path |
//! | `p*` | `Transitive` | Any number of steps |
//! | `p+`, `p{n,}` | `TransitiveMin` | At least `min` steps |
//! | `p?`, `p{,n}` | `TransitiveMax` | At most `max` steps |

use std::fmt;

/// A property path expression.
///
/// The tree is immutable once the query is frozen; prefix expansion is the
/// single mutation pass and only rewrites `Iri` leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyPath {
    /// Simple predicate (an IRI)
    Iri(String),
    /// Sequence path: `left/right`
    Sequence(Box<PropertyPath>, Box<PropertyPath>),
    /// Alternative path: `left|right`
    Alternative(Box<PropertyPath>, Box<PropertyPath>),
    /// Inverse path: `^path`
    Inverse(Box<PropertyPath>),
    /// Unbounded repetition: `path*`
    Transitive(Box<PropertyPath>),
    /// Repetition with a lower bound; `path+` is `min == 1`
    TransitiveMin { min: u16, path: Box<PropertyPath> },
    /// Repetition with an upper bound; `path?` is `max == 1`
    TransitiveMax { max: u16, path: Box<PropertyPath> },
}

impl PropertyPath {
    /// Create a simple IRI path.
    pub fn iri(iri: impl Into<String>) -> Self {
        PropertyPath::Iri(iri.into())
    }

    /// Create a sequence path.
    pub fn sequence(left: PropertyPath, right: PropertyPath) -> Self {
        PropertyPath::Sequence(Box::new(left), Box::new(right))
    }

    /// Create an alternative path.
    pub fn alternative(left: PropertyPath, right: PropertyPath) -> Self {
        PropertyPath::Alternative(Box::new(left), Box::new(right))
    }

    /// Create an inverse path.
    pub fn inverse(path: PropertyPath) -> Self {
        PropertyPath::Inverse(Box::new(path))
    }

    /// Create an unbounded transitive path.
    pub fn transitive(path: PropertyPath) -> Self {
        PropertyPath::Transitive(Box::new(path))
    }

    /// Create a transitive path with a minimum step count.
    pub fn transitive_min(min: u16, path: PropertyPath) -> Self {
        PropertyPath::TransitiveMin {
            min,
            path: Box::new(path),
        }
    }

    /// Create a transitive path with a maximum step count.
    pub fn transitive_max(max: u16, path: PropertyPath) -> Self {
        PropertyPath::TransitiveMax {
            max,
            path: Box::new(path),
        }
    }

    /// The IRI text, if this is a simple predicate.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            PropertyPath::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Whether the path admits an empty match.
    ///
    /// True for `*`, for a bounded maximum, for a minimum of zero, and for
    /// inner nodes all of whose children admit one. A plain IRI never does.
    pub fn can_be_null(&self) -> bool {
        match self {
            PropertyPath::Iri(_) => false,
            PropertyPath::Sequence(left, right) | PropertyPath::Alternative(left, right) => {
                left.can_be_null() && right.can_be_null()
            }
            PropertyPath::Inverse(path) => path.can_be_null(),
            PropertyPath::Transitive(_) => true,
            PropertyPath::TransitiveMin { min, path } => *min == 0 || path.can_be_null(),
            PropertyPath::TransitiveMax { .. } => true,
        }
    }

    /// Apply `f` to every `Iri` leaf, depth-first, stopping at the first
    /// error. This is the hook prefix expansion uses.
    pub fn try_for_each_iri_mut<E>(
        &mut self,
        f: &mut impl FnMut(&mut String) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut stack: Vec<&mut PropertyPath> = vec![self];
        while let Some(path) = stack.pop() {
            match path {
                PropertyPath::Iri(iri) => f(iri)?,
                PropertyPath::Sequence(left, right) | PropertyPath::Alternative(left, right) => {
                    stack.push(left.as_mut());
                    stack.push(right.as_mut());
                }
                PropertyPath::Inverse(path)
                | PropertyPath::Transitive(path)
                | PropertyPath::TransitiveMin { path, .. }
                | PropertyPath::TransitiveMax { path, .. } => stack.push(path.as_mut()),
            }
        }
        Ok(())
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPath::Iri(iri) => write!(f, "{iri}"),
            PropertyPath::Sequence(left, right) => write!(f, "({left})/({right})"),
            PropertyPath::Alternative(left, right) => write!(f, "({left})|({right})"),
            PropertyPath::Inverse(path) => write!(f, "^({path})"),
            PropertyPath::Transitive(path) => write!(f, "({path})*"),
            // The print form is always `+`; the actual bound rides in `min`.
            PropertyPath::TransitiveMin { path, .. } => write!(f, "({path})+"),
            PropertyPath::TransitiveMax { max: 1, path } => write!(f, "({path})?"),
            PropertyPath::TransitiveMax { max, path } => write!(f, "({path})*{max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knows() -> PropertyPath {
        PropertyPath::iri("<http://xmlns.com/foaf/0.1/knows>")
    }

    #[test]
    fn display_follows_path_grammar() {
        let a = PropertyPath::iri("<a>");
        let b = PropertyPath::iri("<b>");
        assert_eq!(PropertyPath::sequence(a.clone(), b.clone()).to_string(), "(<a>)/(<b>)");
        assert_eq!(
            PropertyPath::alternative(a.clone(), b.clone()).to_string(),
            "(<a>)|(<b>)"
        );
        assert_eq!(PropertyPath::inverse(a.clone()).to_string(), "^(<a>)");
        assert_eq!(PropertyPath::transitive(a.clone()).to_string(), "(<a>)*");
        assert_eq!(PropertyPath::transitive_min(1, a.clone()).to_string(), "(<a>)+");
        // The minimum does not change the print form.
        assert_eq!(PropertyPath::transitive_min(3, a.clone()).to_string(), "(<a>)+");
        assert_eq!(PropertyPath::transitive_max(1, a.clone()).to_string(), "(<a>)?");
        assert_eq!(PropertyPath::transitive_max(5, a).to_string(), "(<a>)*5");
    }

    #[test]
    fn nullability() {
        let iri = knows();
        assert!(!iri.can_be_null());
        assert!(PropertyPath::transitive(iri.clone()).can_be_null());
        assert!(PropertyPath::transitive_max(3, iri.clone()).can_be_null());
        assert!(PropertyPath::transitive_min(0, iri.clone()).can_be_null());
        assert!(!PropertyPath::transitive_min(1, iri.clone()).can_be_null());
        assert!(!PropertyPath::inverse(iri.clone()).can_be_null());
        assert!(PropertyPath::inverse(PropertyPath::transitive(iri.clone())).can_be_null());

        // Inner nodes are nullable only when every child is.
        let nullable = PropertyPath::transitive(iri.clone());
        let seq_half = PropertyPath::sequence(nullable.clone(), iri.clone());
        assert!(!seq_half.can_be_null());
        let seq_full = PropertyPath::sequence(nullable.clone(), nullable.clone());
        assert!(seq_full.can_be_null());
        let alt_half = PropertyPath::alternative(nullable, iri);
        assert!(!alt_half.can_be_null());
    }

    #[test]
    fn for_each_iri_visits_every_leaf() {
        let mut path = PropertyPath::sequence(
            PropertyPath::inverse(PropertyPath::iri("a")),
            PropertyPath::transitive_min(1, PropertyPath::alternative(
                PropertyPath::iri("b"),
                PropertyPath::iri("c"),
            )),
        );
        let mut seen = Vec::new();
        path.try_for_each_iri_mut(&mut |iri: &mut String| {
            seen.push(iri.clone());
            iri.push('!');
            Ok::<(), ()>(())
        })
        .unwrap();
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(
            path.to_string(),
            "(^(a!))/(((b!)|(c!))+)"
        );
    }
}
