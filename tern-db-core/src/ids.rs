//! Dense term identifiers.
//!
//! Ids are assigned in collation order at vocabulary build time, so the rank
//! of a word in the sorted store *is* its id. The id space is split:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | `0 .. internal_len` | words in the internal store |
//! | `internal_len .. internal_len + external_len` | externalized literals |
//! | `ID_NO_VALUE` | reserved sentinel, never assigned |
//!
//! Because `id(a) < id(b)` iff `a` sorts before `b` under the active
//! comparator, comparison filters can be answered with a single boundary id
//! (see `Vocabulary::value_id_for_lt` and friends).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense term identifier. Doubles as the cell type of [`IdTable`] rows.
///
/// [`IdTable`]: crate::id_table::IdTable
pub type Id = u64;

/// Sentinel for "no value". Never assigned to a stored word; `Vocabulary::at`
/// maps it back to absence.
pub const ID_NO_VALUE: Id = Id::MAX;

/// Terminator of full-text prefix queries (`"wor*"` matches every word
/// starting with `wor`).
pub const PREFIX_CHAR: char = '*';

/// An inclusive id range `[first, last]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub first: Id,
    pub last: Id,
}

impl IdRange {
    /// Create a new inclusive range.
    pub fn new(first: Id, last: Id) -> Self {
        Self { first, last }
    }

    /// Number of ids covered by the range.
    pub fn len(&self) -> u64 {
        self.last.saturating_sub(self.first) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Check whether `id` falls inside the range.
    pub fn contains(&self, id: Id) -> bool {
        self.first <= id && id <= self.last
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
