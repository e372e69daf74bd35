//! Execution context shared by all operators of one query evaluation.

use tern_db_core::Tracker;

/// Default number of text matches considered per entity.
pub const DEFAULT_TEXT_LIMIT: usize = 1;

/// Per-query execution state: the cancellation/fuel tracker and engine-wide
/// limits. Operators receive it by reference in `compute_result`; nothing in
/// it is mutated during evaluation.
#[derive(Clone, Debug, Default)]
pub struct ExecutionContext {
    tracker: Tracker,
    text_limit: Option<usize>,
}

impl ExecutionContext {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            text_limit: None,
        }
    }

    pub fn with_text_limit(mut self, limit: usize) -> Self {
        self.text_limit = Some(limit);
        self
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Limit for text-index operators.
    pub fn text_limit(&self) -> usize {
        self.text_limit.unwrap_or(DEFAULT_TEXT_LIMIT)
    }
}
