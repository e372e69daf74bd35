//! Operator trait and shared execution-tree handles.
//!
//! Physical operators form a tree. Each operator materializes its whole
//! result as an [`IdTable`]; there is no batch streaming at this seam. The
//! enclosing engine may evaluate independent subtrees concurrently, which is
//! safe because `compute_result` is pure with respect to its inputs and free
//! of hidden global state.

use crate::context::ExecutionContext;
use crate::error::Result;
use hashbrown::HashMap;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tern_db_core::IdTable;

/// A physical operator.
///
/// # Contract
///
/// - `compute_result` is deterministic modulo output row order and does not
///   observe anything outside its inputs and the [`ExecutionContext`]
/// - `variable_columns` names the output columns, fixed at construction
/// - estimates are advisory and never affect result correctness
pub trait Operation: fmt::Debug + Send + Sync {
    /// Number of output columns.
    fn result_width(&self) -> usize;

    /// Output columns the result is sorted on, primary key first. Empty when
    /// no order is guaranteed.
    fn result_sorted_on(&self) -> Vec<usize>;

    /// Mapping from variable names to output columns.
    fn variable_columns(&self) -> HashMap<String, usize>;

    /// Estimated number of result rows (for planning/EXPLAIN).
    fn size_estimate(&self) -> usize;

    /// Estimated total cost of producing the result, including children.
    fn cost_estimate(&self) -> usize;

    /// Estimated mean number of rows per distinct value in `col`.
    fn multiplicity(&self, col: usize) -> f32 {
        let _ = col;
        1.0
    }

    /// Whether the result is statically known to be empty.
    fn known_empty_result(&self) -> bool {
        false
    }

    /// Short human-readable description for plan printing.
    fn descriptor(&self) -> String;

    /// Materialize the result.
    fn compute_result(&self, ctx: &ExecutionContext) -> Result<IdTable>;
}

/// A shared, read-only handle to a sub-plan.
///
/// Several parent operators may hold the same tree; the first
/// [`ExecutionTree::result`] call materializes the table and later calls get
/// the cached `Arc`. The handle is immutable post-planning, so sharing needs
/// no further synchronization.
#[derive(Clone, Debug)]
pub struct ExecutionTree(Arc<TreeInner>);

#[derive(Debug)]
struct TreeInner {
    operation: Box<dyn Operation>,
    result: OnceCell<Arc<IdTable>>,
}

impl ExecutionTree {
    pub fn new(operation: impl Operation + 'static) -> Self {
        Self(Arc::new(TreeInner {
            operation: Box::new(operation),
            result: OnceCell::new(),
        }))
    }

    pub fn operation(&self) -> &dyn Operation {
        self.0.operation.as_ref()
    }

    /// The materialized result, computing and caching it on first use.
    pub fn result(&self, ctx: &ExecutionContext) -> Result<Arc<IdTable>> {
        self.0
            .result
            .get_or_try_init(|| self.0.operation.compute_result(ctx).map(Arc::new))
            .cloned()
    }

    pub fn result_width(&self) -> usize {
        self.0.operation.result_width()
    }

    pub fn result_sorted_on(&self) -> Vec<usize> {
        self.0.operation.result_sorted_on()
    }

    pub fn variable_columns(&self) -> HashMap<String, usize> {
        self.0.operation.variable_columns()
    }

    pub fn size_estimate(&self) -> usize {
        self.0.operation.size_estimate()
    }

    pub fn cost_estimate(&self) -> usize {
        self.0.operation.cost_estimate()
    }

    pub fn known_empty_result(&self) -> bool {
        self.0.operation.known_empty_result()
    }

    pub fn descriptor(&self) -> String {
        self.0.operation.descriptor()
    }
}
