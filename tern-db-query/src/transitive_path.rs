//! Transitive-path operator.
//!
//! Given a two-column step relation `sub`, emits the pairs `(x, y)` with a
//! witness path `x = v0, v1, .., vk = y` of length `k` in
//! `[min_dist, max_dist]`, every `(vi, vi+1)` taken from `sub` projected onto
//! `(left_sub_col, right_sub_col)`.
//!
//! Either endpoint is a variable or a constant id. A side can additionally be
//! *bound* to a materialized table: its column then supplies the seed values
//! and the full bound row is carried into the output for join propagation.
//!
//! Zero-length paths (`min_dist == 0`) pair a node with itself; they exist
//! for every node appearing in either projected column of `sub`, or, on a
//! bound side, for every value in the bound column.
//!
//! Traversal is a frontier expansion per seed with visited marking, so each
//! target is discovered at its shortest distance and cycles terminate. The
//! tracker is checked once per frontier step and charged per emitted row.

use crate::context::ExecutionContext;
use crate::error::{QueryError, Result};
use crate::operator::{ExecutionTree, Operation};
use hashbrown::{HashMap, HashSet};
use std::fmt;
use tern_db_core::{Id, IdTable};
use tracing::debug;

/// One endpoint of the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathEnd {
    /// Free endpoint, named for the column mapping.
    Variable(String),
    /// Endpoint fixed to a single id; only matching pairs are emitted.
    Constant(Id),
}

impl PathEnd {
    pub fn is_variable(&self) -> bool {
        matches!(self, PathEnd::Variable(_))
    }
}

impl fmt::Display for PathEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEnd::Variable(name) => write!(f, "{name}"),
            PathEnd::Constant(id) => write!(f, "#{id}"),
        }
    }
}

/// A side bound to a sub-result; `col` selects the seed column.
#[derive(Clone, Debug)]
struct BoundSide {
    tree: ExecutionTree,
    col: usize,
}

/// The transitive-path operator. Constructed per plan, optionally rebound
/// once per side, then executed.
#[derive(Clone, Debug)]
pub struct TransitivePath {
    sub: ExecutionTree,
    left: PathEnd,
    right: PathEnd,
    left_sub_col: usize,
    right_sub_col: usize,
    min_dist: usize,
    max_dist: usize,
    bound_left: Option<BoundSide>,
    bound_right: Option<BoundSide>,
}

impl TransitivePath {
    /// Create an unbound operator over `sub`. `max_dist` of `usize::MAX`
    /// means unbounded repetition.
    pub fn new(
        sub: ExecutionTree,
        left: PathEnd,
        right: PathEnd,
        left_sub_col: usize,
        right_sub_col: usize,
        min_dist: usize,
        max_dist: usize,
    ) -> Result<Self> {
        let width = sub.result_width();
        if width < 2 {
            return Err(QueryError::check(format!(
                "transitive path needs a sub-result of width >= 2, got {width}"
            )));
        }
        if left_sub_col >= width || right_sub_col >= width {
            return Err(QueryError::check(format!(
                "step columns ({left_sub_col}, {right_sub_col}) out of range for width {width}"
            )));
        }
        if min_dist > max_dist {
            return Err(QueryError::check(format!(
                "minimum distance {min_dist} exceeds maximum distance {max_dist}"
            )));
        }
        Ok(Self {
            sub,
            left,
            right,
            left_sub_col,
            right_sub_col,
            min_dist,
            max_dist,
            bound_left: None,
            bound_right: None,
        })
    }

    /// A copy of this operator whose left seeds come from `tree`'s column
    /// `col`. Restricting the seeds this way avoids computing paths for
    /// values the enclosing join would discard anyway. A side may only be
    /// bound once.
    pub fn bind_left_side(&self, tree: ExecutionTree, col: usize) -> Result<Self> {
        if self.bound_left.is_some() {
            return Err(QueryError::check("left side is already bound"));
        }
        if !self.left.is_variable() {
            return Err(QueryError::check(
                "cannot bind the left side: it is a constant",
            ));
        }
        if col >= tree.result_width() {
            return Err(QueryError::check(format!(
                "bind column {col} out of range for width {}",
                tree.result_width()
            )));
        }
        let mut bound = self.clone();
        bound.bound_left = Some(BoundSide { tree, col });
        Ok(bound)
    }

    /// Mirror of [`TransitivePath::bind_left_side`] for the right side.
    pub fn bind_right_side(&self, tree: ExecutionTree, col: usize) -> Result<Self> {
        if self.bound_right.is_some() {
            return Err(QueryError::check("right side is already bound"));
        }
        if !self.right.is_variable() {
            return Err(QueryError::check(
                "cannot bind the right side: it is a constant",
            ));
        }
        if col >= tree.result_width() {
            return Err(QueryError::check(format!(
                "bind column {col} out of range for width {}",
                tree.result_width()
            )));
        }
        let mut bound = self.clone();
        bound.bound_right = Some(BoundSide { tree, col });
        Ok(bound)
    }

    /// Whether either side has been bound.
    pub fn is_bound(&self) -> bool {
        self.bound_left.is_some() || self.bound_right.is_some()
    }

    /// Targets reachable from `start` at a distance in
    /// `[min_dist, max_dist]`, in discovery order. Visited marking reports
    /// each target at its shortest distance and bounds the expansion on
    /// cyclic inputs.
    fn reachable(
        &self,
        ctx: &ExecutionContext,
        edges: &HashMap<Id, Vec<Id>>,
        start: Id,
    ) -> Result<Vec<Id>> {
        let mut out = Vec::new();
        let mut visited: HashSet<Id> = HashSet::new();
        let mut frontier = vec![start];
        let mut next = Vec::new();
        let mut depth = 0usize;
        while !frontier.is_empty() && depth < self.max_dist {
            ctx.tracker().check()?;
            depth += 1;
            for node in frontier.drain(..) {
                let Some(successors) = edges.get(&node) else {
                    continue;
                };
                for &successor in successors {
                    if visited.insert(successor) {
                        if depth >= self.min_dist {
                            out.push(successor);
                        }
                        next.push(successor);
                    }
                }
            }
            std::mem::swap(&mut frontier, &mut next);
        }
        Ok(out)
    }

    /// Reachable targets plus, when `zero_ok`, the seed itself in front.
    fn targets_for_seed(
        &self,
        ctx: &ExecutionContext,
        edges: &HashMap<Id, Vec<Id>>,
        seed: Id,
        zero_ok: bool,
    ) -> Result<Vec<Id>> {
        let mut targets = Vec::new();
        if zero_ok {
            targets.push(seed);
        }
        for target in self.reachable(ctx, edges, seed)? {
            // A cycle rediscovers the seed; the zero-length pair already
            // covers it.
            if !(zero_ok && target == seed) {
                targets.push(target);
            }
        }
        Ok(targets)
    }

    fn compute_unbound(&self, ctx: &ExecutionContext, sub: &IdTable) -> Result<IdTable> {
        let forward = adjacency(sub, self.left_sub_col, self.right_sub_col);
        let nodes = endpoint_nodes(sub, self.left_sub_col, self.right_sub_col);
        let mut result = IdTable::new(2);
        match (&self.left, &self.right) {
            (PathEnd::Constant(left), PathEnd::Constant(right)) => {
                let zero_ok = self.min_dist == 0 && nodes.contains(left);
                let targets = self.targets_for_seed(ctx, &forward, *left, zero_ok)?;
                if targets.contains(right) {
                    ctx.tracker().charge(1)?;
                    result.push_row(&[*left, *right]);
                }
            }
            (PathEnd::Constant(left), PathEnd::Variable(_)) => {
                let zero_ok = self.min_dist == 0 && nodes.contains(left);
                let targets = self.targets_for_seed(ctx, &forward, *left, zero_ok)?;
                ctx.tracker()
                    .charge(targets.len() as u64)?;
                for target in targets {
                    result.push_row(&[*left, target]);
                }
            }
            (PathEnd::Variable(_), PathEnd::Constant(right)) => {
                // Walk the inverted relation from the constant.
                let backward = adjacency(sub, self.right_sub_col, self.left_sub_col);
                let zero_ok = self.min_dist == 0 && nodes.contains(right);
                let sources = self.targets_for_seed(ctx, &backward, *right, zero_ok)?;
                ctx.tracker()
                    .charge(sources.len() as u64)?;
                for source in sources {
                    result.push_row(&[source, *right]);
                }
            }
            (PathEnd::Variable(_), PathEnd::Variable(_)) => {
                let seed_cols: &[usize] = if self.min_dist == 0 {
                    // Zero-length pairs exist for every endpoint, including
                    // pure targets.
                    &[self.left_sub_col, self.right_sub_col]
                } else {
                    &[self.left_sub_col]
                };
                for seed in seed_order(sub, seed_cols) {
                    let targets =
                        self.targets_for_seed(ctx, &forward, seed, self.min_dist == 0)?;
                    ctx.tracker()
                        .charge(targets.len() as u64)?;
                    for target in targets {
                        result.push_row(&[seed, target]);
                    }
                }
            }
        }
        Ok(result)
    }

    fn compute_left_bound(
        &self,
        ctx: &ExecutionContext,
        sub: &IdTable,
        bound: &BoundSide,
    ) -> Result<IdTable> {
        let left_table = bound.tree.result(ctx)?;
        let forward = adjacency(sub, self.left_sub_col, self.right_sub_col);
        // Every value in the bound column qualifies for a zero-length path.
        let zero_ok = self.min_dist == 0;
        let mut cache: HashMap<Id, Vec<Id>> = HashMap::new();
        let mut result = IdTable::new(self.result_width());
        let mut row_buf = Vec::with_capacity(self.result_width());
        for row in left_table.rows() {
            ctx.tracker().check()?;
            let seed = row[bound.col];
            if !cache.contains_key(&seed) {
                let targets = self.targets_for_seed(ctx, &forward, seed, zero_ok)?;
                cache.insert(seed, targets);
            }
            let targets = &cache[&seed];
            match &self.right {
                PathEnd::Constant(right) => {
                    if targets.contains(right) {
                        ctx.tracker().charge(1)?;
                        result.push_row(row);
                    }
                }
                PathEnd::Variable(_) => {
                    ctx.tracker()
                        .charge(targets.len() as u64)?;
                    for &target in targets {
                        row_buf.clear();
                        row_buf.push(target);
                        row_buf.extend_from_slice(row);
                        result.push_row(&row_buf);
                    }
                }
            }
        }
        Ok(result)
    }

    fn compute_right_bound(
        &self,
        ctx: &ExecutionContext,
        sub: &IdTable,
        bound: &BoundSide,
    ) -> Result<IdTable> {
        let right_table = bound.tree.result(ctx)?;
        let backward = adjacency(sub, self.right_sub_col, self.left_sub_col);
        let zero_ok = self.min_dist == 0;
        let mut cache: HashMap<Id, Vec<Id>> = HashMap::new();
        let mut result = IdTable::new(self.result_width());
        let mut row_buf = Vec::with_capacity(self.result_width());
        for row in right_table.rows() {
            ctx.tracker().check()?;
            let seed = row[bound.col];
            if !cache.contains_key(&seed) {
                let sources = self.targets_for_seed(ctx, &backward, seed, zero_ok)?;
                cache.insert(seed, sources);
            }
            let sources = &cache[&seed];
            match &self.left {
                PathEnd::Constant(left) => {
                    if sources.contains(left) {
                        ctx.tracker().charge(1)?;
                        result.push_row(row);
                    }
                }
                PathEnd::Variable(_) => {
                    ctx.tracker()
                        .charge(sources.len() as u64)?;
                    for &source in sources {
                        row_buf.clear();
                        row_buf.push(source);
                        row_buf.extend_from_slice(row);
                        result.push_row(&row_buf);
                    }
                }
            }
        }
        Ok(result)
    }

    fn compute_both_bound(
        &self,
        ctx: &ExecutionContext,
        sub: &IdTable,
        left_bound: &BoundSide,
        right_bound: &BoundSide,
    ) -> Result<IdTable> {
        let left_table = left_bound.tree.result(ctx)?;
        let right_table = right_bound.tree.result(ctx)?;
        let forward = adjacency(sub, self.left_sub_col, self.right_sub_col);
        let zero_ok = self.min_dist == 0;
        let mut cache: HashMap<Id, HashSet<Id>> = HashMap::new();
        let mut result = IdTable::new(self.result_width());
        let mut row_buf = Vec::with_capacity(self.result_width());
        for left_row in left_table.rows() {
            ctx.tracker().check()?;
            let seed = left_row[left_bound.col];
            if !cache.contains_key(&seed) {
                let targets = self
                    .targets_for_seed(ctx, &forward, seed, zero_ok)?
                    .into_iter()
                    .collect();
                cache.insert(seed, targets);
            }
            let targets = &cache[&seed];
            for right_row in right_table.rows() {
                if targets.contains(&right_row[right_bound.col]) {
                    ctx.tracker().charge(1)?;
                    row_buf.clear();
                    row_buf.extend_from_slice(left_row);
                    row_buf.extend_from_slice(right_row);
                    result.push_row(&row_buf);
                }
            }
        }
        Ok(result)
    }

    /// Coarse growth factor of the hop window, for the estimates.
    fn hop_window(&self) -> usize {
        if self.max_dist == usize::MAX {
            4
        } else {
            (self.max_dist - self.min_dist).saturating_add(1).min(4)
        }
    }
}

impl Operation for TransitivePath {
    fn result_width(&self) -> usize {
        match (&self.bound_left, &self.bound_right) {
            (Some(left), Some(right)) => left.tree.result_width() + right.tree.result_width(),
            (Some(left), None) => {
                left.tree.result_width() + usize::from(self.right.is_variable())
            }
            (None, Some(right)) => {
                right.tree.result_width() + usize::from(self.left.is_variable())
            }
            (None, None) => 2,
        }
    }

    fn result_sorted_on(&self) -> Vec<usize> {
        // A bound side is scanned in input order, so its sort order on the
        // seed column survives into the output.
        match (&self.bound_left, &self.bound_right) {
            (Some(bound), None) if bound.tree.result_sorted_on().first() == Some(&bound.col) => {
                vec![bound.col + usize::from(self.right.is_variable())]
            }
            (None, Some(bound)) if bound.tree.result_sorted_on().first() == Some(&bound.col) => {
                vec![bound.col + usize::from(self.left.is_variable())]
            }
            (Some(bound), Some(_))
                if bound.tree.result_sorted_on().first() == Some(&bound.col) =>
            {
                vec![bound.col]
            }
            _ => Vec::new(),
        }
    }

    fn variable_columns(&self) -> HashMap<String, usize> {
        let mut columns = HashMap::new();
        match (&self.bound_left, &self.bound_right) {
            (None, None) => {
                if let PathEnd::Variable(name) = &self.left {
                    columns.insert(name.clone(), 0);
                }
                if let PathEnd::Variable(name) = &self.right {
                    columns.insert(name.clone(), 1);
                }
            }
            (Some(bound), None) => {
                let offset = usize::from(self.right.is_variable());
                if let PathEnd::Variable(name) = &self.right {
                    columns.insert(name.clone(), 0);
                }
                for (var, col) in bound.tree.variable_columns() {
                    columns.insert(var, col + offset);
                }
                if let PathEnd::Variable(name) = &self.left {
                    columns.insert(name.clone(), bound.col + offset);
                }
            }
            (None, Some(bound)) => {
                let offset = usize::from(self.left.is_variable());
                if let PathEnd::Variable(name) = &self.left {
                    columns.insert(name.clone(), 0);
                }
                for (var, col) in bound.tree.variable_columns() {
                    columns.insert(var, col + offset);
                }
                if let PathEnd::Variable(name) = &self.right {
                    columns.insert(name.clone(), bound.col + offset);
                }
            }
            (Some(left_bound), Some(right_bound)) => {
                for (var, col) in left_bound.tree.variable_columns() {
                    columns.insert(var, col);
                }
                if let PathEnd::Variable(name) = &self.left {
                    columns.insert(name.clone(), left_bound.col);
                }
                let left_width = left_bound.tree.result_width();
                for (var, col) in right_bound.tree.variable_columns() {
                    columns.insert(var, col + left_width);
                }
                if let PathEnd::Variable(name) = &self.right {
                    columns.insert(name.clone(), right_bound.col + left_width);
                }
            }
        }
        columns
    }

    fn size_estimate(&self) -> usize {
        let window = self.hop_window();
        let mut estimate = self.sub.size_estimate().saturating_mul(window);
        if let Some(bound) = &self.bound_left {
            estimate = estimate.min(bound.tree.size_estimate().saturating_mul(window));
        }
        if let Some(bound) = &self.bound_right {
            estimate = estimate.min(bound.tree.size_estimate().saturating_mul(window));
        }
        if !self.left.is_variable() {
            estimate /= 4;
        }
        if !self.right.is_variable() {
            estimate /= 4;
        }
        estimate
    }

    fn cost_estimate(&self) -> usize {
        // Producing the step relation, building the adjacency, expanding.
        let mut cost = self
            .sub
            .cost_estimate()
            .saturating_add(self.sub.size_estimate())
            .saturating_add(self.size_estimate());
        if let Some(bound) = &self.bound_left {
            cost = cost.saturating_add(bound.tree.cost_estimate());
        }
        if let Some(bound) = &self.bound_right {
            cost = cost.saturating_add(bound.tree.cost_estimate());
        }
        cost
    }

    fn known_empty_result(&self) -> bool {
        let bound_empty = self
            .bound_left
            .iter()
            .chain(self.bound_right.iter())
            .any(|bound| bound.tree.known_empty_result());
        if self.min_dist == 0 {
            // Zero-length pairs come from the seed side.
            if self.bound_left.is_some() || self.bound_right.is_some() {
                bound_empty
            } else {
                self.sub.known_empty_result()
            }
        } else {
            self.sub.known_empty_result() || bound_empty
        }
    }

    fn descriptor(&self) -> String {
        let max = if self.max_dist == usize::MAX {
            "unbounded".to_string()
        } else {
            self.max_dist.to_string()
        };
        format!(
            "TransitivePath from {} to {} with at least {} and at most {} steps",
            self.left, self.right, self.min_dist, max
        )
    }

    fn compute_result(&self, ctx: &ExecutionContext) -> Result<IdTable> {
        let sub = self.sub.result(ctx)?;
        debug!(
            sub_rows = sub.row_count(),
            min = self.min_dist,
            max = self.max_dist,
            bound_left = self.bound_left.is_some(),
            bound_right = self.bound_right.is_some(),
            "computing transitive path"
        );
        match (&self.bound_left, &self.bound_right) {
            (None, None) => self.compute_unbound(ctx, &sub),
            (Some(left), None) => self.compute_left_bound(ctx, &sub, left),
            (None, Some(right)) => self.compute_right_bound(ctx, &sub, right),
            (Some(left), Some(right)) => self.compute_both_bound(ctx, &sub, left, right),
        }
    }
}

/// Successor lists of the step relation projected onto `(from_col, to_col)`,
/// successors in row order.
fn adjacency(sub: &IdTable, from_col: usize, to_col: usize) -> HashMap<Id, Vec<Id>> {
    let mut edges: HashMap<Id, Vec<Id>> = HashMap::new();
    for row in sub.rows() {
        edges.entry(row[from_col]).or_default().push(row[to_col]);
    }
    edges
}

/// All values appearing in either projected column.
fn endpoint_nodes(sub: &IdTable, left_col: usize, right_col: usize) -> HashSet<Id> {
    let mut nodes = HashSet::new();
    for row in sub.rows() {
        nodes.insert(row[left_col]);
        nodes.insert(row[right_col]);
    }
    nodes
}

/// Distinct values of the given columns in first-occurrence order, so the
/// seed iteration (and with it the output) is deterministic.
fn seed_order(sub: &IdTable, cols: &[usize]) -> Vec<Id> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    for row in sub.rows() {
        for &col in cols {
            if seen.insert(row[col]) {
                order.push(row[col]);
            }
        }
    }
    order
}
