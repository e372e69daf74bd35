//! Constant-table leaf operation.
//!
//! Materializes a fixed [`IdTable`] with named columns, the operator form of
//! a VALUES clause. Also the natural leaf for feeding pre-materialized
//! sub-results into other operators.

use crate::context::ExecutionContext;
use crate::error::{QueryError, Result};
use crate::operator::Operation;
use hashbrown::HashMap;
use tern_db_core::IdTable;

/// A leaf operation yielding a fixed table.
#[derive(Clone, Debug)]
pub struct ValuesOperation {
    variables: Vec<String>,
    table: IdTable,
    sorted_on: Vec<usize>,
}

impl ValuesOperation {
    /// Create a new constant table. One variable per column.
    pub fn new(variables: Vec<String>, table: IdTable) -> Result<Self> {
        if variables.len() != table.width() {
            return Err(QueryError::check(format!(
                "values operation needs one variable per column, got {} variables for width {}",
                variables.len(),
                table.width()
            )));
        }
        Ok(Self {
            variables,
            table,
            sorted_on: Vec::new(),
        })
    }

    /// Declare that the stored rows are sorted on the given columns. The
    /// caller is responsible for the rows actually being in that order.
    pub fn with_sorted_on(mut self, columns: Vec<usize>) -> Self {
        self.sorted_on = columns;
        self
    }
}

impl Operation for ValuesOperation {
    fn result_width(&self) -> usize {
        self.table.width()
    }

    fn result_sorted_on(&self) -> Vec<usize> {
        self.sorted_on.clone()
    }

    fn variable_columns(&self) -> HashMap<String, usize> {
        self.variables
            .iter()
            .enumerate()
            .map(|(col, var)| (var.clone(), col))
            .collect()
    }

    fn size_estimate(&self) -> usize {
        self.table.row_count()
    }

    fn cost_estimate(&self) -> usize {
        self.table.row_count()
    }

    fn known_empty_result(&self) -> bool {
        self.table.row_count() == 0
    }

    fn descriptor(&self) -> String {
        format!(
            "Values on {} ({} rows)",
            self.variables.join(", "),
            self.table.row_count()
        )
    }

    fn compute_result(&self, _ctx: &ExecutionContext) -> Result<IdTable> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_its_table_and_schema() {
        let table = IdTable::from_rows(2, vec![vec![1, 2], vec![3, 4]]);
        let op = ValuesOperation::new(vec!["?x".to_string(), "?y".to_string()], table.clone())
            .unwrap();
        assert_eq!(op.result_width(), 2);
        assert_eq!(op.variable_columns().get("?y"), Some(&1));
        assert!(!op.known_empty_result());
        let result = op.compute_result(&ExecutionContext::default()).unwrap();
        assert_eq!(result, table);
    }

    #[test]
    fn rejects_schema_width_mismatch() {
        let table = IdTable::new(2);
        assert!(ValuesOperation::new(vec!["?x".to_string()], table).is_err());
    }
}
