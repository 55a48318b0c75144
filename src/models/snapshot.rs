//! Validated view of stored rows
//!
//! Raw rows are converted one by one. A row that fails is kept alongside its
//! position and error so it can be reported and written back unchanged.

use super::expense::{Expense, ExpenseRow};
use crate::error::ValidationError;

/// A row that could not be turned into an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// Position of the row in its source
    pub index: usize,
    pub row: ExpenseRow,
    pub error: ValidationError,
}

/// Validated records plus the rows that failed validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub rejected: Vec<RejectedRow>,
}

impl Snapshot {
    /// Validate raw rows, keeping good ones in order and reporting the rest
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ExpenseRow>,
    {
        let mut snapshot = Self::default();
        for (index, row) in rows.into_iter().enumerate() {
            match Expense::try_from(row.clone()) {
                Ok(expense) => snapshot.expenses.push(expense),
                Err(error) => snapshot.rejected.push(RejectedRow { index, row, error }),
            }
        }
        snapshot
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
