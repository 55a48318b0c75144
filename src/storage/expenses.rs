//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json. Records are kept in
//! creation order. Rows that fail validation on load are set aside, reported,
//! and written back untouched on save so a bad row is never silently lost.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId, ExpenseRow, RejectedRow, Snapshot};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of expenses.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<ExpenseRow>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
    rejected: RwLock<Vec<RejectedRow>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
            rejected: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Expense>>, ExpenseError> {
        self.data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Expense>>, ExpenseError> {
        self.data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load expenses from disk
    ///
    /// Returns the rows that were rejected during validation.
    pub fn load(&self) -> Result<Vec<RejectedRow>, ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let snapshot = Snapshot::from_rows(file_data.expenses);

        for rejected in &snapshot.rejected {
            tracing::warn!(
                row = rejected.index,
                id = %rejected.row.id,
                error = %rejected.error,
                "skipping malformed expense row"
            );
        }
        tracing::debug!(
            loaded = snapshot.expenses.len(),
            rejected = snapshot.rejected.len(),
            path = %self.path.display(),
            "loaded expenses"
        );

        let mut data = self.write()?;
        let mut rejected = self
            .rejected
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = snapshot.expenses;
        *rejected = snapshot.rejected.clone();

        Ok(snapshot.rejected)
    }

    /// Save expenses to disk, followed by any rows rejected on load
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.read()?;
        let rejected = self
            .rejected
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let expenses = data
            .iter()
            .cloned()
            .map(ExpenseRow::from)
            .chain(rejected.iter().map(|r| r.row.clone()))
            .collect();

        write_json_atomic(&self.path, &ExpenseData { expenses })?;
        tracing::debug!(count = data.len(), path = %self.path.display(), "saved expenses");
        Ok(())
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        Ok(self.read()?.iter().find(|e| e.id() == id).cloned())
    }

    /// All expenses matching a user-typed identifier (full id or short prefix)
    pub fn find_matching(&self, identifier: &str) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self
            .read()?
            .iter()
            .filter(|e| e.id().matches(identifier))
            .cloned()
            .collect())
    }

    /// Snapshot of all expenses in creation order
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.read()?.clone())
    }

    /// Append a new expense
    pub fn insert(&self, expense: Expense) -> Result<(), ExpenseError> {
        let mut data = self.write()?;
        if data.iter().any(|e| e.id() == expense.id()) {
            return Err(ExpenseError::Storage(format!(
                "Expense {} already exists",
                expense.id()
            )));
        }
        data.push(expense);
        Ok(())
    }

    /// Replace an existing expense in place
    ///
    /// Returns false if no expense has that id.
    pub fn update(&self, expense: Expense) -> Result<bool, ExpenseError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|e| e.id() == expense.id()) {
            Some(slot) => {
                *slot = expense;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|e| e.id() == id)
            .map(|index| data.remove(index)))
    }

    /// Rows rejected by the last load
    pub fn rejected(&self) -> Result<Vec<RejectedRow>, ExpenseError> {
        Ok(self
            .rejected
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?
            .clone())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(self.read()?.len())
    }
}
