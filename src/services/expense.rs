//! Expense service
//!
//! Business logic for recording, editing and removing expenses. Every
//! mutation is saved to disk and written to the audit log before returning.

use chrono::{DateTime, Local, TimeZone};

use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::{
    EntryForm, Expense, ExpenseEdit, ExpenseId, FilterMode, NewExpense, Submission, WeekStart,
};
use crate::reports::{aggregate_totals, Totals};
use crate::storage::Storage;

use super::filter::filter_expenses_at;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    week_start: WeekStart,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service with a Sunday-first week
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            week_start: WeekStart::default(),
        }
    }

    /// Use a different first day of the week for the week window
    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Record a new expense stamped with the current time
    pub fn create(&self, input: NewExpense) -> ExpenseResult<Expense> {
        let expense = Expense::new(input.amount, input.category, input.note);
        self.insert(expense)
    }

    /// Record an already-built expense, keeping its id and timestamp
    pub(crate) fn insert(&self, expense: Expense) -> ExpenseResult<Expense> {
        self.storage.expenses.insert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage
            .log_create(expense.id().to_string(), Some(expense.to_string()), &expense)?;

        tracing::info!(
            id = %expense.id(),
            amount = %expense.amount,
            category = %expense.category,
            "expense created"
        );
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full id or short `exp-` prefix
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing matches; a validation error if the prefix is
    /// shared by more than one expense.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Expense> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(expense);
            }
        }

        let mut matches = self.storage.expenses.find_matching(identifier)?;
        match matches.len() {
            0 => Err(ExpenseError::expense_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => {
                tracing::debug!(identifier, matches = n, "ambiguous expense id");
                Err(ValidationError::AmbiguousId(identifier.to_string()).into())
            }
        }
    }

    /// Expenses inside the window, in creation order
    pub fn list(&self, mode: FilterMode) -> ExpenseResult<Vec<Expense>> {
        self.list_at(mode, &Local::now())
    }

    /// Expenses inside the window measured from `now`
    pub fn list_at<Tz: TimeZone>(
        &self,
        mode: FilterMode,
        now: &DateTime<Tz>,
    ) -> ExpenseResult<Vec<Expense>> {
        let all = self.storage.expenses.get_all()?;
        Ok(filter_expenses_at(&all, mode, now, self.week_start))
    }

    /// Totals of the expenses inside the window
    pub fn summary(&self, mode: FilterMode) -> ExpenseResult<Totals> {
        Ok(aggregate_totals(&self.list(mode)?)?)
    }

    /// Overwrite the provided fields of an expense
    ///
    /// The id and creation time never change.
    pub fn update(&self, id: ExpenseId, edit: ExpenseEdit) -> ExpenseResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let before = expense.clone();
        let changes = expense.apply_edit(edit);

        if changes.is_empty() {
            tracing::debug!(%id, "expense unchanged");
            return Ok(expense);
        }

        if !self.storage.expenses.update(expense.clone())? {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }
        self.storage.expenses.save()?;

        let diff = changes.join(", ");
        self.storage.log_update(
            id.to_string(),
            Some(expense.to_string()),
            &before,
            &expense,
            Some(diff.clone()),
        )?;

        tracing::info!(%id, changes = %diff, "expense updated");
        Ok(expense)
    }

    /// Remove exactly one expense
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        self.storage
            .log_delete(id.to_string(), Some(expense.to_string()), &expense)?;

        tracing::info!(%id, "expense deleted");
        Ok(expense)
    }

    /// Validate a filled-in form and create or update accordingly
    pub fn submit(&self, form: &EntryForm) -> ExpenseResult<Expense> {
        match form.validate()? {
            Submission::Create(input) => self.create(input),
            Submission::Update(id, edit) => self.update(id, edit),
        }
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count()
    }
}
