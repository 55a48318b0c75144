//! Core data models for the expense tracker
//!
//! Expense records, their money and category value types, the filter
//! windows with their calendar boundaries, the validated snapshot of
//! stored rows, and the entry form.

pub mod category;
pub mod expense;
pub mod form;
pub mod ids;
pub mod money;
pub mod period;
pub mod snapshot;

pub use category::Category;
pub use expense::{Expense, ExpenseEdit, ExpenseRow, NewExpense};
pub use form::{EntryForm, FormMode, Submission};
pub use ids::ExpenseId;
pub use money::Money;
pub use period::{FilterMode, WeekStart};
pub use snapshot::{RejectedRow, Snapshot};
