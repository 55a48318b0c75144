//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, filtering by time window, auditing and CSV import.

pub mod expense;
pub mod filter;
pub mod import;

pub use expense::ExpenseService;
pub use filter::{filter_expenses, filter_expenses_at};
pub use import::{ColumnMapping, ImportRejection, ImportResult, ImportService};
