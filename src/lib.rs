//! Expense Tracker - record expenses and total them by category
//!
//! The core is two pure functions over a snapshot of typed records:
//! [`filter_expenses`] narrows records to a time window (all, this week,
//! this month) and [`aggregate_totals`] sums them overall and per category
//! in integer cents.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, ids, categories, expenses, filter windows, entry form
//! - `storage`: JSON file storage with atomic writes
//! - `services`: Filtering, expense management and CSV import
//! - `reports`: Category totals
//! - `audit`: Append-only audit log
//! - `display`, `export`, `cli`: Terminal output, file export, command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::{aggregate_totals, filter_expenses, FilterMode};
//!
//! let this_week = filter_expenses(&records, FilterMode::Week);
//! let totals = aggregate_totals(&this_week)?;
//! println!("{} over {} expenses", totals.total, totals.count);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult, ValidationError};
pub use models::{Category, Expense, ExpenseId, FilterMode, Money, WeekStart};
pub use reports::{aggregate_totals, CategoryTotals, Totals};
pub use services::{filter_expenses, filter_expenses_at};
