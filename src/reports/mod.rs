//! Reports
//!
//! Aggregations over a snapshot of expenses.

pub mod totals;

pub use totals::{aggregate_totals, CategoryTotals, Totals};
