//! Export module
//!
//! - CSV: one row per expense (spreadsheet-compatible, re-importable)
//! - JSON: expenses plus totals with a schema version
//! - YAML: the same structure in human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_json, import_from_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_yaml, import_from_yaml};
