//! YAML export
//!
//! Same structure as the JSON export, for human-readable archives.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::ExpenseExport;
use crate::models::{Expense, FilterMode};

/// Write expenses and totals as YAML with a short comment header
pub fn export_yaml<W: Write>(
    expenses: Vec<Expense>,
    filter: FilterMode,
    writer: &mut W,
) -> ExpenseResult<()> {
    let export = ExpenseExport::new(expenses, filter)?;
    let map_err = |e: std::io::Error| ExpenseError::Export(e.to_string());

    writeln!(writer, "# Expense Tracker Export").map_err(map_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(map_err)?;
    writeln!(writer, "# Window: {}", export.filter.label()).map_err(map_err)?;
    writeln!(writer).map_err(map_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

pub fn import_from_yaml(yaml_str: &str) -> ExpenseResult<ExpenseExport> {
    let export: ExpenseExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ExpenseError::Import(e.to_string()))?;

    export.validate().map_err(ExpenseError::Import)?;

    Ok(export)
}
