//! JSON export
//!
//! Exports expenses together with their totals under a schema version.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, FilterMode};
use crate::reports::{aggregate_totals, Totals};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported expenses plus their totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Window the expenses were selected with
    pub filter: FilterMode,

    pub expenses: Vec<Expense>,

    pub summary: ExportSummary,
}

/// Totals as written to the export, amounts in decimal form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub count: usize,
    pub total: String,
    pub by_category: Vec<CategoryTotalEntry>,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotalEntry {
    pub category: String,
    pub amount: String,
}

impl ExportSummary {
    fn new(expenses: &[Expense], totals: &Totals) -> Self {
        Self {
            count: totals.count,
            total: totals.total.to_decimal_string(),
            by_category: totals
                .by_category
                .iter()
                .map(|(category, amount)| CategoryTotalEntry {
                    category: category.to_string(),
                    amount: amount.to_decimal_string(),
                })
                .collect(),
            earliest: expenses.iter().map(Expense::created_at).min(),
            latest: expenses.iter().map(Expense::created_at).max(),
        }
    }
}

impl ExpenseExport {
    pub fn new(expenses: Vec<Expense>, filter: FilterMode) -> ExpenseResult<Self> {
        let totals = aggregate_totals(&expenses)?;
        let summary = ExportSummary::new(&expenses, &totals);

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            filter,
            expenses,
            summary,
        })
    }

    /// Check the schema version and that the summary matches the expenses
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let totals = aggregate_totals(&self.expenses).map_err(|e| e.to_string())?;
        let expected = ExportSummary::new(&self.expenses, &totals);
        if expected != self.summary {
            return Err(format!(
                "Summary does not match expenses: \
                 expected total {} over {} expenses, got {} over {}",
                expected.total, expected.count, self.summary.total, self.summary.count
            ));
        }

        Ok(())
    }
}

/// Write expenses and totals as JSON
pub fn export_json<W: Write>(
    expenses: Vec<Expense>,
    filter: FilterMode,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = ExpenseExport::new(expenses, filter)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export, rejecting it if it is inconsistent
pub fn import_from_json(json_str: &str) -> ExpenseResult<ExpenseExport> {
    let export: ExpenseExport =
        serde_json::from_str(json_str).map_err(|e| ExpenseError::Import(e.to_string()))?;

    export.validate().map_err(ExpenseError::Import)?;

    Ok(export)
}
