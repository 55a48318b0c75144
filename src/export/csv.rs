//! CSV export
//!
//! One row per expense. The columns match what the CSV importer detects,
//! so an export can be imported again.

use std::io::Write;

use chrono::SecondsFormat;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Export expenses to CSV in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let map_err = |e: csv::Error| ExpenseError::Export(e.to_string());

    csv_writer
        .write_record(["id", "created_at", "category", "amount", "note"])
        .map_err(map_err)?;

    for expense in expenses {
        csv_writer
            .write_record([
                expense.id().as_uuid().to_string().as_str(),
                expense
                    .created_at()
                    .to_rfc3339_opts(SecondsFormat::Secs, true)
                    .as_str(),
                expense.category.as_str(),
                expense.amount.to_decimal_string().as_str(),
                expense.note.as_deref().unwrap_or(""),
            ])
            .map_err(map_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_expenses_csv() {
        let created = Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap();
        let expense = Expense::with_timestamp(
            Money::from_cents(-1250),
            Category::new("Food, misc").unwrap(),
            Some("said \"thanks\"".into()),
            created,
        );

        let mut output = Vec::new();
        export_expenses_csv(std::slice::from_ref(&expense), &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("id,created_at,category,amount,note"));
        assert_eq!(
            lines.next(),
            Some(
                format!(
                    "{},2025-01-15T12:30:00Z,\"Food, misc\",-12.50,\"said \"\"thanks\"\"\"",
                    expense.id().as_uuid()
                )
                .as_str()
            )
        );
        assert_eq!(lines.next(), None);
        assert!(!csv.contains("exp-"));
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut output = Vec::new();
        export_expenses_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,created_at,category,amount,note\n"
        );
    }
}
