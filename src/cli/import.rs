//! CLI command for CSV import

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Import expenses from a CSV file with a header row
///
/// Rows that fail validation are listed and skipped. Date-only values are
/// read with the configured date format first.
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: PathBuf,
) -> ExpenseResult<()> {
    let service = ImportService::new(storage).with_date_format(&settings.date_format);
    let result = service.import_file(&file)?;

    println!(
        "Imported {} expenses from {}",
        result.imported.len(),
        file.display()
    );

    if !result.is_clean() {
        println!("Skipped {} invalid rows:", result.rejected.len());
        for rejection in &result.rejected {
            println!("  line {}: {}", rejection.line, rejection.message);
        }
    }

    Ok(())
}
