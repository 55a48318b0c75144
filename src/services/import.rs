//! CSV import service
//!
//! Reads expenses from a CSV file. Each row is validated on its own; rows
//! that fail are reported with their line number and skipped, never
//! defaulted.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, Utc};
use csv::{Reader, ReaderBuilder, StringRecord};

use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::period::local_midnight;
use crate::models::{Category, Expense, Money};
use crate::storage::Storage;

/// Which columns hold which expense fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub amount_column: usize,
    pub category_column: usize,
    pub note_column: Option<usize>,
    /// Without a date column every row is stamped with the import time
    pub date_column: Option<usize>,
    /// Format tried for date-only values before the built-in ones
    pub date_format: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            amount_column: 0,
            category_column: 1,
            note_column: Some(2),
            date_column: None,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Detect column positions from a header record
    ///
    /// Amount and category headers are required and may appear only once.
    /// Note and date columns are optional.
    pub fn from_headers(headers: &StringRecord, date_format: &str) -> ExpenseResult<Self> {
        let mut amount_column = None;
        let mut category_column = None;
        let mut note_column = None;
        let mut date_column = None;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();

            let (slot, name) = if h.contains("amount") || h.contains("cost") || h == "price" {
                (&mut amount_column, "amount")
            } else if h.contains("category") || h == "type" {
                (&mut category_column, "category")
            } else if h.contains("note") || h.contains("memo") || h.contains("description") {
                (&mut note_column, "note")
            } else if h.contains("date") || h.contains("created") || h == "when" {
                (&mut date_column, "date")
            } else {
                continue;
            };

            if slot.replace(idx).is_some() {
                return Err(ExpenseError::Import(format!(
                    "More than one {} column in CSV header",
                    name
                )));
            }
        }

        let required = |column: Option<usize>, name: &str| {
            column.ok_or_else(|| {
                ExpenseError::Import(format!("CSV header has no {} column", name))
            })
        };

        Ok(Self {
            amount_column: required(amount_column, "amount")?,
            category_column: required(category_column, "category")?,
            note_column,
            date_column,
            date_format: date_format.to_string(),
        })
    }
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRejection {
    /// 1-based line number in the file, counting the header
    pub line: usize,
    pub message: String,
}

/// Outcome of parsing or importing a CSV file
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: Vec<Expense>,
    pub rejected: Vec<ImportRejection>,
}

impl ImportResult {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    date_format: String,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            date_format: ColumnMapping::default().date_format,
        }
    }

    /// Try this format first for date-only values
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Parse a CSV with a header row into validated expenses
    ///
    /// Nothing is stored. The column layout is detected from the header.
    pub fn parse_csv<R: Read>(&self, reader: R) -> ExpenseResult<ImportResult> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| ExpenseError::Import(format!("Failed to read CSV header: {}", e)))?
            .clone();
        let mapping = ColumnMapping::from_headers(&headers, &self.date_format)?;
        tracing::debug!(?mapping, "detected import columns");

        self.parse_csv_from_reader(&mut reader, &mapping)
    }

    /// Parse records from an already-configured reader
    pub fn parse_csv_from_reader<R: Read>(
        &self,
        reader: &mut Reader<R>,
        mapping: &ColumnMapping,
    ) -> ExpenseResult<ImportResult> {
        let now = Utc::now();
        let mut result = ImportResult::default();

        for (idx, record) in reader.records().enumerate() {
            // Header is line 1
            let line = idx + 2;
            let parsed = record
                .map_err(|e| format!("unreadable record: {}", e))
                .and_then(|record| {
                    parse_record(&record, mapping, now).map_err(|e| e.to_string())
                });

            match parsed {
                Ok(expense) => result.imported.push(expense),
                Err(message) => {
                    tracing::warn!(line, %message, "rejected import row");
                    result.rejected.push(ImportRejection { line, message });
                }
            }
        }

        Ok(result)
    }

    /// Import a CSV file into storage
    ///
    /// Valid rows are saved and audited; rejected rows are returned.
    pub fn import_file(&self, path: &Path) -> ExpenseResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            ExpenseError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let result = self.parse_csv(file)?;
        self.commit(&result, &path.display().to_string())?;
        Ok(result)
    }

    /// Store the parsed expenses of an import
    pub fn commit(&self, result: &ImportResult, source: &str) -> ExpenseResult<()> {
        for expense in &result.imported {
            self.storage.expenses.insert(expense.clone())?;
        }
        self.storage.expenses.save()?;

        for expense in &result.imported {
            self.storage
                .log_create(expense.id().to_string(), Some(expense.to_string()), expense)?;
        }
        self.storage
            .log_import(source, result.imported.len(), result.rejected.len())?;

        tracing::info!(
            source,
            imported = result.imported.len(),
            rejected = result.rejected.len(),
            "import finished"
        );
        Ok(())
    }
}

fn parse_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
    now: DateTime<Utc>,
) -> Result<Expense, ValidationError> {
    let amount_raw = record.get(mapping.amount_column).unwrap_or("");
    let amount = parse_amount(amount_raw)?;

    let category = Category::new(record.get(mapping.category_column).unwrap_or(""))?;

    let note = mapping
        .note_column
        .and_then(|col| record.get(col))
        .map(str::to_string);

    let created_at = match mapping
        .date_column
        .and_then(|col| record.get(col))
        .filter(|raw| !raw.trim().is_empty())
    {
        Some(raw) => parse_date(raw, &mapping.date_format)?,
        None => now,
    };

    Ok(Expense::with_timestamp(amount, category, note, created_at))
}

/// Amounts may group whole units in threes with commas, as in "1,200.00"
///
/// A comma anywhere else is an error, so "12,50" is never read as 1250.
fn parse_amount(raw: &str) -> Result<Money, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidAmount(trimmed.to_string());

    if !trimmed.contains(',') {
        return Money::parse(trimmed);
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if fraction.contains(',') {
        return Err(invalid());
    }
    let digits = whole.strip_prefix('-').unwrap_or(whole);
    let digits = digits.strip_prefix('$').unwrap_or(digits);

    let mut groups = digits.split(',');
    let leading_ok = groups
        .next()
        .map_or(false, |g| (1..=3).contains(&g.len()));
    let grouped_ok = leading_ok && groups.all(|g| g.len() == 3);
    if !grouped_ok || !digits.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return Err(invalid());
    }

    Money::parse(&trimmed.replace(',', "")).map_err(|_| invalid())
}

/// Full RFC 3339 timestamps are taken as-is; bare dates mean local midnight
fn parse_date(raw: &str, primary_format: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let formats = [primary_format, "%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| local_midnight(&Local, date).with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidTimestamp(raw.to_string()))
}
