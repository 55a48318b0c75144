//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_json, export_yaml};
use crate::models::FilterMode;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV, one row per expense
    Csv,
    /// JSON with totals and schema version
    Json,
    /// YAML with totals and schema version
    Yaml,
}

/// Arguments for `expense export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Time window: all, week or month (defaults to the configured filter)
    #[arg(short, long)]
    pub filter: Option<FilterMode>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage).with_week_start(settings.week_start()?);
    let mode = args.filter.unwrap_or(settings.default_filter);
    let expenses = service.list(mode)?;
    let count = expenses.len();

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(expenses, mode, &args, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ExpenseError::Export(e.to_string()))?;

            println!(
                "Exported {} expenses ({}) to: {}",
                count,
                mode.label(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_export(expenses, mode, &args, &mut stdout)?;
            if args.format != ExportFormat::Csv {
                writeln!(stdout).map_err(|e| ExpenseError::Export(e.to_string()))?;
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    expenses: Vec<crate::models::Expense>,
    mode: FilterMode,
    args: &ExportArgs,
    writer: &mut W,
) -> ExpenseResult<()> {
    match args.format {
        ExportFormat::Csv => export_expenses_csv(&expenses, writer),
        ExportFormat::Json => export_json(expenses, mode, writer, args.pretty),
        ExportFormat::Yaml => export_yaml(expenses, mode, writer),
    }
}
