//! Summary and history commands

use std::io;

use clap::Args;

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::models::FilterMode;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Arguments for `expense summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Time window: all, week or month (defaults to the configured filter)
    #[arg(short, long)]
    pub filter: Option<FilterMode>,

    /// Print the per-category totals as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

/// Print overall and per-category totals
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage).with_week_start(settings.week_start()?);
    let mode = args.filter.unwrap_or(settings.default_filter);
    let totals = service.summary(mode)?;

    if args.csv {
        totals.export_csv(io::stdout().lock())?;
    } else {
        print!(
            "{}",
            totals.format_terminal(
                &format!("Expense Summary: {}", mode.label()),
                &settings.currency_symbol
            )
        );
    }

    Ok(())
}

/// Print the most recent audit log entries
pub fn handle_history_command(storage: &Storage, limit: usize) -> ExpenseResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
