use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_expense_command, handle_export_command, handle_history_command, handle_import_command,
    handle_summary_command, ExpenseCommands, ExportArgs, SummaryArgs,
};
use expense_tracker::config::paths::DATA_DIR_ENV;
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Record expenses and see where the money went",
    long_about = "A local expense tracker. Record amounts by category, list them \
                  for this week or this month, and see per-category totals."
)]
struct Cli {
    /// Directory holding config.json, audit.log and data/
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show overall and per-category totals
    Summary(SummaryArgs),

    /// Export expenses to CSV, JSON or YAML
    Export(ExportArgs),

    /// Import expenses from a CSV file
    Import {
        /// CSV file with a header row (amount, category, optional note and date)
        file: PathBuf,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Malformed rows are logged at warn level by the repository and kept on disk
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Summary(args)) => handle_summary_command(&storage, &settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, &settings, args)?,
        Some(Commands::Import { file }) => handle_import_command(&storage, &settings, file)?,
        Some(Commands::History { limit }) => handle_history_command(&storage, limit)?,
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  First day of week: {:?}", settings.week_start()?.weekday());
            println!("  Default filter:    {}", settings.default_filter);
            println!();
            println!("Expenses recorded:   {}", storage.expenses.count()?);
        }
        None => {
            println!("Expense Tracker - record and total your spending");
            println!();
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so they never mix with exported data
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
