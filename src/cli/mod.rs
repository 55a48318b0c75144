//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod export;
pub mod expense;
pub mod import;
pub mod report;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use import::handle_import_command;
pub use report::{handle_history_command, handle_summary_command, SummaryArgs};
