//! Expense CLI commands
//!
//! Add, list, show, edit and delete expenses. Adds and edits go through
//! the entry form so the same presence and sign checks apply everywhere.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, DisplayOptions};
use crate::error::ExpenseResult;
use crate::models::{EntryForm, FilterMode};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g. "12.50" or "$12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label
        category: String,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List expenses in a time window
    #[command(alias = "ls")]
    List {
        /// Time window: all, week or month (defaults to the configured filter)
        #[arg(short, long)]
        filter: Option<FilterMode>,
    },
    /// Show expense details
    Show {
        /// Expense ID (full or short, e.g. exp-1a2b3c4d)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New note
        #[arg(short, long, conflicts_with = "clear_note")]
        note: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear_note: bool,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage).with_week_start(settings.week_start()?);
    let options = DisplayOptions::from(settings);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            note,
        } => {
            let form = EntryForm {
                amount,
                category,
                note: note.unwrap_or_default(),
                ..EntryForm::new()
            };
            let expense = service.submit(&form)?;

            println!("Created expense:");
            print!("{}", indent(&format_expense_details(&expense, &options)));
        }

        ExpenseCommands::List { filter } => {
            let mode = filter.unwrap_or(settings.default_filter);
            let expenses = service.list(mode)?;

            println!("{}", mode.label());
            print!("{}", format_expense_list(&expenses, &options));
            println!("\nShowing {} expenses", expenses.len());
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&id)?;
            print!("{}", format_expense_details(&expense, &options));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            note,
            clear_note,
        } => {
            let expense = service.find(&id)?;

            if amount.is_none() && category.is_none() && note.is_none() && !clear_note {
                println!("No changes specified for expense {}", expense.id());
                return Ok(());
            }

            let mut form = EntryForm::edit(&expense);
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(note) = note {
                form.note = note;
            }
            if clear_note {
                form.note.clear();
            }

            let updated = service.submit(&form)?;

            println!("Updated expense:");
            print!("{}", indent(&format_expense_details(&updated, &options)));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.find(&id)?;
            let deleted = service.delete(expense.id())?;
            println!("Deleted expense {} ({})", deleted.id(), deleted);
        }
    }

    Ok(())
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}\n", line)).collect()
}
