//! Expense display formatting
//!
//! Formats expenses for terminal output as register rows and detail views.

use crate::config::Settings;
use crate::models::Expense;

/// How amounts and dates are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl From<&Settings> for DisplayOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, options: &DisplayOptions) -> String {
    let note = expense.note.as_deref().unwrap_or("");

    format!(
        "{:12} {:10} {:20} {:>12}  {}",
        expense.id().to_string(),
        expense
            .created_at()
            .with_timezone(&chrono::Local)
            .format(&options.date_format)
            .to_string(),
        truncate(expense.category.as_str(), 20),
        expense.amount.format_with_symbol(&options.currency_symbol),
        truncate(note, 30).trim_end()
    )
}

/// Format expenses as a register with a header
pub fn format_expense_list(expenses: &[Expense], options: &DisplayOptions) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:20} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, options));
        output.push('\n');
    }

    output
}

/// Format all fields of an expense
pub fn format_expense_details(expense: &Expense, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id()));
    output.push_str(&format!("UUID:      {}\n", expense.id().as_uuid()));
    output.push_str(&format!(
        "Created:   {}\n",
        expense
            .created_at()
            .with_timezone(&chrono::Local)
            .format(&format!("{} %H:%M:%S", options.date_format))
    ));
    output.push_str(&format!(
        "Amount:    {}\n",
        expense.amount.format_with_symbol(&options.currency_symbol)
    ));
    output.push_str(&format!("Category:  {}\n", expense.category));

    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:      {}\n", note));
    }

    output
}

/// Pad or cut a string to a fixed display width
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    fn sample() -> Expense {
        Expense::new(
            Money::from_cents(1250),
            Category::new("Groceries").unwrap(),
            Some("weekly shop".into()),
        )
    }

    #[test]
    fn test_format_row() {
        let expense = sample();
        let row = format_expense_row(&expense, &DisplayOptions::default());

        assert!(row.starts_with(&expense.id().to_string()));
        assert!(row.contains("Groceries"));
        assert!(row.contains("$12.50"));
        assert!(row.ends_with("weekly shop"));
    }

    #[test]
    fn test_currency_symbol_option() {
        let options = DisplayOptions {
            currency_symbol: "€".into(),
            ..DisplayOptions::default()
        };
        let row = format_expense_row(&sample(), &options);
        assert!(row.contains("€12.50"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_expense_list(&[], &DisplayOptions::default()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_list_has_header_and_rows() {
        let list = format_expense_list(&[sample(), sample()], &DisplayOptions::default());
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
    }

    #[test]
    fn test_details() {
        let expense = sample();
        let details = format_expense_details(&expense, &DisplayOptions::default());

        assert!(details.contains(&format!("Expense:   {}", expense.id())));
        assert!(details.contains("Amount:    $12.50"));
        assert!(details.contains("Note:      weekly shop"));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Café", 6), "Café  ");
        assert_eq!(truncate("Restaurants élégants", 10), "Restaur...");
    }
}
