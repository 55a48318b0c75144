//! Totals report
//!
//! Sums a snapshot of expenses overall and per category. Amounts are added
//! as integer cents, so repeated additions never drift, and negative amounts
//! are summed like any other.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::{Category, Expense, Money};

/// Category sums in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(Category, Money)>,
    index: HashMap<Category, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, appending the category if it is new
    pub fn add(&mut self, category: &Category, amount: Money) -> Result<(), ValidationError> {
        match self.index.get(category) {
            Some(&slot) => {
                let sum = &mut self.entries[slot].1;
                *sum = sum
                    .checked_add(amount)
                    .ok_or(ValidationError::TotalOutOfRange)?;
            }
            None => {
                self.index.insert(category.clone(), self.entries.len());
                self.entries.push((category.clone(), amount));
            }
        }
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        let category = Category::new(category).ok()?;
        self.index.get(&category).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, Money)> {
        self.entries.iter().map(|(c, m)| (c, *m))
    }

    /// Category labels in order of first appearance
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(c, _)| c)
    }
}

/// Overall and per-category totals of a set of expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: Money,
    pub by_category: CategoryTotals,
    pub count: usize,
}

/// Fold a snapshot into its totals
///
/// Fails with `TotalOutOfRange` if the overall or a category sum leaves the
/// range of `Money`.
pub fn aggregate_totals(records: &[Expense]) -> Result<Totals, ValidationError> {
    records.iter().try_fold(Totals::default(), |mut totals, expense| {
        totals.total = totals
            .total
            .checked_add(expense.amount)
            .ok_or(ValidationError::TotalOutOfRange)?;
        totals.by_category.add(&expense.category, expense.amount)?;
        totals.count += 1;
        Ok(totals)
    })
}

impl Totals {
    /// Share of the overall total for a category amount, in percent
    pub fn percentage(&self, amount: Money) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            (amount.cents() as f64 / self.total.cents() as f64) * 100.0
        }
    }

    /// Format the totals for terminal display
    pub fn format_terminal(&self, title: &str, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", title));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.by_category.is_empty() {
            output.push_str("No expenses recorded.\n");
        } else {
            output.push_str(&format!("{:<28} {:>12} {:>7}\n", "Category", "Amount", "%"));
            output.push_str(&"-".repeat(50));
            output.push('\n');

            for (category, amount) in self.by_category.iter() {
                output.push_str(&format!(
                    "{:<28} {:>12} {:>6.1}%\n",
                    truncate(category.as_str(), 28),
                    amount.format_with_symbol(currency_symbol),
                    self.percentage(amount)
                ));
            }
            output.push_str(&"-".repeat(50));
            output.push('\n');
        }

        output.push_str(&format!(
            "{:<28} {:>12}\n",
            format!("TOTAL ({} expenses)", self.count),
            self.total.format_with_symbol(currency_symbol)
        ));

        output
    }

    /// Export the totals as CSV: one row per category plus a total row
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let map_err = |e: csv::Error| ExpenseError::Export(e.to_string());

        csv_writer
            .write_record(["Category", "Amount"])
            .map_err(map_err)?;
        for (category, amount) in self.by_category.iter() {
            csv_writer
                .write_record([category.as_str(), amount.to_decimal_string().as_str()])
                .map_err(map_err)?;
        }
        csv_writer
            .write_record(["TOTAL", self.total.to_decimal_string().as_str()])
            .map_err(map_err)?;

        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
