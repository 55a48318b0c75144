//! Expense entry form
//!
//! The form collects raw text for amount, category and note. `FormMode`
//! records whether a submission creates a new expense or edits an existing
//! one, so there is no nullable "editing id" to check.

use super::category::Category;
use super::expense::{Expense, ExpenseEdit, NewExpense};
use super::ids::ExpenseId;
use super::money::Money;
use crate::error::ValidationError;

/// Whether the form is creating a new expense or editing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(ExpenseId),
}

/// A validated form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewExpense),
    Update(ExpenseId, ExpenseEdit),
}

/// Raw entry form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub mode: FormMode,
    pub amount: String,
    pub category: String,
    pub note: String,
    /// Amount the expense had when the form was opened for editing
    pub prefilled_amount: Option<Money>,
}

impl EntryForm {
    /// Blank form for a new expense
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing expense
    pub fn edit(expense: &Expense) -> Self {
        Self {
            mode: FormMode::Editing(expense.id()),
            amount: expense.amount.to_decimal_string(),
            category: expense.category.to_string(),
            note: expense.note.clone().unwrap_or_default(),
            prefilled_amount: Some(expense.amount),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Reset to a blank creating form
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check the inputs and build the create or update request
    ///
    /// Amount and category are required. A negative amount is rejected
    /// unless it is the unchanged amount of the expense being edited.
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let amount = Money::parse(&self.amount)?;
        if amount.is_negative() && self.prefilled_amount != Some(amount) {
            return Err(ValidationError::NegativeAmount(self.amount.trim().to_string()));
        }
        let category = Category::new(&self.category)?;
        let note = Some(self.note.trim().to_string()).filter(|n| !n.is_empty());

        Ok(match self.mode {
            FormMode::Creating => Submission::Create(NewExpense {
                amount,
                category,
                note,
            }),
            FormMode::Editing(id) => Submission::Update(
                id,
                ExpenseEdit {
                    amount: Some(amount),
                    category: Some(category),
                    note: Some(note),
                },
            ),
        })
    }
}
