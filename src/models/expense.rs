//! Expense record model
//!
//! An `Expense` is fully validated. The untyped `ExpenseRow` is what the
//! JSON store and CSV import hand over; converting a row into an expense is
//! the single place malformed amounts, categories and timestamps are caught.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use crate::error::ValidationError;

/// A single spending entry
///
/// `id` and `created_at` are fixed at creation. Only amount, category and
/// note can change, and only through [`Expense::apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseRow", into = "ExpenseRow")]
pub struct Expense {
    id: ExpenseId,
    pub amount: Money,
    pub category: Category,
    pub note: Option<String>,
    created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense stamped with the current time
    pub fn new(amount: Money, category: Category, note: Option<String>) -> Self {
        Self::with_timestamp(amount, category, note, Utc::now())
    }

    /// Create a new expense with an explicit creation time
    pub fn with_timestamp(
        amount: Money,
        category: Category,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category,
            note: normalize_note(note),
            created_at,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrite the fields named in `edit`
    ///
    /// Returns a human-readable list of the fields that actually changed.
    pub fn apply_edit(&mut self, edit: ExpenseEdit) -> Vec<String> {
        let mut changes = Vec::new();

        if let Some(amount) = edit.amount {
            if amount != self.amount {
                changes.push(format!("amount: {} -> {}", self.amount, amount));
                self.amount = amount;
            }
        }

        if let Some(category) = edit.category {
            if category != self.category {
                changes.push(format!("category: '{}' -> '{}'", self.category, category));
                self.category = category;
            }
        }

        // note: Option<Option<String>>
        // - None: no change
        // - Some(None): clear note
        // - Some(Some(text)): set note
        if let Some(note) = edit.note {
            let note = normalize_note(note);
            if note != self.note {
                changes.push("note changed".to_string());
                self.note = note;
            }
        }

        changes
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Input for creating a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub category: Category,
    pub note: Option<String>,
}

/// Partial update of an existing expense
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseEdit {
    pub amount: Option<Money>,
    pub category: Option<Category>,
    pub note: Option<Option<String>>,
}

impl ExpenseEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(Some(note.into()));
        self
    }

    pub fn clear_note(mut self) -> Self {
        self.note = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.note.is_none()
    }
}

/// Untyped expense as stored on disk or read from a CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub amount: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: String,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = ValidationError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        let id = row.id.parse::<ExpenseId>()?;
        let amount = Money::parse(&row.amount)?;
        let category = Category::new(&row.category)?;
        let created_at = parse_timestamp(&row.created_at)?;

        Ok(Self {
            id,
            amount,
            category,
            note: normalize_note(row.note),
            created_at,
        })
    }
}

impl From<Expense> for ExpenseRow {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.as_uuid().to_string(),
            amount: expense.amount.to_decimal_string(),
            category: expense.category.into(),
            note: expense.note,
            created_at: expense
                .created_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidTimestamp(raw.to_string()))
}
