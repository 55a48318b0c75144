//! Custom error types for the expense tracker
//!
//! `ValidationError` is the only failure the filtering and aggregation core
//! can report. `ExpenseError` wraps it together with the storage, config and
//! export failures of the surrounding application.

use thiserror::Error;

/// Malformed expense input
///
/// Raised when a raw row or a form submission cannot be turned into a typed
/// record. Never coerced to a default value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount is required")]
    MissingAmount,

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("amount cannot be negative: {0}")]
    NegativeAmount(String),

    #[error("category is required")]
    MissingCategory,

    #[error("category '{label}' is longer than {max} characters")]
    CategoryTooLong { label: String, max: usize },

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid expense id '{0}'")]
    InvalidId(String),

    #[error("expense id '{0}' matches more than one expense")]
    AmbiguousId(String),

    #[error("unknown filter '{0}' (expected all, week or month)")]
    UnknownFilter(String),

    #[error("total is too large to represent")]
    TotalOutOfRange,
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed expense input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("bad settings".into());
        assert_eq!(err.to_string(), "Configuration error: bad settings");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("exp-1234abcd");
        assert_eq!(err.to_string(), "Expense not found: exp-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_wraps() {
        let err: ExpenseError = ValidationError::InvalidAmount("ten".into()).into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: invalid amount 'ten'");
    }

    #[test]
    fn test_category_too_long_display() {
        let err = ValidationError::CategoryTooLong {
            label: "x".into(),
            max: 64,
        };
        assert_eq!(err.to_string(), "category 'x' is longer than 64 characters");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
