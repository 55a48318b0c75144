//! Category label
//!
//! Expenses are grouped purely by the text of their category, so the label
//! is normalised once on the way in (trimmed, never empty) and compared
//! verbatim afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Maximum number of characters in a category label
pub const MAX_CATEGORY_LEN: usize = 64;

/// A non-empty, trimmed category label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub fn new(label: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if trimmed.chars().count() > MAX_CATEGORY_LEN {
            return Err(ValidationError::CategoryTooLong {
                label: trimmed.to_string(),
                max: MAX_CATEGORY_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_label() {
        let cat = Category::new("  Food ").unwrap();
        assert_eq!(cat.as_str(), "Food");
    }

    #[test]
    fn test_rejects_blank() {
        assert_eq!(Category::new(""), Err(ValidationError::MissingCategory));
        assert_eq!(Category::new("   \t"), Err(ValidationError::MissingCategory));
    }

    #[test]
    fn test_rejects_long_label() {
        let long = "x".repeat(MAX_CATEGORY_LEN + 1);
        assert!(matches!(
            Category::new(&long),
            Err(ValidationError::CategoryTooLong { .. })
        ));
        assert!(Category::new("x".repeat(MAX_CATEGORY_LEN)).is_ok());
    }

    #[test]
    fn test_case_sensitive_grouping() {
        assert_ne!(Category::new("food").unwrap(), Category::new("Food").unwrap());
    }

    #[test]
    fn test_serde_validates() {
        let cat: Category = serde_json::from_str("\"Rent\"").unwrap();
        assert_eq!(cat.as_str(), "Rent");
        assert!(serde_json::from_str::<Category>("\"  \"").is_err());
    }
}
