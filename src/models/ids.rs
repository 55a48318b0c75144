//! Strongly-typed expense identifier
//!
//! Wraps a UUID so an expense id cannot be confused with any other string
//! or UUID flowing through the application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

const DISPLAY_PREFIX: &str = "exp-";

/// Unique, stable identifier assigned when an expense is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form used in listings, e.g. `exp-1a2b3c4d`
    pub fn short(&self) -> String {
        let simple = self.0.simple().to_string();
        format!("{}{}", DISPLAY_PREFIX, &simple[..8])
    }

    /// Check whether a user-typed identifier refers to this id
    ///
    /// Accepts the full UUID, or a prefix of it with or without `exp-`.
    pub fn matches(&self, identifier: &str) -> bool {
        let needle = identifier.trim();
        let needle = needle.strip_prefix(DISPLAY_PREFIX).unwrap_or(needle);
        if needle.is_empty() {
            return false;
        }
        let needle = needle.to_ascii_lowercase();
        self.0.to_string().starts_with(&needle) || self.0.simple().to_string().starts_with(&needle)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = ValidationError;

    /// Parse a full UUID, optionally prefixed with `exp-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix(DISPLAY_PREFIX).unwrap_or(trimmed);
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(trimmed.to_string()))
    }
}
