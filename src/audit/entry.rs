//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// A batch of expenses was imported from a file
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log entry
///
/// Records one operation on an expense with optional before/after values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// ID of the affected expense (or the import source for imports)
    pub entity_id: String,

    /// Human-readable description, e.g. "2025-01-15 Food $12.00"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON representation before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_id: String, entity_name: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_id.into(), entity_name)
        }
    }

    pub fn update<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, entity_id.into(), entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_id.into(), entity_name)
        }
    }

    /// Summary entry for a file import
    pub fn import(source: impl Into<String>, imported: usize, rejected: usize) -> Self {
        Self {
            diff_summary: Some(format!("imported {}, rejected {}", imported, rejected)),
            ..Self::new(Operation::Import, source.into(), None)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(Operation::Import.to_string(), "IMPORT");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            "exp-1234abcd",
            Some("Food".to_string()),
            &json!({"category": "Food", "amount": "10.00"}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["amount"], "10.00");
    }

    #[test]
    fn test_update_entry() {
        let entry = AuditEntry::update(
            "exp-1234abcd",
            None,
            &json!({"amount": "10.00"}),
            &json!({"amount": "12.00"}),
            Some("amount: $10.00 -> $12.00".into()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(entry.diff_summary.as_deref(), Some("amount: $10.00 -> $12.00"));
    }

    #[test]
    fn test_import_entry() {
        let entry = AuditEntry::import("bank.csv", 4, 1);
        assert_eq!(entry.operation, Operation::Import);
        assert_eq!(entry.diff_summary.as_deref(), Some("imported 4, rejected 1"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::delete("exp-1234abcd", None, &json!({"amount": "1.00"}));
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"operation\":\"delete\""));
        assert!(!json.contains("\"after\""));
        assert!(!json.contains("\"entity_name\""));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            "exp-1234abcd",
            Some("2025-01-15 Food $12.00".to_string()),
            &json!({}),
            &json!({}),
            Some("note changed".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE exp-1234abcd (2025-01-15 Food $12.00)"));
        assert!(formatted.contains("Changes: note changed"));
    }
}
