//! Audit logging
//!
//! Every create, update, delete and import of expenses is recorded with
//! before/after values in an append-only, line-delimited JSON log.
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(expense.id().to_string(), None, &expense))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
