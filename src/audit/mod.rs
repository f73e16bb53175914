//! Audit logging for basket
//!
//! Every create, update and delete of a category, budget item, shopping list
//! flag or spending limit is recorded with before/after values in an
//! append-only JSONL file.
//!
//! The in-memory core only collects [`AuditEntry`] values; the caller writes
//! them with [`AuditLogger`] once the change has been saved.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log_batch(&basket.take_audit_entries())?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
