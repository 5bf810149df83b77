//! Audit logging for the budget ledger
//!
//! Records every create, update and delete of a ledger row in an append-only
//! JSONL log, together with the month figures the change produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_ledger::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(
//!     &AuditEntry::created(EntityType::Spend, spend.id.value(), &spend.title, &spend)
//!         .in_month(&month),
//! )?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{field_changes, FieldChange};
pub use entry::{AuditEntry, EntityType, MonthImpact, Operation};
pub use logger::AuditLogger;
