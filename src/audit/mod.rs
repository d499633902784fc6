//! Audit logging
//!
//! Every create, update and delete of a cost record or of the allocation
//! settings is appended to `audit.log` as one JSON line with the before and
//! after state.
//!
//! # Example
//!
//! ```rust,ignore
//! use overhead_cli::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Cost,
//!     cost.id.to_string(),
//!     Some(cost.name.clone()),
//!     &cost,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
