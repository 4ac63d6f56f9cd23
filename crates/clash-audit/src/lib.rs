//! Clash Audit - the append-only decision ledger.
//!
//! This crate provides:
//! - [`AuditEntry`]: one record per invocation, whatever the outcome
//! - [`AuditLedger`]: a JSON-lines file with locked appends and lookup by id
//!
//! # Example
//!
//! ```
//! use clash_audit::{AuditEntry, AuditLedger, Outcome};
//! use clash_core::{ContextSnapshot, Decision};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let ledger = AuditLedger::open(dir.path().join("audit.log")).unwrap();
//!
//! let ctx = ContextSnapshot::new(dir.path());
//! let entry = AuditEntry::new(&["ls".to_string()], &ctx, Decision::Allow, Outcome::Executed);
//! ledger.record(&entry).unwrap();
//!
//! assert_eq!(ledger.find(&entry.id).unwrap().command, "ls");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod entry;
pub mod error;
pub mod ledger;

pub use entry::{Approver, AuditEntry, Outcome, PreviewRecord};
pub use error::{AuditError, AuditResult};
pub use ledger::AuditLedger;
