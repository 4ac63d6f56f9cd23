//! Audit-related error types.

use std::io;
use thiserror::Error;

/// Errors that can occur with the audit ledger.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Reading or writing the ledger file failed.
    #[error("ledger I/O error at {path}: {source}")]
    StorageError {
        /// Ledger path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The ledger file lock could not be taken.
    #[error("failed to lock ledger at {path}: {source}")]
    LockError {
        /// Ledger path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Entry not found.
    #[error("audit entry not found: {entry_id}")]
    EntryNotFound {
        /// The entry ID that was not found.
        entry_id: String,
    },

    /// The ledger location could not be determined.
    #[error("cannot locate ledger: {0}")]
    Location(#[from] clash_core::ContextError),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
