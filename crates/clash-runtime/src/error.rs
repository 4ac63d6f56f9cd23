//! Runtime error types.

use thiserror::Error;

/// Errors that abort an invocation.
///
/// Blocked, cancelled and failed commands are not errors; they are
/// outcomes recorded in the ledger.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The invocation context could not be captured.
    #[error("context error: {0}")]
    Context(#[from] clash_core::ContextError),

    /// The ledger entry could not be written.
    #[error("audit error: {0}")]
    Audit(#[from] clash_audit::AuditError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
