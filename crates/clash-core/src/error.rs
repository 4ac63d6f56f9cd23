//! Context detection errors.

use thiserror::Error;

/// Errors that can occur while capturing the invocation environment.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The current working directory could not be determined.
    #[error("failed to determine working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// No home directory could be located.
    #[error("neither CLASH_HOME nor a user home directory is available")]
    HomeNotFound,

    /// `CLASH_HOME` is set but unusable.
    #[error("invalid CLASH_HOME: {0}")]
    InvalidHome(String),
}

/// Result type for context operations.
pub type ContextResult<T> = Result<T, ContextError>;
