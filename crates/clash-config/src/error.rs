use std::io;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a policy file.
    #[error("Failed to read policy file at {path}: {source}")]
    ReadError {
        /// Path to the policy file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse a YAML policy document.
    #[error("Failed to parse policy file at {path}: {source}")]
    ParseError {
        /// Path (or `<embedded defaults>`) of the document that failed to parse.
        path: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to render a policy as YAML.
    #[error("Failed to render policy: {0}")]
    RenderError(#[source] serde_yaml::Error),

    /// Policy validation failed.
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Field that failed validation.
        field: String,
        /// Validation failure description.
        message: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
