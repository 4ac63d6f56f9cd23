//! Clash Telemetry - logging for the clash command gate.
//!
//! Logs always go to stderr so they never mix with the wrapped command's
//! stdout.
//!
//! # Example
//!
//! ```rust,no_run
//! use clash_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), clash_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("clash_preview=trace");
//!
//! setup_logging(&config)?;
//! tracing::debug!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LOG_ENV_VAR, LogConfig, LogFormat, setup_logging};
