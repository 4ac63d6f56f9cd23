//! Logging configuration and setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{TelemetryError, TelemetryResult};

/// Environment variable holding an `EnvFilter` directive string. When set
/// and non-empty it replaces the configured level and directives.
pub const LOG_ENV_VAR: &str = "CLASH_LOG";

fn init_err<E: std::fmt::Display>(e: E) -> TelemetryError {
    TelemetryError::InitError(e.to_string())
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line output (default).
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level filter (e.g. "warn", "debug").
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Whether to include timestamps.
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Whether to use ANSI colors.
    #[serde(default = "default_true")]
    pub ansi: bool,
    /// Per-target overrides (e.g. `clash_audit=debug`).
    #[serde(default)]
    pub directives: Vec<String>,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            timestamps: true,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a config with the given level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// `debug` when verbose, `warn` otherwise.
    #[must_use]
    pub fn for_verbosity(verbose: bool) -> Self {
        Self::new(if verbose { "debug" } else { "warn" })
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable timestamps.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    fn build_filter(&self, env_override: Option<&str>) -> TelemetryResult<EnvFilter> {
        if let Some(directives) = env_override.map(str::trim).filter(|s| !s.is_empty()) {
            return EnvFilter::try_new(directives).map_err(|e| {
                TelemetryError::ConfigError(format!("invalid {LOG_ENV_VAR}: {e}"))
            });
        }

        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| TelemetryError::ConfigError(e.to_string()))?;
        for directive in &self.directives {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| {
                    TelemetryError::ConfigError(e.to_string())
                },
            )?);
        }
        Ok(filter)
    }
}

/// Install the global subscriber, writing to stderr.
///
/// # Errors
///
/// Returns an error if the level, a directive or `CLASH_LOG` does not parse,
/// or if a subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = config.build_filter(env.as_deref())?;

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(true);

    // Each format yields a distinct layer type, so each arm installs its own.
    match (config.format, config.timestamps) {
        (LogFormat::Pretty, true) => tracing_subscriber::registry()
            .with(filter)
            .with(base.pretty())
            .try_init(),
        (LogFormat::Pretty, false) => tracing_subscriber::registry()
            .with(filter)
            .with(base.pretty().without_time())
            .try_init(),
        (LogFormat::Compact, true) => tracing_subscriber::registry()
            .with(filter)
            .with(base.compact())
            .try_init(),
        (LogFormat::Compact, false) => tracing_subscriber::registry()
            .with(filter)
            .with(base.compact().without_time())
            .try_init(),
        (LogFormat::Json, true) => tracing_subscriber::registry()
            .with(filter)
            .with(base.json())
            .try_init(),
        (LogFormat::Json, false) => tracing_subscriber::registry()
            .with(filter)
            .with(base.json().without_time())
            .try_init(),
    }
    .map_err(init_err)
}
