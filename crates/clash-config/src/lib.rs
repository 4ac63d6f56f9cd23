//! Policy configuration for the clash command gate.
//!
//! This crate provides a single [`Policy`] type: the command lists,
//! protected paths, thresholds and options the decision ladder reads.
//!
//! # Usage
//!
//! ```rust,no_run
//! use clash_config::Policy;
//!
//! let loaded = Policy::load(None, std::path::Path::new(".")).unwrap();
//! println!("policy from {}", loaded.source);
//! print!("{}", loaded.policy.to_yaml().unwrap());
//! ```
//!
//! # Precedence
//!
//! 1. `--policy <path>` if given, else `<repo root>/clash.yaml`
//! 2. Embedded defaults (`defaults.yaml` compiled into the binary)
//!
//! The override is merged field by field; see [`merge`] for the rules.
//!
//! # Design
//!
//! This crate has **no dependencies on other internal clash crates**. It
//! only depends on `serde`, `serde_yaml`, `thiserror` and `tracing`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Configuration error types.
pub mod error;
/// Policy file discovery and loading.
pub mod loader;
/// Override merge rules.
pub mod merge;
/// Policy struct definitions.
pub mod types;
/// Post-merge validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{DEFAULT_POLICY_YAML, LoadedPolicy, POLICY_FILE_NAME, PolicySource};
pub use types::*;

impl Policy {
    /// Load the effective policy: defaults merged with the discovered
    /// override.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the override is malformed or the merged
    /// policy fails validation.
    pub fn load(
        explicit: Option<&std::path::Path>,
        root: &std::path::Path,
    ) -> ConfigResult<LoadedPolicy> {
        loader::load(explicit, root)
    }

    /// The embedded default policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the embedded document is malformed.
    pub fn defaults() -> ConfigResult<Self> {
        loader::default_policy()
    }
}
