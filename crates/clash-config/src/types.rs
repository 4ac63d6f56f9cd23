//! Policy types.
//!
//! Every struct is `#[serde(default)]`, so a key missing from a document
//! deserializes to an empty list, zero or `false`. The merge treats those
//! values as "not set" and keeps the base layer.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// The effective ruleset for one invocation.
///
/// Command lists are matched case-insensitively; see the ladder in
/// `clash-approval` for how each list is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Preview and risk limits.
    pub thresholds: Thresholds,
    /// Path patterns (`~`, `$VAR` and literal prefixes) that must not be touched.
    pub protected_paths: Vec<String>,
    /// Read-only command lines that skip signal accumulation.
    pub allow_commands: Vec<String>,
    /// Command-name prefixes that are always refused.
    pub block_commands: Vec<String>,
    /// Command names that always need confirmation.
    pub confirm_commands: Vec<String>,
    /// Command names that talk to the network.
    pub network_egress: Vec<String>,
    /// Package-manager command names.
    pub package_managers: Vec<String>,
    /// Optional second opinion for CONFIRM verdicts.
    pub arbiter: ArbiterConfig,
    /// Behavioural toggles.
    pub options: PolicyOptions,
}

impl Policy {
    /// Render the policy as a YAML document.
    ///
    /// Parsing the output yields an identical policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RenderError`] if serialization fails.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::RenderError)
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Numeric limits. Zero means "not set" in an override document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Preview counts above this are reported as a mass deletion.
    pub delete_count: usize,
    /// Reserved limit for modifying commands. Parsed and merged, never
    /// enforced.
    pub modify_count: usize,
    /// Maximum number of sample items in a preview.
    pub preview_sample: usize,
}

// ---------------------------------------------------------------------------
// ArbiterConfig
// ---------------------------------------------------------------------------

/// Secondary arbiter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Whether CONFIRM verdicts are sent to the arbiter.
    pub enabled: bool,
    /// Arbiter provider identifier.
    pub provider: String,
    /// Model name passed to the provider.
    pub model: String,
    /// Name of the environment variable holding the provider credential.
    pub api_key_env: String,
}

impl ArbiterConfig {
    /// Whether any of the string fields carries a value.
    #[must_use]
    pub fn has_settings(&self) -> bool {
        !self.provider.is_empty() || !self.model.is_empty() || !self.api_key_env.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PolicyOptions
// ---------------------------------------------------------------------------

/// Behavioural toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOptions {
    /// Tolerate command targets outside the repository root.
    pub allow_outside_repo: bool,
    /// Refuse break-glass while the working tree has changes.
    pub require_clean_tree_for_break_glass: bool,
}
