//! Policy discovery and loading.
//!
//! Implements the `Policy::load()` algorithm:
//! 1. Parse the embedded `defaults.yaml` as the base
//! 2. Pick the override: the explicit path if given, else `<root>/clash.yaml`
//! 3. A missing override file leaves the defaults untouched
//! 4. Merge the override over the base
//! 5. Validate

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::merge::merge;
use crate::types::Policy;
use crate::validate;

/// Embedded default policy document.
pub const DEFAULT_POLICY_YAML: &str = include_str!("defaults.yaml");

/// File name of a repository-local policy override.
pub const POLICY_FILE_NAME: &str = "clash.yaml";

/// Maximum allowed policy file size (1 MB).
const MAX_POLICY_FILE_SIZE: u64 = 1_048_576;

/// Where the effective policy came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// Embedded defaults only.
    Defaults,
    /// Embedded defaults merged with this override file.
    File(PathBuf),
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("built-in defaults"),
            Self::File(path) => write!(f, "{} (merged over defaults)", path.display()),
        }
    }
}

/// A merged policy together with its origin.
#[derive(Debug, Clone)]
pub struct LoadedPolicy {
    /// The effective policy.
    pub policy: Policy,
    /// Where it came from.
    pub source: PolicySource,
}

/// Parse the embedded default policy.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if the embedded document is malformed.
pub fn default_policy() -> ConfigResult<Policy> {
    parse(DEFAULT_POLICY_YAML, "<embedded defaults>")
}

/// Parse a YAML policy document.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] naming `origin` on malformed input.
pub fn parse(text: &str, origin: &str) -> ConfigResult<Policy> {
    // An empty document is a valid override that sets nothing.
    if text.trim().is_empty() {
        return Ok(Policy::default());
    }
    serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })
}

/// Pick the override file: `explicit` if given, else `<root>/clash.yaml` if
/// it exists.
#[must_use]
pub fn discover(explicit: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = root.join(POLICY_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load the effective policy.
///
/// `root` is the repository root, or the working directory outside a
/// repository.
///
/// # Errors
///
/// Returns a [`ConfigError`] if an override file exists but cannot be read
/// or parsed, or if the merged policy fails validation.
pub fn load(explicit: Option<&Path>, root: &Path) -> ConfigResult<LoadedPolicy> {
    let mut policy = default_policy()?;
    let mut source = PolicySource::Defaults;

    if let Some(path) = discover(explicit, root) {
        if let Some(overlay) = try_load_file(&path)? {
            merge(&mut policy, overlay);
            info!(path = %path.display(), "loaded policy override");
            source = PolicySource::File(path);
        }
    }

    validate::validate(&policy)?;
    Ok(LoadedPolicy { policy, source })
}

/// Load a single policy file merged over the defaults.
///
/// Unlike [`load`], a missing file is an error.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Policy> {
    let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })?;
    let mut policy = default_policy()?;
    merge(&mut policy, overlay);
    validate::validate(&policy)?;
    Ok(policy)
}

/// Try to load a file, returning `None` if it doesn't exist.
///
/// Uses a single read to avoid a stat/read race.
fn try_load_file(path: &Path) -> ConfigResult<Option<Policy>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "policy file not found, using defaults");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_POLICY_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "policy file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_POLICY_FILE_SIZE
            ),
        });
    }

    parse(&content, &path.display().to_string()).map(Some)
}
