//! On-disk layout for clash state.
//!
//! Inside a repository, state lives next to the code:
//!
//! ```text
//! <repo>/.clash/
//! └── audit.log        (append-only JSON lines ledger)
//! ```
//!
//! Outside a repository it falls back to the home-level directory
//! (`~/.clash/` or `$CLASH_HOME`), which has the same layout.

use std::path::{Path, PathBuf};

use crate::context::ContextSnapshot;
use crate::error::{ContextError, ContextResult};

/// Name of the per-repository and per-user state directory.
pub const STATE_DIR_NAME: &str = ".clash";

/// Ledger file name inside a state directory.
pub const AUDIT_LOG_NAME: &str = "audit.log";

/// Home-level clash directory (`~/.clash/` or `$CLASH_HOME`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashHome {
    root: PathBuf,
}

impl ClashHome {
    /// Resolve the home-level directory.
    ///
    /// Checks `$CLASH_HOME` first, then falls back to `<home>/.clash/`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::InvalidHome`] if `$CLASH_HOME` is relative and
    /// [`ContextError::HomeNotFound`] if no home directory can be found.
    pub fn resolve() -> ContextResult<Self> {
        let custom = std::env::var("CLASH_HOME").ok();
        Self::resolve_with(custom.as_deref(), crate::paths::home_dir().as_deref())
    }

    /// Resolve from explicit inputs instead of the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClashHome::resolve`].
    pub fn resolve_with(custom: Option<&str>, home: Option<&Path>) -> ContextResult<Self> {
        if let Some(custom) = custom.filter(|c| !c.is_empty()) {
            let root = PathBuf::from(custom);
            if !root.is_absolute() {
                return Err(ContextError::InvalidHome(format!(
                    "{custom} is not an absolute path"
                )));
            }
            return Ok(Self { root });
        }

        let home = home.ok_or(ContextError::HomeNotFound)?;
        Ok(Self {
            root: home.join(STATE_DIR_NAME),
        })
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ledger file under the home directory.
    #[must_use]
    pub fn audit_log_path(&self) -> PathBuf {
        self.root.join(AUDIT_LOG_NAME)
    }
}

/// Ledger location for an invocation: `<repo>/.clash/audit.log` inside a
/// repository, otherwise the home-level ledger.
///
/// # Errors
///
/// Outside a repository, fails like [`ClashHome::resolve`].
pub fn audit_log_path_for(ctx: &ContextSnapshot) -> ContextResult<PathBuf> {
    match ctx.repo_root.as_deref() {
        Some(root) => Ok(root.join(STATE_DIR_NAME).join(AUDIT_LOG_NAME)),
        None => Ok(ClashHome::resolve()?.audit_log_path()),
    }
}
