//! Preview selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which simulator a hint selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewKind {
    /// Existence check of `rm` targets.
    Rm,
    /// `find` without `-delete`.
    FindDelete,
    /// `git clean -n -d`.
    GitClean,
}

impl PreviewKind {
    /// Short label (`rm`, `find-delete`, `git-clean`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rm => "rm",
            Self::FindDelete => "find-delete",
            Self::GitClean => "git-clean",
        }
    }
}

impl fmt::Display for PreviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A simulator plus the parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PreviewHint {
    /// `rm` with its already-resolved targets.
    Rm {
        /// Resolved absolute target paths.
        targets: Vec<PathBuf>,
    },
    /// `find` invocation carrying `-delete`.
    FindDelete {
        /// The full original argument vector, starting with `find`.
        args: Vec<String>,
    },
    /// `git clean` invocation.
    GitClean {
        /// The full original argument vector, starting with `git clean`.
        args: Vec<String>,
    },
}

impl PreviewHint {
    /// The simulator this hint selects.
    #[must_use]
    pub fn kind(&self) -> PreviewKind {
        match self {
            Self::Rm { .. } => PreviewKind::Rm,
            Self::FindDelete { .. } => PreviewKind::FindDelete,
            Self::GitClean { .. } => PreviewKind::GitClean,
        }
    }
}
