//! Invocation context snapshot.
//!
//! A [`ContextSnapshot`] is captured once per invocation and never mutated.
//! The classifier and the preview engine consume it as pure input.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::{ContextError, ContextResult};

/// Counts from `git status --porcelain`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSummary {
    /// Tracked files with staged or unstaged modifications.
    pub changed: usize,
    /// Untracked files.
    pub untracked: usize,
}

impl GitSummary {
    /// Create a summary from explicit counts.
    #[must_use]
    pub fn new(changed: usize, untracked: usize) -> Self {
        Self { changed, untracked }
    }

    /// Whether the working tree has any changed or untracked file.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.changed > 0 || self.untracked > 0
    }

    /// Parse `git status --porcelain` output.
    #[must_use]
    pub fn from_porcelain(output: &str) -> Self {
        let mut summary = Self::default();
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            if line.starts_with("??") {
                summary.untracked = summary.untracked.saturating_add(1);
            } else {
                summary.changed = summary.changed.saturating_add(1);
            }
        }
        summary
    }
}

/// Read-only facts about the environment a command is issued in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Working directory the command runs in.
    pub cwd: PathBuf,
    /// Repository root, if the working directory is inside one.
    pub repo_root: Option<PathBuf>,
    /// Changed/untracked counts (zero outside a repository).
    pub git: GitSummary,
}

impl ContextSnapshot {
    /// Snapshot for a directory that is not inside a repository.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            repo_root: None,
            git: GitSummary::default(),
        }
    }

    /// Attach a repository root.
    #[must_use]
    pub fn with_repo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.repo_root = Some(root.into());
        self
    }

    /// Attach working-tree counts.
    #[must_use]
    pub fn with_git(mut self, git: GitSummary) -> Self {
        self.git = git;
        self
    }

    /// Whether the working directory is inside a repository.
    #[must_use]
    pub fn in_repo(&self) -> bool {
        self.repo_root.is_some()
    }

    /// The repository root, or the working directory outside a repository.
    #[must_use]
    pub fn root_or_cwd(&self) -> &Path {
        self.repo_root.as_deref().unwrap_or(&self.cwd)
    }

    /// Capture the snapshot for the current process.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::CurrentDir`] if the working directory cannot
    /// be determined. Git failures are not errors; they yield zero counts.
    pub fn detect() -> ContextResult<Self> {
        let cwd = std::env::current_dir().map_err(ContextError::CurrentDir)?;
        Ok(Self::detect_from(cwd))
    }

    /// Capture the snapshot for an explicit working directory.
    #[must_use]
    pub fn detect_from(cwd: PathBuf) -> Self {
        let repo_root = find_repo_root(&cwd);
        let git = repo_root
            .as_deref()
            .map(git_status)
            .unwrap_or_default();

        debug!(
            cwd = %cwd.display(),
            repo_root = ?repo_root,
            changed = git.changed,
            untracked = git.untracked,
            "captured invocation context"
        );

        Self {
            cwd,
            repo_root,
            git,
        }
    }
}

/// Walk up from `start` looking for a `.git` entry. The filesystem root is
/// never treated as a repository.
fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take_while(|dir| dir.parent().is_some())
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn git_status(repo: &Path) -> GitSummary {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["status", "--porcelain"])
        .output();

    match output {
        Ok(out) if out.status.success() => {
            GitSummary::from_porcelain(&String::from_utf8_lossy(&out.stdout))
        },
        Ok(out) => {
            debug!(status = ?out.status.code(), "git status failed; assuming clean tree");
            GitSummary::default()
        },
        Err(e) => {
            debug!(error = %e, "git unavailable; assuming clean tree");
            GitSummary::default()
        },
    }
}
