//! Audit entry types.
//!
//! One [`AuditEntry`] is written per invocation, whatever the outcome. The
//! JSON field names are the ledger's on-disk schema.

use chrono::{DateTime, Utc};
use clash_core::{ContextSnapshot, Decision, GitSummary, RiskSignal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Refused by the ladder or the arbiter.
    Blocked,
    /// Confirmation refused or break-glass failed.
    Cancelled,
    /// Ran and exited zero.
    Executed,
    /// Ran and exited non-zero, or could not be spawned.
    Failed,
}

impl Outcome {
    /// Lowercase label as written to the ledger.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
            Self::Executed => "executed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who approved a CONFIRM verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Approver {
    /// The auto-approve flag.
    #[serde(rename = "--yes")]
    Flag,
    /// The operator at the prompt.
    #[serde(rename = "user")]
    User,
}

impl fmt::Display for Approver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("--yes"),
            Self::User => f.write_str("user"),
        }
    }
}

/// Preview summary stored with an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// Number of affected items.
    pub count: usize,
    /// Sampled item identifiers.
    pub sample: Vec<String>,
    /// What the simulation did.
    pub note: String,
    /// Why the simulation failed, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

/// A single ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry identifier (UUID v4).
    pub id: String,
    /// When the entry was created.
    pub timestamp: DateTime<Utc>,
    /// The literal command line, space-joined.
    pub command: String,
    /// Working directory.
    pub cwd: PathBuf,
    /// Repository root, if any.
    #[serde(default)]
    pub repo_root: Option<PathBuf>,
    /// Working-tree counts.
    #[serde(default)]
    pub git: GitSummary,
    /// Final decision (after arbitration).
    pub decision: Decision,
    /// Whether the block was hard.
    #[serde(default)]
    pub hard: bool,
    /// Risk signals.
    #[serde(default)]
    pub signals: Vec<RiskSignal>,
    /// Reasons.
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Suggested safer command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safer_alternative: Option<String>,
    /// Preview summary, when a preview ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewRecord>,
    /// Who approved the command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Approver>,
    /// Whether break-glass was used.
    #[serde(default)]
    pub break_glass: bool,
    /// Operator-supplied break-glass reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_glass_reason: Option<String>,
    /// How the invocation ended.
    pub outcome: Outcome,
    /// Process exit code reported to the caller.
    #[serde(default)]
    pub exit_code: i32,
    /// Execution error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Create an entry with a fresh id and timestamp.
    ///
    /// Everything beyond the command, context, decision and outcome starts
    /// empty; callers fill the public fields they have.
    #[must_use]
    pub fn new(
        command: &[String],
        ctx: &ContextSnapshot,
        decision: Decision,
        outcome: Outcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            command: command.join(" "),
            cwd: ctx.cwd.clone(),
            repo_root: ctx.repo_root.clone(),
            git: ctx.git,
            decision,
            hard: false,
            signals: Vec::new(),
            reasons: Vec::new(),
            safer_alternative: None,
            preview: None,
            approved_by: None,
            break_glass: false,
            break_glass_reason: None,
            outcome,
            exit_code: 0,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema() {
        let ctx = ContextSnapshot::new("/work/repo").with_repo_root("/work/repo");
        let mut entry = AuditEntry::new(
            &["rm".into(), "a.txt".into()],
            &ctx,
            Decision::Confirm,
            Outcome::Executed,
        );
        entry.signals = vec![RiskSignal::MutatingCommand];
        entry.approved_by = Some(Approver::Flag);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["command"], "rm a.txt");
        assert_eq!(json["decision"], "CONFIRM");
        assert_eq!(json["outcome"], "executed");
        assert_eq!(json["approved_by"], "--yes");
        assert_eq!(json["signals"][0], "mutating command");
        assert_eq!(json["git"]["changed"], 0);
        assert!(json.get("error").is_none());
        assert!(json.get("preview").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let ctx = ContextSnapshot::new("/tmp");
        let a = AuditEntry::new(&["ls".into()], &ctx, Decision::Allow, Outcome::Executed);
        let b = AuditEntry::new(&["ls".into()], &ctx, Decision::Allow, Outcome::Executed);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }
}
