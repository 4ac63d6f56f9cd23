//! Decision vocabulary shared by the classifier, the ledger and the runner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the decision ladder.
///
/// Variants are ordered by severity: `Allow < Confirm < Block`. Anything
/// that may only tighten a decision compares against this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// Run the command unmodified.
    Allow,
    /// Require explicit operator confirmation first.
    Confirm,
    /// Refuse to run the command.
    Block,
}

impl Decision {
    /// Uppercase label used in terminal output and the ledger.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Confirm => "CONFIRM",
            Self::Block => "BLOCK",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One independently detected indicator of risk.
///
/// The serialized form is the human-readable tag, so ledger lines stay
/// greppable (`"signals":["mutating command","force flag present"]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskSignal {
    /// `rm`, `rmdir`, `mv`, `chmod`, `chown`, `truncate` or any `git` call.
    #[serde(rename = "mutating command")]
    MutatingCommand,
    /// A target resolves under a configured protected path.
    #[serde(rename = "touches protected path")]
    ProtectedPath,
    /// A known force flag is present.
    #[serde(rename = "force flag present")]
    ForceFlag,
    /// A target lies outside the repository root.
    #[serde(rename = "outside repo root")]
    OutsideRepo,
    /// The command is a configured network-egress tool.
    #[serde(rename = "network egress command")]
    NetworkEgress,
    /// The command is a configured package manager.
    #[serde(rename = "package manager install/upgrade")]
    PackageManager,
    /// The command is on the configured confirm list.
    #[serde(rename = "configured confirm command")]
    ConfirmCommand,
    /// `find` invoked with `-delete`.
    #[serde(rename = "find -delete")]
    FindDelete,
}

impl RiskSignal {
    /// The tag written to terminals and the ledger.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::MutatingCommand => "mutating command",
            Self::ProtectedPath => "touches protected path",
            Self::ForceFlag => "force flag present",
            Self::OutsideRepo => "outside repo root",
            Self::NetworkEgress => "network egress command",
            Self::PackageManager => "package manager install/upgrade",
            Self::ConfirmCommand => "configured confirm command",
            Self::FindDelete => "find -delete",
        }
    }
}

impl fmt::Display for RiskSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
