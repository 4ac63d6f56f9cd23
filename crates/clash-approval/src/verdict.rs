//! Classifier output.

use clash_core::{Decision, RiskSignal};
use clash_preview::PreviewHint;
use serde::Serialize;
use std::fmt;

/// The ladder's judgement on one command.
///
/// Fields are private: a verdict can only be built by the ladder's
/// constructors and only tightened (never loosened) afterwards. Once
/// `hard` is set it stays set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    decision: Decision,
    hard: bool,
    reasons: Vec<String>,
    signals: Vec<RiskSignal>,
    preview_hint: Option<PreviewHint>,
    safer_alternative: Option<String>,
}

impl Verdict {
    /// An ALLOW verdict.
    pub(crate) fn allow(reason: &str) -> Self {
        Self {
            decision: Decision::Allow,
            hard: false,
            reasons: vec![reason.to_owned()],
            signals: Vec::new(),
            preview_hint: None,
            safer_alternative: None,
        }
    }

    /// A hard BLOCK verdict.
    pub(crate) fn hard_block(reason: &str, safer_alternative: Option<&str>) -> Self {
        Self {
            decision: Decision::Block,
            hard: true,
            reasons: vec![reason.to_owned()],
            signals: Vec::new(),
            preview_hint: None,
            safer_alternative: safer_alternative.map(str::to_owned),
        }
    }

    /// A CONFIRM verdict carrying the accumulated signals.
    pub(crate) fn confirm(
        signals: Vec<RiskSignal>,
        preview_hint: Option<PreviewHint>,
        safer_alternative: Option<&str>,
    ) -> Self {
        Self {
            decision: Decision::Confirm,
            hard: false,
            reasons: vec!["risk signals present".to_owned()],
            signals,
            preview_hint,
            safer_alternative: safer_alternative.map(str::to_owned),
        }
    }

    /// Turn a CONFIRM into a non-hard BLOCK, appending `reason`.
    ///
    /// Any other decision is left untouched. Returns whether the verdict
    /// changed.
    pub(crate) fn tighten_to_block(&mut self, reason: String) -> bool {
        if self.decision != Decision::Confirm {
            return false;
        }
        self.decision = Decision::Block;
        self.reasons.push(reason);
        true
    }

    /// The decision.
    #[must_use]
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Whether this is a hard block.
    #[must_use]
    pub fn is_hard(&self) -> bool {
        self.hard
    }

    /// Human-readable reasons, in the order they were produced.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Accumulated risk signals (empty unless the ladder reached the signal tier).
    #[must_use]
    pub fn signals(&self) -> &[RiskSignal] {
        &self.signals
    }

    /// Which dry-run to show before confirming, if any.
    #[must_use]
    pub fn preview_hint(&self) -> Option<&PreviewHint> {
        self.preview_hint.as_ref()
    }

    /// A suggestion for a less dangerous command.
    #[must_use]
    pub fn safer_alternative(&self) -> Option<&str> {
        self.safer_alternative.as_deref()
    }

    /// Check if the command may run without confirmation.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.decision == Decision::Allow
    }

    /// Check if the command needs operator confirmation.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        self.decision == Decision::Confirm
    }

    /// Check if the command is refused.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.decision == Decision::Block
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decision)?;
        if self.hard {
            f.write_str(" (hard)")?;
        }
        if !self.reasons.is_empty() {
            write!(f, ": {}", self.reasons.join("; "))?;
        }
        Ok(())
    }
}
