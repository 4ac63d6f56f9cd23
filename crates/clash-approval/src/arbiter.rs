//! Secondary arbiter.
//!
//! An [`Arbiter`] is asked for a second opinion on CONFIRM verdicts only.
//! Its answer never reaches the verdict directly: [`clamp`] applies it, and
//! the only change `clamp` can make is CONFIRM to a non-hard BLOCK. An
//! arbiter that answers ALLOW, or answers anything for an ALLOW or BLOCK
//! verdict, changes nothing.

use clash_config::ArbiterConfig;
use clash_core::{Decision, RiskSignal};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::verdict::Verdict;

/// What the arbiter gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbiterInput {
    /// The command line, space-joined.
    pub command: String,
    /// Signals the ladder accumulated.
    pub signals: Vec<RiskSignal>,
    /// The ladder's reasons.
    pub reasons: Vec<String>,
}

impl ArbiterInput {
    /// Build the input for `command` and its verdict.
    #[must_use]
    pub fn new(command: &[String], verdict: &Verdict) -> Self {
        Self {
            command: command.join(" "),
            signals: verdict.signals().to_vec(),
            reasons: verdict.reasons().to_vec(),
        }
    }
}

/// The arbiter's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbiterDecision {
    /// Suggested decision.
    pub decision: Decision,
    /// Why.
    pub reason: String,
}

/// A pluggable second opinion.
pub trait Arbiter: Send + Sync {
    /// Judge a CONFIRM verdict.
    fn decide(&self, input: &ArbiterInput) -> ArbiterDecision;
}

/// Arbiter that always agrees with the ladder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubArbiter;

impl Arbiter for StubArbiter {
    fn decide(&self, _input: &ArbiterInput) -> ArbiterDecision {
        ArbiterDecision {
            decision: Decision::Confirm,
            reason: "stub arbiter".to_owned(),
        }
    }
}

/// Build the arbiter a policy asks for, or `None` when arbitration is off.
///
/// Every provider is currently served by [`StubArbiter`].
#[must_use]
pub fn from_config(config: &ArbiterConfig) -> Option<Box<dyn Arbiter>> {
    if !config.enabled {
        return None;
    }
    debug!(
        provider = %config.provider,
        model = %config.model,
        "arbiter enabled; using stub arbiter"
    );
    Some(Box::new(StubArbiter))
}

/// Apply an arbiter decision to a verdict.
///
/// Only CONFIRM + BLOCK changes anything: the verdict becomes a non-hard
/// BLOCK with `"arbiter: <reason>"` appended. Returns whether it changed.
pub fn clamp(verdict: &mut Verdict, decision: &ArbiterDecision) -> bool {
    if decision.decision != Decision::Block {
        return false;
    }
    let tightened = verdict.tighten_to_block(format!("arbiter: {}", decision.reason));
    if tightened {
        warn!(reason = %decision.reason, "arbiter tightened CONFIRM to BLOCK");
    }
    tightened
}

/// Consult `arbiter` if the verdict is CONFIRM and apply its answer through
/// [`clamp`]. Returns whether the verdict changed.
pub fn consult(arbiter: &dyn Arbiter, command: &[String], verdict: &mut Verdict) -> bool {
    if !verdict.requires_confirmation() {
        return false;
    }
    let decision = arbiter.decide(&ArbiterInput::new(command, verdict));
    debug!(decision = %decision.decision, reason = %decision.reason, "arbiter answered");
    clamp(verdict, &decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(Decision, AtomicUsize);

    impl Fixed {
        fn new(decision: Decision) -> Self {
            Self(decision, AtomicUsize::new(0))
        }

        fn calls(&self) -> usize {
            self.1.load(Ordering::SeqCst)
        }
    }

    impl Arbiter for Fixed {
        fn decide(&self, _input: &ArbiterInput) -> ArbiterDecision {
            self.1.fetch_add(1, Ordering::SeqCst);
            ArbiterDecision {
                decision: self.0,
                reason: "fixed".into(),
            }
        }
    }

    fn confirm() -> Verdict {
        Verdict::confirm(vec![RiskSignal::MutatingCommand], None, None)
    }

    #[test]
    fn test_block_tightens_confirm() {
        let mut v = confirm();
        assert!(consult(&Fixed::new(Decision::Block), &["rm".into()], &mut v));
        assert!(v.is_blocked());
        assert!(!v.is_hard());
        assert_eq!(v.reasons().last().map(String::as_str), Some("arbiter: fixed"));
    }

    #[test]
    fn test_allow_never_loosens_confirm() {
        let mut v = confirm();
        assert!(!consult(&Fixed::new(Decision::Allow), &["rm".into()], &mut v));
        assert!(v.requires_confirmation());
        assert_eq!(v, confirm());
    }

    #[test]
    fn test_only_confirm_is_sent_to_the_arbiter() {
        let arbiter = Fixed::new(Decision::Block);

        let mut allow = Verdict::allow("no risk signals");
        assert!(!consult(&arbiter, &["ls".into()], &mut allow));
        assert!(allow.is_allowed());

        let mut block = Verdict::hard_block("catastrophic rm target", None);
        assert!(!consult(&arbiter, &["rm".into()], &mut block));
        assert!(block.is_hard());

        assert_eq!(arbiter.calls(), 0);
    }

    #[test]
    fn test_clamp_ignores_block_on_non_confirm() {
        let mut allow = Verdict::allow("no risk signals");
        let decision = ArbiterDecision {
            decision: Decision::Block,
            reason: "nope".into(),
        };
        assert!(!clamp(&mut allow, &decision));
        assert!(allow.is_allowed());
    }

    #[test]
    fn test_stub_keeps_confirm() {
        let mut v = confirm();
        assert!(!consult(&StubArbiter, &["rm".into()], &mut v));
        assert!(v.requires_confirmation());
        let answer = StubArbiter.decide(&ArbiterInput::new(&["rm".into()], &v));
        assert_eq!(answer.reason, "stub arbiter");
    }

    #[test]
    fn test_from_config() {
        assert!(from_config(&ArbiterConfig::default()).is_none());
        let enabled = ArbiterConfig {
            enabled: true,
            provider: "stub".into(),
            ..ArbiterConfig::default()
        };
        assert!(from_config(&enabled).is_some());
    }
}
