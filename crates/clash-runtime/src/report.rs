//! Presentation hooks.
//!
//! The runner tells a [`Reporter`] what happened at each step; the CLI
//! renders it, tests record it. Every method defaults to doing nothing.

use clash_approval::Verdict;
use clash_preview::PreviewResult;

/// Receives progress from the runner.
pub trait Reporter {
    /// The verdict is BLOCK.
    fn blocked(&self, _verdict: &Verdict) {}

    /// The verdict is CONFIRM; `preview` is set when a dry-run ran.
    fn confirm(&self, _verdict: &Verdict, _preview: Option<&PreviewResult>) {}

    /// The preview affects more items than the delete threshold.
    fn mass_delete(&self, _count: usize, _threshold: usize) {}

    /// The verdict is ALLOW.
    fn allowed(&self, _verdict: &Verdict) {}

    /// The operator declined.
    fn cancelled(&self) {}

    /// Break-glass was requested but is not permitted here.
    fn break_glass_unavailable(&self, _reason: &str) {}

    /// The break-glass phrase did not match.
    fn break_glass_mismatch(&self) {}
}

/// Reporter that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
