//! Terminal rendering of runner progress.
//!
//! Everything goes to stderr; stdout belongs to the wrapped command.

use clash_approval::Verdict;
use clash_core::Decision;
use clash_preview::PreviewResult;
use clash_runtime::Reporter;

use crate::theme::Theme;

pub(crate) struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn blocked(&self, verdict: &Verdict) {
        let title = if verdict.is_hard() {
            "BLOCKED (hard)"
        } else {
            "BLOCKED"
        };
        eprintln!("{}", Theme::verdict(title, Decision::Block));
        for reason in verdict.reasons() {
            eprintln!("- {reason}");
        }
        if let Some(safer) = verdict.safer_alternative() {
            eprintln!("{}", Theme::kv("Safer", safer));
        }
    }

    fn confirm(&self, verdict: &Verdict, preview: Option<&PreviewResult>) {
        eprintln!("{}", Theme::verdict("CONFIRM", Decision::Confirm));
        for signal in verdict.signals() {
            eprintln!("- signal: {signal}");
        }
        if let Some(preview) = preview {
            eprintln!("{}", preview_line(preview));
        }
        if let Some(safer) = verdict.safer_alternative() {
            eprintln!("{}", Theme::dimmed(&format!("Safer: {safer}")));
        }
    }

    fn mass_delete(&self, count: usize, threshold: usize) {
        eprintln!(
            "{}",
            Theme::warning(&format!(
                "Preview affects {count} items (delete threshold {threshold})"
            ))
        );
    }

    fn allowed(&self, _verdict: &Verdict) {
        eprintln!("{}", Theme::verdict("ALLOW (fast path)", Decision::Allow));
    }

    fn cancelled(&self) {
        eprintln!("Cancelled.");
    }

    fn break_glass_unavailable(&self, reason: &str) {
        eprintln!("{}", Theme::error(reason));
    }

    fn break_glass_mismatch(&self) {
        eprintln!("{}", Theme::error("Break-glass phrase mismatch; aborting."));
    }
}

pub(crate) fn preview_line(preview: &PreviewResult) -> String {
    let mut line = format!("Preview: {} items", preview.count);
    if !preview.sample.is_empty() {
        line.push_str(&format!(" sample: {}", preview.sample.join(", ")));
    }
    if let Some(err) = &preview.error {
        line.push_str(&format!(" (preview error: {err})"));
    }
    line
}
