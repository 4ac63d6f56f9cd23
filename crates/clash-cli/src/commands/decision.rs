//! Decision command - explain a recorded decision.

use clash_audit::AuditEntry;

use super::{detect_context, open_ledger};
use crate::theme::Theme;

/// Look up `id` in the ledger for the current context and print it.
pub(crate) fn explain_decision(id: &str) -> anyhow::Result<()> {
    let ctx = detect_context()?;
    let ledger = open_ledger(&ctx)?;
    let entry = ledger.find(id)?;
    print_entry(&entry);
    Ok(())
}

fn print_entry(e: &AuditEntry) {
    println!(
        "{}: {} (hard={})",
        Theme::header("Decision"),
        Theme::decision(e.decision),
        e.hard
    );
    println!("{}", Theme::kv("Command", &e.command));
    println!("{}", Theme::kv("When", &e.timestamp.to_rfc3339()));
    if !e.signals.is_empty() {
        let signals: Vec<&str> = e.signals.iter().map(|s| s.tag()).collect();
        println!("{}", Theme::kv("Signals", &signals.join(", ")));
    }
    if !e.reasons.is_empty() {
        println!("{}", Theme::kv("Reasons", &e.reasons.join(", ")));
    }
    if let Some(safer) = &e.safer_alternative {
        println!("{}", Theme::kv("Safer", safer));
    }
    if let Some(p) = &e.preview {
        let mut line = format!("{} items", p.count);
        if !p.sample.is_empty() {
            line.push_str(&format!(" sample: {}", p.sample.join(", ")));
        }
        if let Some(err) = &p.err {
            line.push_str(&format!(" (error: {err})"));
        }
        println!("{}", Theme::kv("Preview", &line));
    }
    println!(
        "{}",
        Theme::kv("Outcome", &format!("{} exit={}", e.outcome, e.exit_code))
    );
    if let Some(approver) = e.approved_by {
        println!("{}", Theme::kv("Approved by", &approver.to_string()));
    }
    if e.break_glass {
        println!(
            "{}",
            Theme::kv(
                "Break-glass reason",
                e.break_glass_reason.as_deref().unwrap_or("")
            )
        );
    }
    if let Some(err) = &e.error {
        println!("{}", Theme::kv("Error", err));
    }
}
