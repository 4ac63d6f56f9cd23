//! Audit command - view the ledger.

use colored::Colorize;

use super::{detect_context, open_ledger};
use crate::theme::Theme;

/// List the last `limit` entries of the ledger for the current context.
pub(crate) fn list_entries(limit: usize) -> anyhow::Result<()> {
    let ctx = detect_context()?;
    let ledger = open_ledger(&ctx)?;
    let entries = ledger.recent(limit)?;

    if entries.is_empty() {
        println!("{}", Theme::info("No audit entries"));
        return Ok(());
    }

    println!("\n{}", Theme::header("Audit Entries"));
    println!("{}", Theme::dimmed(&ledger.path().display().to_string()));
    println!(
        "{:<16} {:<8} {:<10} {:<36} {}",
        "TIMESTAMP".dimmed(),
        "DECISION".dimmed(),
        "OUTCOME".dimmed(),
        "ID".dimmed(),
        "COMMAND".dimmed()
    );
    println!("{}", Theme::separator());

    for entry in entries {
        let outcome = match entry.outcome {
            clash_audit::Outcome::Executed => entry.outcome.label().green(),
            clash_audit::Outcome::Failed | clash_audit::Outcome::Blocked => {
                entry.outcome.label().red()
            },
            clash_audit::Outcome::Cancelled => entry.outcome.label().yellow(),
        };
        println!(
            "{} {:<8} {:<10} {:<36} {}",
            Theme::timestamp(&entry.timestamp),
            entry.decision.label(),
            outcome,
            entry.id,
            entry.command
        );
    }

    println!();
    Ok(())
}
