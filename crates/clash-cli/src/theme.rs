//! CLI theme and styling.

use clash_core::Decision;
use colored::Colorize;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }

    /// Format the gate banner for a decision, e.g. `CLASH: CONFIRM`.
    pub(crate) fn verdict(text: &str, decision: Decision) -> String {
        let line = format!("CLASH: {text}");
        match decision {
            Decision::Allow => line.green().to_string(),
            Decision::Confirm => line.yellow().bold().to_string(),
            Decision::Block => line.red().bold().to_string(),
        }
    }

    /// Format a decision label.
    pub(crate) fn decision(decision: Decision) -> String {
        match decision {
            Decision::Allow => decision.label().green().to_string(),
            Decision::Confirm => decision.label().yellow().to_string(),
            Decision::Block => decision.label().red().to_string(),
        }
    }

    /// Format a timestamp.
    pub(crate) fn timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
        dt.format("%Y-%m-%d %H:%M").to_string().dimmed().to_string()
    }
}
