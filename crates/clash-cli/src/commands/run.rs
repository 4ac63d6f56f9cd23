//! Run command - gate one command.

use std::path::Path;

use anyhow::Result;
use clash_runtime::{RunOptions, Runner};
use tracing::debug;

use super::{detect_context, load_policy, open_ledger};
use crate::prompt::DialoguerPrompter;
use crate::reporter::TerminalReporter;

/// Gate `command` and return the exit code to report.
///
/// A policy error stops here, before anything is recorded.
pub(crate) fn run_command(
    command: &[String],
    policy_path: Option<&Path>,
    opts: &RunOptions,
) -> Result<i32> {
    if command.is_empty() {
        anyhow::bail!("provide a command to run");
    }

    let ctx = detect_context()?;
    let loaded = load_policy(&ctx, policy_path)?;
    let ledger = open_ledger(&ctx)?;
    debug!(
        policy = %loaded.source,
        ledger = %ledger.path().display(),
        repo = ?ctx.repo_root,
        "gate ready"
    );

    let runner = Runner::new(loaded.policy, ctx, ledger)
        .with_prompter(DialoguerPrompter::new())
        .with_reporter(TerminalReporter);
    let report = runner.run(command, opts)?;
    Ok(report.exit_code)
}

/// Gate an agent CLI: `name` followed by `args`.
pub(crate) fn run_wrapped(
    name: &str,
    args: Vec<String>,
    policy_path: Option<&Path>,
    opts: &RunOptions,
) -> Result<i32> {
    let mut command = Vec::with_capacity(args.len().saturating_add(1));
    command.push(name.to_owned());
    command.extend(args);
    run_command(&command, policy_path, opts)
}
