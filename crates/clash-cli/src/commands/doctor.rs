//! Doctor command - show what clash sees from here.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{detect_context, load_policy, open_ledger};

/// Print the context snapshot, the policy source and the ledger path.
pub(crate) fn run_doctor(policy_path: Option<&Path>) -> Result<()> {
    println!("{}", "Clash Doctor".cyan().bold());
    println!();

    let ctx = detect_context()?;
    println!("  cwd: {}", ctx.cwd.display());
    match &ctx.repo_root {
        Some(root) => {
            println!("  repo root: {}", root.display());
            println!(
                "  git status: {} changed, {} untracked",
                ctx.git.changed, ctx.git.untracked
            );
        },
        None => println!("  repo root: {}", "none (using cwd)".dimmed()),
    }

    print!("  policy: ");
    match load_policy(&ctx, policy_path) {
        Ok(loaded) => println!("{} ({})", "OK".green(), loaded.source),
        Err(e) => println!("{} {e:#}", "FAIL".red()),
    }

    print!("  ledger: ");
    match open_ledger(&ctx) {
        Ok(ledger) => println!("{}", ledger.path().display()),
        Err(e) => println!("{} {e:#}", "FAIL".red()),
    }

    Ok(())
}
