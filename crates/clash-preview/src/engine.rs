//! The three dry-run simulators.
//!
//! None of them may mutate the filesystem or the repository:
//!
//! - `rm` only checks that each target exists.
//! - `find` re-runs without `-delete`, and refuses predicates that act on
//!   matches (`-exec`, `-ok`, `-fprint` and friends) instead of stripping
//!   them.
//! - `git clean` always runs with `-n -d` after every caller force,
//!   dry-run and interactive flag has been removed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clash_core::ContextSnapshot;
use tracing::{debug, warn};

use crate::hint::PreviewHint;
use crate::result::PreviewResult;

const RM_NOTE: &str = "targets resolved from provided arguments";
const FIND_NOTE: &str = "find output without -delete";
const GIT_CLEAN_NOTE: &str = "git clean -nd preview";

/// `find` primaries that act on every match.
const FIND_SIDE_EFFECTS: &[&str] = &[
    "-exec", "-execdir", "-ok", "-okdir", "-fprint", "-fprint0", "-fprintf", "-fls",
];

/// Run the simulator selected by `hint`.
///
/// Never fails: sub-process problems end up in [`PreviewResult::error`].
#[must_use]
pub fn run(hint: &PreviewHint, ctx: &ContextSnapshot, sample_limit: usize) -> PreviewResult {
    let result = match hint {
        PreviewHint::Rm { targets } => preview_rm(targets, sample_limit),
        PreviewHint::FindDelete { args } => preview_find_delete(args, &ctx.cwd, sample_limit),
        PreviewHint::GitClean { args } => preview_git_clean(args, &ctx.cwd, sample_limit),
    };

    if let Some(err) = &result.error {
        warn!(kind = %hint.kind(), error = %err, "preview could not be computed");
    } else {
        debug!(kind = %hint.kind(), count = result.count, "preview computed");
    }
    result
}

fn preview_rm(targets: &[PathBuf], sample_limit: usize) -> PreviewResult {
    let existing = targets
        .iter()
        .filter(|t| t.symlink_metadata().is_ok())
        .map(|t| t.display().to_string());
    PreviewResult::from_items(existing, sample_limit, RM_NOTE)
}

fn preview_find_delete(args: &[String], cwd: &Path, sample_limit: usize) -> PreviewResult {
    let find_args = match find_preview_args(args) {
        Ok(a) => a,
        Err(e) => return PreviewResult::failed(FIND_NOTE, e),
    };

    match run_listing("find", &find_args, cwd) {
        Ok(lines) => PreviewResult::from_items(lines, sample_limit, FIND_NOTE),
        Err(e) => PreviewResult::failed(FIND_NOTE, e),
    }
}

fn preview_git_clean(args: &[String], cwd: &Path, sample_limit: usize) -> PreviewResult {
    let git_args = git_clean_preview_args(args);
    match run_listing("git", &git_args, cwd) {
        Ok(lines) => PreviewResult::from_items(lines, sample_limit, GIT_CLEAN_NOTE),
        Err(e) => PreviewResult::failed(GIT_CLEAN_NOTE, e),
    }
}

/// Arguments for the read-only `find`: the original predicate minus
/// `-delete`. Fails if any predicate would act on the matches.
fn find_preview_args(args: &[String]) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    for arg in args.iter().skip(1) {
        if arg == "-delete" {
            continue;
        }
        if FIND_SIDE_EFFECTS.contains(&arg.as_str()) {
            return Err(format!("refusing to preview find with {arg}"));
        }
        out.push(arg.clone());
    }
    Ok(out)
}

/// Arguments for `git clean -n -d` built from the caller's `git clean ...`.
fn git_clean_preview_args(args: &[String]) -> Vec<String> {
    let mut out: Vec<String> = vec!["clean".into(), "-n".into(), "-d".into()];
    let mut expect_value = false;
    let mut after_separator = false;

    for arg in args.iter().skip(2) {
        if expect_value || after_separator {
            expect_value = false;
            out.push(arg.clone());
            continue;
        }
        match arg.as_str() {
            "--" => {
                after_separator = true;
                out.push(arg.clone());
            },
            "-f" | "--force" | "-n" | "--dry-run" | "-i" | "--interactive" => {},
            "-e" | "--exclude" => {
                expect_value = true;
                out.push(arg.clone());
            },
            a if a.starts_with("--") || !a.starts_with('-') || a.len() < 2 => {
                out.push(arg.clone());
            },
            cluster => {
                let (flags, value) = match cluster[1..].find('e') {
                    Some(pos) => cluster[1..].split_at(pos),
                    None => (&cluster[1..], ""),
                };
                let kept: String = flags.chars().filter(|c| !matches!(c, 'f' | 'n' | 'i')).collect();
                // `-e` ends the cluster; a bare trailing `e` takes the next arg.
                if value == "e" {
                    expect_value = true;
                }
                let rebuilt = format!("-{kept}{value}");
                if rebuilt != "-" {
                    out.push(rebuilt);
                }
            },
        }
    }
    out
}

/// Run a listing command and return its non-blank output lines.
fn run_listing(program: &str, args: &[String], cwd: &Path) -> Result<Vec<String>, String> {
    debug!(program, ?args, cwd = %cwd.display(), "running preview command");

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| format!("failed to run {program}: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().next().unwrap_or("").trim();
        return Err(if detail.is_empty() {
            format!("{program} {}", output.status)
        } else {
            format!("{program} {}: {detail}", output.status)
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_owned)
        .collect())
}
