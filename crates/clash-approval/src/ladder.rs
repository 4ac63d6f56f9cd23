//! The decision ladder.
//!
//! # Check Order
//!
//! Each tier short-circuits the ones below it.
//!
//! 1. Empty command -> hard `Block`
//! 2. Hard blocks, in order:
//!    - command name prefix-matches a `block_commands` entry
//!    - recursive/force `rm` with a target that is `/`, the home directory,
//!      or (inside a repository) outside the repository
//!    - `git reset --hard` on a dirty tree
//!    - `git clean` with force, directory and ignored-file flags, no
//!      dry-run and no path
//! 3. Command line matches an `allow_commands` entry -> `Allow`
//! 4. Risk signals are accumulated; none -> `Allow`, any -> `Confirm`
//!
//! Targets that cannot be resolved (missing file, dangling link) are
//! skipped by every path check. They neither raise a signal nor count as
//! safe.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clash_config::Policy;
use clash_core::paths::{self, expand_pattern, has_prefix, is_inside};
use clash_core::{ContextSnapshot, RiskSignal};
use clash_preview::PreviewHint;
use tracing::debug;

use crate::verdict::Verdict;

/// Commands that modify files or history.
const MUTATING_COMMANDS: &[&str] = &["rm", "rmdir", "mv", "chmod", "chown", "truncate", "git"];

/// Arguments that raise the force-flag signal.
const FORCE_FLAGS: &[&str] = &["-f", "--force", "--hard", "-rf", "-fr"];

/// Classify a command with the process home directory and environment.
#[must_use]
pub fn evaluate(command: &[String], ctx: &ContextSnapshot, policy: &Policy) -> Verdict {
    Ladder::new(policy).evaluate(command, ctx)
}

/// The classifier, bound to one policy.
#[derive(Debug, Clone)]
pub struct Ladder<'a> {
    policy: &'a Policy,
    home: Option<PathBuf>,
    vars: Option<HashMap<String, String>>,
}

impl<'a> Ladder<'a> {
    /// Create a ladder using the current user's home directory and the
    /// process environment for `$VAR` patterns.
    #[must_use]
    pub fn new(policy: &'a Policy) -> Self {
        Self {
            policy,
            home: paths::home_dir(),
            vars: None,
        }
    }

    /// Use an explicit home directory (`None` disables `~` handling).
    #[must_use]
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Resolve `$VAR` patterns from `vars` instead of the process environment.
    #[must_use]
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Classify `command` in `ctx`.
    ///
    /// Total and deterministic: identical inputs yield identical verdicts.
    #[must_use]
    pub fn evaluate(&self, command: &[String], ctx: &ContextSnapshot) -> Verdict {
        let Some(first) = command.first() else {
            debug!(tier = "empty", "no command provided");
            return Verdict::hard_block("no command provided", None);
        };

        let name = command_name(first);
        let targets = extract_targets(command);
        let resolved = self.resolve_targets(&targets, ctx);

        if let Some(verdict) = self.check_hard_blocks(&name, command, &resolved, ctx) {
            debug!(tier = "hard-block", command = %name, verdict = %verdict, "ladder decided");
            return verdict;
        }

        if matches_line(command, &self.policy.allow_commands) {
            debug!(tier = "allow-list", command = %name, "ladder decided");
            return Verdict::allow("allowlisted read-only command");
        }

        let verdict = self.accumulate_signals(&name, command, &targets, &resolved, ctx);
        debug!(
            tier = "signals",
            command = %name,
            signals = verdict.signals().len(),
            verdict = %verdict,
            "ladder decided"
        );
        verdict
    }

    fn resolve_targets(&self, targets: &[String], ctx: &ContextSnapshot) -> Vec<PathBuf> {
        targets
            .iter()
            .filter_map(|t| {
                match paths::resolve_path_with_home(&ctx.cwd, t, self.home.as_deref()) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        debug!(target = %t, error = %e, "skipping unresolvable target");
                        None
                    },
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Tier 2: hard blocks
    // -----------------------------------------------------------------------

    fn check_hard_blocks(
        &self,
        name: &str,
        command: &[String],
        resolved: &[PathBuf],
        ctx: &ContextSnapshot,
    ) -> Option<Verdict> {
        if self.is_block_listed(name) {
            return Some(Verdict::hard_block("command is in hard block list", None));
        }
        if name == "rm" && self.is_catastrophic_rm(command, resolved, ctx) {
            return Some(Verdict::hard_block(
                "catastrophic rm target",
                Some("narrow path or remove -rf"),
            ));
        }
        if name == "git" && is_unsafe_git_reset(command, ctx) {
            return Some(Verdict::hard_block(
                "git reset --hard with dirty tree",
                Some("commit or stash first"),
            ));
        }
        if name == "git" && is_unsafe_git_clean(command) {
            return Some(Verdict::hard_block(
                "git clean -fdx without dry-run",
                Some("git clean -ndx"),
            ));
        }
        None
    }

    fn is_block_listed(&self, name: &str) -> bool {
        self.policy
            .block_commands
            .iter()
            .map(|entry| entry.trim().to_lowercase())
            .any(|entry| !entry.is_empty() && name.starts_with(&entry))
    }

    fn is_catastrophic_rm(
        &self,
        command: &[String],
        resolved: &[PathBuf],
        ctx: &ContextSnapshot,
    ) -> bool {
        if !has_recursive_or_force_flag(command) {
            return false;
        }
        let home = self.home.as_deref();
        let canonical_home = home.and_then(|h| h.canonicalize().ok());

        resolved.iter().any(|target| {
            let is_root = target.parent().is_none();
            let is_home = home.is_some_and(|h| target == h)
                || canonical_home.as_deref().is_some_and(|h| target == h);
            let escapes_repo = ctx
                .repo_root
                .as_deref()
                .is_some_and(|root| !is_inside(root, target));
            is_root || is_home || escapes_repo
        })
    }

    // -----------------------------------------------------------------------
    // Tier 4: risk signals
    // -----------------------------------------------------------------------

    fn accumulate_signals(
        &self,
        name: &str,
        command: &[String],
        targets: &[String],
        resolved: &[PathBuf],
        ctx: &ContextSnapshot,
    ) -> Verdict {
        let policy = self.policy;
        let mut signals = Vec::new();

        if MUTATING_COMMANDS.contains(&name) {
            signals.push(RiskSignal::MutatingCommand);
        }
        if self.touches_protected(resolved) {
            signals.push(RiskSignal::ProtectedPath);
        }
        if command.iter().any(|a| FORCE_FLAGS.contains(&a.as_str())) {
            signals.push(RiskSignal::ForceFlag);
        }
        if !policy.options.allow_outside_repo && is_outside_repo(targets, resolved, ctx) {
            signals.push(RiskSignal::OutsideRepo);
        }
        if matches_name(name, &policy.network_egress) {
            signals.push(RiskSignal::NetworkEgress);
        }
        if matches_name(name, &policy.package_managers) {
            signals.push(RiskSignal::PackageManager);
        }
        if matches_line(command, &policy.confirm_commands) || matches_name(name, &policy.confirm_commands)
        {
            signals.push(RiskSignal::ConfirmCommand);
        }

        let is_find_delete = name == "find" && command.iter().skip(1).any(|a| a == "-delete");
        if is_find_delete {
            signals.push(RiskSignal::FindDelete);
        }

        if signals.is_empty() {
            return Verdict::allow("no risk signals");
        }

        let hint = if name == "rm" {
            Some(PreviewHint::Rm {
                targets: resolved.to_vec(),
            })
        } else if is_find_delete {
            Some(PreviewHint::FindDelete {
                args: command.to_vec(),
            })
        } else if is_git_subcommand(name, command, "clean") {
            Some(PreviewHint::GitClean {
                args: command.to_vec(),
            })
        } else {
            None
        };

        let safer = self.safer_alternative(name);
        Verdict::confirm(signals, hint, safer)
    }

    fn touches_protected(&self, resolved: &[PathBuf]) -> bool {
        let patterns: Vec<PathBuf> = self
            .policy
            .protected_paths
            .iter()
            .filter_map(|p| expand_pattern(p, self.home.as_deref(), |var| self.lookup_var(var)))
            .collect();

        resolved
            .iter()
            .any(|target| patterns.iter().any(|pattern| has_prefix(target, pattern)))
    }

    fn lookup_var(&self, name: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    fn safer_alternative(&self, name: &str) -> Option<&'static str> {
        match name {
            "rm" => Some("add --dry-run or target fewer files"),
            "git" => Some("run with --dry-run or limit path"),
            "find" => Some("run find without -delete first"),
            _ if matches_name(name, &self.policy.package_managers) => {
                Some("pin versions and review diff before install")
            },
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Lowercased file name of the program, so `/bin/rm` is `rm`.
fn command_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map_or_else(|| program.to_owned(), |n| n.to_string_lossy().into_owned())
        .to_lowercase()
}

/// Positional arguments: tokens not starting with `-`, plus everything
/// after a literal `--`.
fn extract_targets(command: &[String]) -> Vec<String> {
    let mut targets = Vec::new();
    let mut rest = command.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--" {
            targets.extend(rest.cloned());
            break;
        }
        if !arg.starts_with('-') {
            targets.push(arg.clone());
        }
    }
    targets
}

/// Options before any `--`.
fn options(command: &[String]) -> impl Iterator<Item = &str> {
    command
        .iter()
        .skip(1)
        .map(String::as_str)
        .take_while(|a| *a != "--")
        .filter(|a| a.starts_with('-') && a.len() > 1)
}

/// Characters of a short option cluster (`-rf` -> `rf`), `None` for long options.
fn short_cluster(option: &str) -> Option<&str> {
    if option.starts_with("--") {
        None
    } else {
        option.strip_prefix('-')
    }
}

fn has_recursive_or_force_flag(command: &[String]) -> bool {
    options(command).any(|opt| match short_cluster(opt) {
        Some(cluster) => cluster.contains(['r', 'R', 'f']),
        None => matches!(opt, "--recursive" | "--force"),
    })
}

fn is_git_subcommand(name: &str, command: &[String], sub: &str) -> bool {
    name == "git" && command.get(1).is_some_and(|a| a == sub)
}

fn is_unsafe_git_reset(command: &[String], ctx: &ContextSnapshot) -> bool {
    is_git_subcommand("git", command, "reset")
        && command.iter().skip(2).any(|a| a == "--hard")
        && ctx.git.is_dirty()
}

fn is_unsafe_git_clean(command: &[String]) -> bool {
    if !is_git_subcommand("git", command, "clean") {
        return false;
    }

    let (mut force, mut dirs, mut ignored, mut dry_run, mut has_path) =
        (false, false, false, false, false);
    let mut expect_value = false;
    let mut args = command.iter().skip(2);

    while let Some(arg) = args.next() {
        if expect_value {
            expect_value = false;
            continue;
        }
        match arg.as_str() {
            "--" => {
                has_path |= args.next().is_some();
                break;
            },
            "--force" => force = true,
            "--dry-run" => dry_run = true,
            "-e" | "--exclude" => expect_value = true,
            a if a.starts_with("--") => {},
            a if a.starts_with('-') && a.len() > 1 => {
                // `e` takes the rest of the cluster (or the next arg) as a pattern.
                let flags = match a[1..].find('e') {
                    Some(pos) => {
                        expect_value = pos.saturating_add(2) == a.len();
                        &a[1..=pos]
                    },
                    None => &a[1..],
                };
                force |= flags.contains('f');
                dirs |= flags.contains('d');
                ignored |= flags.contains(['x', 'X']);
                dry_run |= flags.contains('n');
            },
            _ => has_path = true,
        }
    }

    force && dirs && ignored && !dry_run && !has_path
}

fn is_outside_repo(targets: &[String], resolved: &[PathBuf], ctx: &ContextSnapshot) -> bool {
    match ctx.repo_root.as_deref() {
        Some(root) => resolved.iter().any(|t| !is_inside(root, t)),
        None => !targets.is_empty(),
    }
}

/// Case-insensitive equality of the command name with any entry.
fn matches_name(name: &str, list: &[String]) -> bool {
    list.iter().any(|entry| entry.trim().eq_ignore_ascii_case(name))
}

/// The joined, lowercased command line equals an entry or starts with
/// `entry + " "`.
fn matches_line(command: &[String], list: &[String]) -> bool {
    let line = command.join(" ").to_lowercase();
    list.iter()
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .any(|entry| {
            line == entry
                || line
                    .strip_prefix(entry.as_str())
                    .is_some_and(|rest| rest.starts_with(' '))
        })
}
