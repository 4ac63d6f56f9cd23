//! Running the approved command.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Exit code to report (1 when there is none).
    pub exit_code: i32,
    /// Error text for non-zero exits and spawn failures.
    pub error: Option<String>,
}

impl ExecOutcome {
    /// A zero exit.
    #[must_use]
    pub fn success() -> Self {
        Self {
            exit_code: 0,
            error: None,
        }
    }

    /// A failure with `exit_code` and `error`.
    #[must_use]
    pub fn failure(exit_code: i32, error: impl Into<String>) -> Self {
        Self {
            exit_code,
            error: Some(error.into()),
        }
    }

    /// Whether the command exited zero without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == 0 && self.error.is_none()
    }
}

/// Runs an argument vector.
pub trait CommandExecutor {
    /// Run `argv` in `cwd` with inherited standard streams.
    fn execute(&self, argv: &[String], cwd: &Path) -> ExecOutcome;
}

/// Executes through `std::process::Command`, no shell involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, argv: &[String], cwd: &Path) -> ExecOutcome {
        let Some((program, args)) = argv.split_first() else {
            return ExecOutcome::failure(1, "no command provided");
        };
        debug!(program = %program, cwd = %cwd.display(), "executing command");

        match Command::new(program).args(args).current_dir(cwd).status() {
            Ok(status) => match status.code() {
                Some(0) => ExecOutcome::success(),
                Some(code) => ExecOutcome::failure(code, format!("exit status {code}")),
                None => ExecOutcome::failure(1, status.to_string()),
            },
            Err(e) => ExecOutcome::failure(1, e.to_string()),
        }
    }
}
