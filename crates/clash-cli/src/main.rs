//! Clash CLI - Command Line Agent Safety Harness.
//!
//! A policy-aware chokepoint in front of every shell command an agent CLI
//! wants to run. Each invocation is classified, optionally previewed,
//! approved or refused, executed, and recorded in the audit ledger.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clash_runtime::RunOptions;

mod commands;
mod prompt;
mod reporter;
mod theme;

use commands::{audit, decision, doctor, init, policy, run};
use theme::Theme;

/// Clash - Command Line Agent Safety Harness
#[derive(Parser)]
#[command(name = "clash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to clash.yaml (defaults to the repo root if present)
    #[arg(long, global = true, value_name = "PATH")]
    policy: Option<PathBuf>,

    /// Auto-approve confirmation prompts
    #[arg(long, global = true)]
    yes: bool,

    /// Enable the controlled override flow
    #[arg(long, global = true)]
    break_glass: bool,

    /// Reason to record when using break-glass
    #[arg(long, global = true, value_name = "TEXT")]
    break_glass_reason: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments passed through to a wrapped program.
#[derive(Args)]
struct Passthrough {
    /// Command and arguments, after `--`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a command through clash
    Run {
        /// Command and arguments, after `--`
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,
    },

    /// Wrap the Codex CLI via clash
    Codex(Passthrough),

    /// Wrap the Gemini CLI via clash
    Gemini(Passthrough),

    /// Wrap the Claude CLI via clash
    Claude(Passthrough),

    /// Wrap the Copilot CLI via clash
    Copilot(Passthrough),

    /// Create a default clash.yaml in the repo root
    Init,

    /// Inspect the effective policy
    Policy {
        #[command(subcommand)]
        command: PolicyCommands,
    },

    /// Inspect recorded decisions
    Decision {
        #[command(subcommand)]
        command: DecisionCommands,
    },

    /// View the audit ledger
    Audit {
        #[command(subcommand)]
        command: AuditCommands,
    },

    /// Show the detected environment
    Doctor,
}

#[derive(Subcommand)]
enum PolicyCommands {
    /// Print the effective policy
    Explain,
}

#[derive(Subcommand)]
enum DecisionCommands {
    /// Show a recorded decision by audit id
    Explain {
        /// Audit entry id
        id: String,
    },
}

#[derive(Subcommand)]
enum AuditCommands {
    /// List the most recent entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            auto_approve: self.yes,
            break_glass: self.break_glass,
            break_glass_reason: self.break_glass_reason.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = clash_telemetry::LogConfig::for_verbosity(cli.verbose);
    if let Err(e) = clash_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match dispatch(cli) {
        Ok(code) => exit_code(code),
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::FAILURE
        },
    }
}

/// Run the selected command, returning the process exit code.
fn dispatch(cli: Cli) -> Result<i32> {
    let opts = cli.run_options();
    let policy_path = cli.policy.as_deref();

    match cli.command {
        Commands::Run { command } => run::run_command(&command, policy_path, &opts),
        Commands::Codex(p) => run::run_wrapped("codex", p.args, policy_path, &opts),
        Commands::Gemini(p) => run::run_wrapped("gemini", p.args, policy_path, &opts),
        Commands::Claude(p) => run::run_wrapped("claude", p.args, policy_path, &opts),
        Commands::Copilot(p) => run::run_wrapped("copilot", p.args, policy_path, &opts),
        Commands::Init => init::run_init().map(|()| 0),
        Commands::Policy {
            command: PolicyCommands::Explain,
        } => policy::explain_policy(policy_path).map(|()| 0),
        Commands::Decision {
            command: DecisionCommands::Explain { id },
        } => decision::explain_decision(&id).map(|()| 0),
        Commands::Audit {
            command: AuditCommands::List { limit },
        } => audit::list_entries(limit).map(|()| 0),
        Commands::Doctor => doctor::run_doctor(policy_path).map(|()| 0),
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
