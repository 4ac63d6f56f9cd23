//! Clash Runtime - the execution orchestrator.
//!
//! [`Runner`] composes the ladder, the arbiter, the preview engine and the
//! ledger with three injected collaborators:
//!
//! - [`Prompter`]: asks the operator (the CLI uses a terminal prompt)
//! - [`CommandExecutor`]: runs the approved command ([`ProcessExecutor`])
//! - [`Reporter`]: renders progress (the CLI prints it, tests record it)
//!
//! Everything runs synchronously on the calling thread.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod executor;
pub mod prompt;
pub mod report;
pub mod runner;

pub use error::{RuntimeError, RuntimeResult};
pub use executor::{CommandExecutor, ExecOutcome, ProcessExecutor};
pub use prompt::{DenyPrompter, Prompter};
pub use report::{Reporter, SilentReporter};
pub use runner::{
    BREAK_GLASS_PROMPT, CONFIRM_PROMPT, EXIT_REFUSED, RunOptions, RunReport, Runner,
};
