//! The execution orchestrator.
//!
//! ```text
//! Start -> Classified -> (Arbitrated) -> (Previewed)
//!       -> Decided{Blocked | Cancelled | Approved}
//!       -> (BreakGlassChecked) -> Executed | Failed -> Recorded -> End
//! ```
//!
//! Every path ends in exactly one ledger entry. Blocked and cancelled
//! paths report exit code 1; executed and failed paths report the
//! command's own exit code.

use clash_approval::{Arbiter, Ladder, Verdict, arbiter, break_glass};
use clash_audit::{Approver, AuditEntry, AuditLedger, Outcome, PreviewRecord};
use clash_config::Policy;
use clash_core::{ContextSnapshot, Decision};
use clash_preview::PreviewResult;
use tracing::{debug, info};

use crate::error::RuntimeResult;
use crate::executor::{CommandExecutor, ProcessExecutor};
use crate::prompt::{DenyPrompter, Prompter};
use crate::report::{Reporter, SilentReporter};

/// Prompt shown before running a CONFIRM command.
pub const CONFIRM_PROMPT: &str = "Proceed with execution?";

/// Prompt shown before the break-glass phrase.
pub const BREAK_GLASS_PROMPT: &str = "Break-glass override requested.";

/// Exit code for blocked and cancelled invocations.
pub const EXIT_REFUSED: i32 = 1;

/// Per-invocation flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Approve CONFIRM verdicts without prompting.
    pub auto_approve: bool,
    /// Request the break-glass override.
    pub break_glass: bool,
    /// Reason recorded with a break-glass override.
    pub break_glass_reason: Option<String>,
}

/// Result of one invocation.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The entry written to the ledger.
    pub entry: AuditEntry,
    /// Process exit code to return.
    pub exit_code: i32,
}

/// How the decision step resolved, carried into the ledger entry.
#[derive(Debug, Default)]
struct Resolution {
    approved_by: Option<Approver>,
    break_glass: bool,
    break_glass_reason: Option<String>,
    error: Option<String>,
}

/// Sequences classification, arbitration, preview, approval, execution
/// and recording for one policy and context.
pub struct Runner {
    policy: Policy,
    ctx: ContextSnapshot,
    ledger: AuditLedger,
    prompter: Box<dyn Prompter>,
    executor: Box<dyn CommandExecutor>,
    arbiter: Option<Box<dyn Arbiter>>,
    reporter: Box<dyn Reporter>,
}

impl Runner {
    /// Create a runner.
    ///
    /// Defaults: a prompter that refuses, the process executor, the arbiter
    /// named by the policy, and a silent reporter.
    #[must_use]
    pub fn new(policy: Policy, ctx: ContextSnapshot, ledger: AuditLedger) -> Self {
        let arbiter = arbiter::from_config(&policy.arbiter);
        Self {
            policy,
            ctx,
            ledger,
            prompter: Box::new(DenyPrompter),
            executor: Box::new(ProcessExecutor),
            arbiter,
            reporter: Box::new(SilentReporter),
        }
    }

    /// Set the prompter.
    #[must_use]
    pub fn with_prompter(mut self, prompter: impl Prompter + 'static) -> Self {
        self.prompter = Box::new(prompter);
        self
    }

    /// Set the executor.
    #[must_use]
    pub fn with_executor(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Replace the arbiter. It is still consulted only when the policy
    /// enables arbitration.
    #[must_use]
    pub fn with_arbiter(mut self, arbiter: impl Arbiter + 'static) -> Self {
        self.arbiter = Some(Box::new(arbiter));
        self
    }

    /// Set the reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// The effective policy.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The ledger entries are written to.
    #[must_use]
    pub fn ledger(&self) -> &AuditLedger {
        &self.ledger
    }

    /// Run `command` through the gate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RuntimeError::Audit`] if the ledger entry cannot be
    /// written. The command may already have run by then.
    pub fn run(&self, command: &[String], opts: &RunOptions) -> RuntimeResult<RunReport> {
        // Classified
        let mut verdict = Ladder::new(&self.policy).evaluate(command, &self.ctx);

        // Arbitrated
        if self.policy.arbiter.enabled {
            if let Some(arbiter) = self.arbiter.as_deref() {
                arbiter::consult(arbiter, command, &mut verdict);
            }
        }

        // Previewed
        let preview = verdict.preview_hint().map(|hint| {
            clash_preview::run(hint, &self.ctx, self.policy.thresholds.preview_sample)
        });

        // Decided
        let mut resolution = Resolution::default();
        match verdict.decision() {
            Decision::Block => {
                self.reporter.blocked(&verdict);
                return self.finish(
                    command,
                    &verdict,
                    preview,
                    Outcome::Blocked,
                    EXIT_REFUSED,
                    resolution,
                );
            },
            Decision::Confirm => {
                self.reporter.confirm(&verdict, preview.as_ref());
                if let Some(p) = &preview {
                    let threshold = self.policy.thresholds.delete_count;
                    if threshold > 0 && p.count > threshold {
                        self.reporter.mass_delete(p.count, threshold);
                    }
                }

                if opts.auto_approve {
                    resolution.approved_by = Some(Approver::Flag);
                } else if opts.break_glass {
                    debug!("break-glass requested; confirmation prompt skipped");
                } else if self.ask_confirmation() {
                    resolution.approved_by = Some(Approver::User);
                } else {
                    self.reporter.cancelled();
                    return self.finish(
                        command,
                        &verdict,
                        preview,
                        Outcome::Cancelled,
                        EXIT_REFUSED,
                        resolution,
                    );
                }
            },
            Decision::Allow => self.reporter.allowed(&verdict),
        }

        // BreakGlassChecked
        if opts.break_glass {
            if let Some(reason) =
                break_glass::precondition_failure(&self.policy.options, &self.ctx)
            {
                self.reporter.break_glass_unavailable(&reason);
                resolution.error = Some(reason);
                return self.finish(
                    command,
                    &verdict,
                    preview,
                    Outcome::Cancelled,
                    EXIT_REFUSED,
                    resolution,
                );
            }
            if !self.ask_break_glass_phrase() {
                self.reporter.break_glass_mismatch();
                resolution.error = Some("break-glass phrase mismatch".to_owned());
                return self.finish(
                    command,
                    &verdict,
                    preview,
                    Outcome::Cancelled,
                    EXIT_REFUSED,
                    resolution,
                );
            }
            resolution.break_glass = true;
            resolution.break_glass_reason = opts.break_glass_reason.clone();
        }

        // Executed | Failed
        let exec = self.executor.execute(command, &self.ctx.cwd);
        let outcome = if exec.is_success() {
            Outcome::Executed
        } else {
            Outcome::Failed
        };
        resolution.error = exec.error;
        self.finish(command, &verdict, preview, outcome, exec.exit_code, resolution)
    }

    fn ask_confirmation(&self) -> bool {
        self.prompter.confirm(CONFIRM_PROMPT).unwrap_or_else(|e| {
            debug!(error = %e, "confirmation prompt failed; treating as refusal");
            false
        })
    }

    fn ask_break_glass_phrase(&self) -> bool {
        match self
            .prompter
            .read_phrase(BREAK_GLASS_PROMPT, break_glass::BREAK_GLASS_PHRASE)
        {
            Ok(typed) => break_glass::phrase_matches(&typed),
            Err(e) => {
                debug!(error = %e, "break-glass prompt failed; treating as mismatch");
                false
            },
        }
    }

    // Recorded
    fn finish(
        &self,
        command: &[String],
        verdict: &Verdict,
        preview: Option<PreviewResult>,
        outcome: Outcome,
        exit_code: i32,
        resolution: Resolution,
    ) -> RuntimeResult<RunReport> {
        let mut entry = AuditEntry::new(command, &self.ctx, verdict.decision(), outcome);
        entry.hard = verdict.is_hard();
        entry.signals = verdict.signals().to_vec();
        entry.reasons = verdict.reasons().to_vec();
        entry.safer_alternative = verdict.safer_alternative().map(str::to_owned);
        entry.preview = preview.map(|p| PreviewRecord {
            count: p.count,
            sample: p.sample,
            note: p.note,
            err: p.error,
        });
        entry.approved_by = resolution.approved_by;
        entry.break_glass = resolution.break_glass;
        entry.break_glass_reason = resolution.break_glass_reason;
        entry.exit_code = exit_code;
        entry.error = resolution.error;

        self.ledger.record(&entry)?;
        info!(
            id = %entry.id,
            decision = %entry.decision,
            outcome = %entry.outcome,
            exit_code,
            "invocation recorded"
        );

        Ok(RunReport { entry, exit_code })
    }
}
