//! CLI command implementations.

pub(crate) mod audit;
pub(crate) mod decision;
pub(crate) mod doctor;
pub(crate) mod init;
pub(crate) mod policy;
pub(crate) mod run;

use std::path::Path;

use anyhow::{Context, Result};
use clash_audit::AuditLedger;
use clash_config::{LoadedPolicy, Policy};
use clash_core::ContextSnapshot;

/// Detect the invocation context.
pub(crate) fn detect_context() -> Result<ContextSnapshot> {
    ContextSnapshot::detect().context("failed to detect the working directory")
}

/// Load the effective policy for `ctx`.
pub(crate) fn load_policy(ctx: &ContextSnapshot, explicit: Option<&Path>) -> Result<LoadedPolicy> {
    Policy::load(explicit, ctx.root_or_cwd()).context("invalid policy")
}

/// Open the ledger for `ctx`.
pub(crate) fn open_ledger(ctx: &ContextSnapshot) -> Result<AuditLedger> {
    AuditLedger::for_context(ctx).context("failed to open the audit ledger")
}
