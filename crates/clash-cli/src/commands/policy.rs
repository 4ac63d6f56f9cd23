//! Policy command - print the effective policy.

use std::path::Path;

use super::{detect_context, load_policy};

/// Print the merged policy as YAML on stdout.
pub(crate) fn explain_policy(policy_path: Option<&Path>) -> anyhow::Result<()> {
    let ctx = detect_context()?;
    let loaded = load_policy(&ctx, policy_path)?;
    tracing::debug!(source = %loaded.source, "explaining policy");
    print!("{}", loaded.policy.to_yaml()?);
    Ok(())
}
