//! Post-merge policy validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Policy;

/// Validate a merged policy.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(policy: &Policy) -> ConfigResult<()> {
    validate_thresholds(policy)?;
    validate_arbiter(policy)?;
    Ok(())
}

fn validate_thresholds(policy: &Policy) -> ConfigResult<()> {
    if policy.thresholds.preview_sample == 0 {
        return Err(ConfigError::ValidationError {
            field: "thresholds.preview_sample".to_owned(),
            message: "preview_sample must be greater than zero".to_owned(),
        });
    }
    Ok(())
}

fn validate_arbiter(policy: &Policy) -> ConfigResult<()> {
    if policy.arbiter.enabled && policy.arbiter.provider.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "arbiter.provider".to_owned(),
            message: "an enabled arbiter needs a provider".to_owned(),
        });
    }
    Ok(())
}
