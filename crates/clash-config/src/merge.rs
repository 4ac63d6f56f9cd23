//! Override merge.
//!
//! An override document is laid over the embedded defaults field by field:
//!
//! | Field | Rule |
//! |---|---|
//! | thresholds | each replaces the base only when non-zero |
//! | command and path lists | replace wholesale when non-empty, never unioned |
//! | `arbiter` | replaces wholesale when enabled, or when any string is set |
//! | `options.allow_outside_repo` | OR |
//! | `options.require_clean_tree_for_break_glass` | can only be turned on |
//!
//! The last rule is one-directional on purpose: an override cannot switch
//! the clean-tree requirement off once the base has it on.

use tracing::debug;

use crate::types::Policy;

/// Merge `overlay` into `base` in place.
pub fn merge(base: &mut Policy, overlay: Policy) {
    let Policy {
        thresholds,
        protected_paths,
        allow_commands,
        block_commands,
        confirm_commands,
        network_egress,
        package_managers,
        arbiter,
        options,
    } = overlay;

    replace_if_set(&mut base.thresholds.delete_count, thresholds.delete_count);
    replace_if_set(&mut base.thresholds.modify_count, thresholds.modify_count);
    replace_if_set(&mut base.thresholds.preview_sample, thresholds.preview_sample);

    replace_if_non_empty("protected_paths", &mut base.protected_paths, protected_paths);
    replace_if_non_empty("allow_commands", &mut base.allow_commands, allow_commands);
    replace_if_non_empty("block_commands", &mut base.block_commands, block_commands);
    replace_if_non_empty("confirm_commands", &mut base.confirm_commands, confirm_commands);
    replace_if_non_empty("network_egress", &mut base.network_egress, network_egress);
    replace_if_non_empty("package_managers", &mut base.package_managers, package_managers);

    if arbiter.enabled || arbiter.has_settings() {
        debug!(enabled = arbiter.enabled, "override replaces arbiter settings");
        base.arbiter = arbiter;
    }

    base.options.allow_outside_repo |= options.allow_outside_repo;
    if options.require_clean_tree_for_break_glass {
        base.options.require_clean_tree_for_break_glass = true;
    }
}

fn replace_if_set(base: &mut usize, value: usize) {
    if value != 0 {
        *base = value;
    }
}

fn replace_if_non_empty(field: &str, base: &mut Vec<String>, value: Vec<String>) {
    if !value.is_empty() {
        debug!(field, entries = value.len(), "override replaces list");
        *base = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArbiterConfig, PolicyOptions, Thresholds};

    fn base() -> Policy {
        Policy {
            thresholds: Thresholds {
                delete_count: 25,
                modify_count: 50,
                preview_sample: 10,
            },
            protected_paths: vec!["~/.ssh".into(), "/etc".into()],
            allow_commands: vec!["git status".into()],
            block_commands: vec!["mkfs".into()],
            confirm_commands: vec!["docker".into()],
            network_egress: vec!["curl".into()],
            package_managers: vec!["npm".into()],
            arbiter: ArbiterConfig::default(),
            options: PolicyOptions {
                allow_outside_repo: false,
                require_clean_tree_for_break_glass: true,
            },
        }
    }

    #[test]
    fn test_empty_overlay_changes_nothing() {
        let mut merged = base();
        merge(&mut merged, Policy::default());
        assert_eq!(merged, base());
    }

    #[test]
    fn test_thresholds_replace_only_when_non_zero() {
        let mut merged = base();
        let overlay = Policy {
            thresholds: Thresholds {
                delete_count: 5,
                modify_count: 0,
                preview_sample: 0,
            },
            ..Policy::default()
        };
        merge(&mut merged, overlay);
        assert_eq!(merged.thresholds.delete_count, 5);
        assert_eq!(merged.thresholds.modify_count, 50);
        assert_eq!(merged.thresholds.preview_sample, 10);
    }

    #[test]
    fn test_lists_replace_wholesale() {
        let mut merged = base();
        let overlay = Policy {
            block_commands: vec!["terraform destroy".into()],
            ..Policy::default()
        };
        merge(&mut merged, overlay);
        assert_eq!(merged.block_commands, vec!["terraform destroy".to_string()]);
        assert_eq!(merged.allow_commands, vec!["git status".to_string()]);
    }

    #[test]
    fn test_arbiter_replaced_when_enabled() {
        let mut merged = base();
        let overlay = Policy {
            arbiter: ArbiterConfig {
                enabled: true,
                provider: "stub".into(),
                ..ArbiterConfig::default()
            },
            ..Policy::default()
        };
        merge(&mut merged, overlay);
        assert!(merged.arbiter.enabled);
        assert_eq!(merged.arbiter.provider, "stub");
    }

    #[test]
    fn test_arbiter_replaced_when_disabled_with_settings() {
        let mut merged = base();
        merged.arbiter.enabled = true;
        merged.arbiter.provider = "stub".into();

        let overlay = Policy {
            arbiter: ArbiterConfig {
                enabled: false,
                model: "small".into(),
                ..ArbiterConfig::default()
            },
            ..Policy::default()
        };
        merge(&mut merged, overlay);
        assert!(!merged.arbiter.enabled);
        assert_eq!(merged.arbiter.model, "small");
        assert!(merged.arbiter.provider.is_empty());
    }

    #[test]
    fn test_allow_outside_repo_is_ored() {
        let mut merged = base();
        merge(
            &mut merged,
            Policy {
                options: PolicyOptions {
                    allow_outside_repo: true,
                    require_clean_tree_for_break_glass: false,
                },
                ..Policy::default()
            },
        );
        assert!(merged.options.allow_outside_repo);

        merge(&mut merged, Policy::default());
        assert!(merged.options.allow_outside_repo);
    }

    #[test]
    fn test_clean_tree_requirement_cannot_be_unset() {
        let mut merged = base();
        merge(
            &mut merged,
            Policy {
                options: PolicyOptions {
                    allow_outside_repo: false,
                    require_clean_tree_for_break_glass: false,
                },
                ..Policy::default()
            },
        );
        assert!(merged.options.require_clean_tree_for_break_glass);

        let mut relaxed = base();
        relaxed.options.require_clean_tree_for_break_glass = false;
        merge(
            &mut relaxed,
            Policy {
                options: PolicyOptions {
                    allow_outside_repo: false,
                    require_clean_tree_for_break_glass: true,
                },
                ..Policy::default()
            },
        );
        assert!(relaxed.options.require_clean_tree_for_break_glass);
    }
}
