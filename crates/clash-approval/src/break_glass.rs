//! Break-glass override.
//!
//! Break-glass skips the confirmation prompt for a CONFIRM verdict once the
//! operator has typed [`BREAK_GLASS_PHRASE`] exactly. It never lifts a
//! BLOCK.

use clash_config::PolicyOptions;
use clash_core::ContextSnapshot;

/// The phrase the operator must type.
pub const BREAK_GLASS_PHRASE: &str = "break glass for clash";

/// Whether `input` is the phrase, ignoring surrounding whitespace only.
#[must_use]
pub fn phrase_matches(input: &str) -> bool {
    input.trim() == BREAK_GLASS_PHRASE
}

/// Why break-glass cannot be used in this context, if it cannot.
#[must_use]
pub fn precondition_failure(options: &PolicyOptions, ctx: &ContextSnapshot) -> Option<String> {
    if options.require_clean_tree_for_break_glass && ctx.git.is_dirty() {
        return Some(format!(
            "break-glass requires a clean working tree ({} changed, {} untracked)",
            ctx.git.changed, ctx.git.untracked
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use clash_core::GitSummary;

    #[test]
    fn test_phrase_must_match_exactly() {
        assert!(phrase_matches("break glass for clash"));
        assert!(phrase_matches("  break glass for clash\n"));
        assert!(!phrase_matches("Break Glass For Clash"));
        assert!(!phrase_matches("break glass"));
        assert!(!phrase_matches(""));
    }

    #[test]
    fn test_clean_tree_requirement() {
        let strict = PolicyOptions {
            allow_outside_repo: false,
            require_clean_tree_for_break_glass: true,
        };
        let clean = ContextSnapshot::new("/repo").with_repo_root("/repo");
        let dirty = clean.clone().with_git(GitSummary::new(0, 2));

        assert!(precondition_failure(&strict, &clean).is_none());
        assert!(
            precondition_failure(&strict, &dirty)
                .unwrap()
                .contains("2 untracked")
        );

        let relaxed = PolicyOptions::default();
        assert!(precondition_failure(&relaxed, &dirty).is_none());
    }
}
