//! End-to-end checks of the documented gate behaviour.

mod common;

use clash_approval::arbiter;
use clash_audit::Outcome;
use clash_core::{Decision, RiskSignal};
use clash_preview::PreviewHint;
use clash_runtime::RunOptions;
use common::{FakeExecutor, FixedArbiter, Gate, ScriptedPrompter, argv};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn rm_rf_root_is_hard_blocked_and_never_runs() {
    let gate = Gate::new();
    let policy = Gate::policy();
    let v = gate.ladder(&policy).evaluate(&argv(&["rm", "-rf", "/"]), &gate.ctx());
    assert_eq!(v.decision(), Decision::Block);
    assert!(v.is_hard());
    assert!(v.reasons().iter().any(|r| r.contains("catastrophic")));

    let exec = FakeExecutor::default();
    let report = gate
        .runner(policy)
        .with_executor(exec.clone())
        .with_prompter(ScriptedPrompter::approving())
        .run(&argv(&["rm", "-rf", "/"]), &RunOptions::default())
        .unwrap();
    assert_eq!(report.entry.outcome, Outcome::Blocked);
    assert_eq!(report.exit_code, 1);
    assert!(exec.ran().is_empty());
}

#[test]
fn rm_of_existing_repo_file_confirms_with_preview() {
    let gate = Gate::new();
    let file = gate.touch("scratch.txt");
    let policy = Gate::policy();

    let v = gate
        .ladder(&policy)
        .evaluate(&argv(&["rm", "./scratch.txt"]), &gate.ctx());
    assert_eq!(v.decision(), Decision::Confirm);
    assert!(v.signals().contains(&RiskSignal::MutatingCommand));
    assert_eq!(
        v.preview_hint(),
        Some(&PreviewHint::Rm {
            targets: vec![file.clone()]
        })
    );

    let preview = clash_preview::run(v.preview_hint().unwrap(), &gate.ctx(), 10);
    assert_eq!(preview.count, 1);
    assert!(preview.sample.contains(&file.display().to_string()));
}

#[test]
fn git_reset_hard_on_clean_tree_falls_through_to_signals() {
    let gate = Gate::new();
    let policy = Gate::policy();
    let v = gate
        .ladder(&policy)
        .evaluate(&argv(&["git", "reset", "--hard"]), &gate.ctx());
    assert_eq!(v.decision(), Decision::Confirm);
    assert!(!v.is_hard());
    assert!(v.signals().contains(&RiskSignal::MutatingCommand));

    let v = gate
        .ladder(&policy)
        .evaluate(&argv(&["git", "reset", "--hard"]), &gate.dirty_ctx());
    assert!(v.is_hard());
}

#[test]
fn ls_is_allowed_without_signals() {
    let gate = Gate::new();
    let policy = Gate::policy();
    let v = gate.ladder(&policy).evaluate(&argv(&["ls"]), &gate.ctx());
    assert_eq!(v.decision(), Decision::Allow);
    assert_eq!(v.reasons(), ["no risk signals"]);
}

#[test]
fn git_clean_fdx_without_path_is_hard_blocked() {
    let gate = Gate::new();
    let policy = Gate::policy();
    let v = gate
        .ladder(&policy)
        .evaluate(&argv(&["git", "clean", "-fdx"]), &gate.ctx());
    assert_eq!(v.decision(), Decision::Block);
    assert!(v.is_hard());
}

#[test]
fn evaluation_is_deterministic() {
    let gate = Gate::new();
    gate.touch("a.txt");
    let policy = Gate::policy();
    for cmd in [
        &["rm", "-f", "a.txt"][..],
        &["curl", "https://example.com"],
        &["npm", "install", "left-pad"],
        &["git", "clean", "-fdx"],
        &["cat", "a.txt"],
    ] {
        let a = gate.ladder(&policy).evaluate(&argv(cmd), &gate.ctx());
        let b = gate.ladder(&policy).evaluate(&argv(cmd), &gate.ctx());
        assert_eq!(a, b, "{cmd:?}");
    }
}

// ---------------------------------------------------------------------------
// Arbiter monotonicity
// ---------------------------------------------------------------------------

#[test]
fn arbiter_can_only_tighten_confirm() {
    let gate = Gate::new();
    let policy = Gate::policy();
    let ladder = gate.ladder(&policy);

    for suggestion in [Decision::Allow, Decision::Confirm, Decision::Block] {
        let mut allow = ladder.evaluate(&argv(&["ls"]), &gate.ctx());
        arbiter::consult(&FixedArbiter(suggestion), &argv(&["ls"]), &mut allow);
        assert_eq!(allow.decision(), Decision::Allow);

        let mut hard = ladder.evaluate(&argv(&["rm", "-rf", "/"]), &gate.ctx());
        arbiter::consult(&FixedArbiter(suggestion), &argv(&["rm", "-rf", "/"]), &mut hard);
        assert_eq!(hard.decision(), Decision::Block);
        assert!(hard.is_hard());

        let cmd = argv(&["git", "push"]);
        let mut confirm = ladder.evaluate(&cmd, &gate.ctx());
        arbiter::consult(&FixedArbiter(suggestion), &cmd, &mut confirm);
        if suggestion == Decision::Block {
            assert_eq!(confirm.decision(), Decision::Block);
            assert!(!confirm.is_hard());
        } else {
            assert_eq!(confirm.decision(), Decision::Confirm);
        }
    }
}

// ---------------------------------------------------------------------------
// Break-glass
// ---------------------------------------------------------------------------

#[test]
fn wrong_break_glass_phrase_cancels_confirm_and_allow() {
    for cmd in [&["git", "push"][..], &["ls"]] {
        let gate = Gate::new();
        let exec = FakeExecutor::default();
        let opts = RunOptions {
            break_glass: true,
            ..RunOptions::default()
        };
        let report = gate
            .runner(Gate::policy())
            .with_executor(exec.clone())
            .with_prompter(ScriptedPrompter::typing("break glass"))
            .run(&argv(cmd), &opts)
            .unwrap();

        assert_eq!(report.entry.outcome, Outcome::Cancelled, "{cmd:?}");
        assert_eq!(report.exit_code, 1);
        assert!(!report.entry.break_glass);
        assert!(exec.ran().is_empty());
    }
}
