//! Every invocation leaves exactly one ledger entry.

mod common;

use std::collections::HashSet;

use clash_audit::{AuditLedger, Outcome};
use clash_runtime::{RunOptions, RuntimeError};
use common::{FakeExecutor, Gate, ScriptedPrompter, argv};

#[test]
fn one_entry_per_invocation_for_every_outcome() {
    let gate = Gate::new();
    let ledger = gate.ledger();

    let cases = [
        (argv(&["rm", "-rf", "/"]), 0, Outcome::Blocked),
        (argv(&["git", "push"]), 0, Outcome::Cancelled),
        (argv(&["ls"]), 0, Outcome::Executed),
        (argv(&["ls", "nope"]), 2, Outcome::Failed),
    ];

    let mut ids = Vec::new();
    for (cmd, exit, expected) in &cases {
        let report = gate
            .runner(Gate::policy())
            .with_executor(FakeExecutor::exiting(*exit))
            .with_prompter(ScriptedPrompter::refusing())
            .run(cmd, &RunOptions::default())
            .unwrap();
        assert_eq!(report.entry.outcome, *expected);
        ids.push(report.entry.id);
    }

    let entries = ledger.entries().unwrap();
    assert_eq!(entries.len(), cases.len());
    let outcomes: Vec<_> = entries.iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        [
            Outcome::Blocked,
            Outcome::Cancelled,
            Outcome::Executed,
            Outcome::Failed
        ]
    );

    for id in &ids {
        assert_eq!(&ledger.find(id).unwrap().id, id);
    }
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
}

#[test]
fn entries_are_plain_json_lines() {
    let gate = Gate::new();
    gate.runner(Gate::policy())
        .with_executor(FakeExecutor::default())
        .run(&argv(&["git", "status"]), &RunOptions::default())
        .unwrap();

    let raw = std::fs::read_to_string(gate.root().join(".clash").join("audit.log")).unwrap();
    let line = raw.lines().next().unwrap();
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["command"], "git status");
    assert_eq!(json["decision"], "ALLOW");
    assert_eq!(json["outcome"], "executed");
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["cwd"], gate.root().display().to_string());
}

#[test]
fn runners_in_parallel_threads_do_not_interleave() {
    let gate = Gate::new();
    let root = gate.root();

    let handles: Vec<_> = (0..6)
        .map(|t| {
            let root = root.clone();
            std::thread::spawn(move || {
                let ctx = clash_core::ContextSnapshot::new(&root).with_repo_root(&root);
                let ledger = AuditLedger::open(root.join(".clash").join("audit.log")).unwrap();
                let runner = clash_runtime::Runner::new(Gate::policy(), ctx, ledger)
                    .with_executor(FakeExecutor::default());
                for i in 0..10 {
                    runner
                        .run(&argv(&["echo", &format!("{t}-{i}")]), &RunOptions::default())
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let raw = std::fs::read_to_string(root.join(".clash").join("audit.log")).unwrap();
    assert_eq!(raw.lines().count(), 60);
    assert_eq!(gate.ledger().entries().unwrap().len(), 60);
}

#[test]
fn unwritable_ledger_is_an_error() {
    let gate = Gate::new();
    // A directory where the ledger file should be.
    let path = gate.root().join("ledger-dir");
    std::fs::create_dir_all(&path).unwrap();
    let ledger = AuditLedger::open(&path).unwrap();

    let result = clash_runtime::Runner::new(Gate::policy(), gate.ctx(), ledger)
        .with_executor(FakeExecutor::default())
        .run(&argv(&["ls"]), &RunOptions::default());
    assert!(matches!(result, Err(RuntimeError::Audit(_))));
}
