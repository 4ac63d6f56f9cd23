//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clash_approval::{Arbiter, ArbiterDecision, ArbiterInput, Ladder, Verdict};
use clash_audit::AuditLedger;
use clash_config::Policy;
use clash_core::{ContextSnapshot, Decision, GitSummary};
use clash_preview::PreviewResult;
use clash_runtime::{CommandExecutor, ExecOutcome, Prompter, Reporter, Runner};
use tempfile::TempDir;

pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

/// Prompter with canned answers that remembers what it was asked.
#[derive(Clone)]
pub struct ScriptedPrompter {
    pub approve: bool,
    pub phrase: String,
    pub asked: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn approving() -> Self {
        Self::new(true, "")
    }

    pub fn refusing() -> Self {
        Self::new(false, "")
    }

    pub fn typing(phrase: &str) -> Self {
        Self::new(true, phrase)
    }

    fn new(approve: bool, phrase: &str) -> Self {
        Self {
            approve,
            phrase: phrase.to_string(),
            asked: Rc::default(),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.approve)
    }

    fn read_phrase(&self, prompt: &str, _phrase: &str) -> io::Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.phrase.clone())
    }
}

/// Executor that records argv and returns a fixed exit code.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    pub exit_code: i32,
    pub calls: Rc<RefCell<Vec<(Vec<String>, PathBuf)>>>,
}

impl FakeExecutor {
    pub fn exiting(exit_code: i32) -> Self {
        Self {
            exit_code,
            calls: Rc::default(),
        }
    }

    pub fn ran(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|(a, _)| a.clone()).collect()
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute(&self, argv: &[String], cwd: &Path) -> ExecOutcome {
        self.calls
            .borrow_mut()
            .push((argv.to_vec(), cwd.to_path_buf()));
        if self.exit_code == 0 {
            ExecOutcome::success()
        } else {
            ExecOutcome::failure(self.exit_code, format!("exit status {}", self.exit_code))
        }
    }
}

/// Arbiter that always answers the same.
pub struct FixedArbiter(pub Decision);

impl Arbiter for FixedArbiter {
    fn decide(&self, _input: &ArbiterInput) -> ArbiterDecision {
        ArbiterDecision {
            decision: self.0,
            reason: format!("fixed {}", self.0),
        }
    }
}

/// Reporter that records event names.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub events: Rc<RefCell<Vec<String>>>,
}

impl RecordingReporter {
    pub fn seen(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn blocked(&self, verdict: &Verdict) {
        self.push(format!("blocked hard={}", verdict.is_hard()));
    }

    fn confirm(&self, _verdict: &Verdict, preview: Option<&PreviewResult>) {
        match preview {
            Some(p) => self.push(format!("confirm preview={}", p.count)),
            None => self.push("confirm".to_string()),
        }
    }

    fn mass_delete(&self, count: usize, threshold: usize) {
        self.push(format!("mass_delete {count}>{threshold}"));
    }

    fn allowed(&self, _verdict: &Verdict) {
        self.push("allowed".to_string());
    }

    fn cancelled(&self) {
        self.push("cancelled".to_string());
    }

    fn break_glass_unavailable(&self, _reason: &str) {
        self.push("break_glass_unavailable".to_string());
    }

    fn break_glass_mismatch(&self) {
        self.push("break_glass_mismatch".to_string());
    }
}

/// A throwaway repository with its own ledger and fake home.
pub struct Gate {
    pub repo: TempDir,
    pub home: TempDir,
}

impl Gate {
    pub fn new() -> Self {
        let repo = TempDir::new().expect("failed to create tempdir");
        std::fs::create_dir(repo.path().join(".git")).expect("failed to create .git");
        Self {
            repo,
            home: TempDir::new().expect("failed to create tempdir"),
        }
    }

    pub fn root(&self) -> PathBuf {
        self.repo.path().canonicalize().expect("tempdir must resolve")
    }

    pub fn ctx(&self) -> ContextSnapshot {
        ContextSnapshot::new(self.root()).with_repo_root(self.root())
    }

    pub fn dirty_ctx(&self) -> ContextSnapshot {
        self.ctx().with_git(GitSummary::new(2, 1))
    }

    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, "x").expect("failed to write fixture");
        path
    }

    pub fn ledger(&self) -> AuditLedger {
        AuditLedger::open(self.root().join(".clash").join("audit.log")).expect("ledger must open")
    }

    pub fn policy() -> Policy {
        Policy::defaults().expect("embedded defaults must parse")
    }

    /// Ladder with this gate's fake home and an empty environment.
    pub fn ladder<'a>(&self, policy: &'a Policy) -> Ladder<'a> {
        Ladder::new(policy)
            .with_home(Some(self.home.path().to_path_buf()))
            .with_vars(HashMap::new())
    }

    pub fn runner(&self, policy: Policy) -> Runner {
        Runner::new(policy, self.ctx(), self.ledger())
    }

    pub fn dirty_runner(&self, policy: Policy) -> Runner {
        Runner::new(policy, self.dirty_ctx(), self.ledger())
    }
}
