//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]
#![allow(clippy::needless_pass_by_ref_mut)] // &mut self for ergonomics with RefCell

use crate::error::{Error, Result};
use crate::model::{Changeset, Repository, RevealOptions, RevealTarget, StashFlags};
use crate::traits::{CommandOutput, CommandRunner, Presenter, StashProvider};
use crate::wizard::{Response, Step};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// A mock command runner for testing.
///
/// Records expected commands and their outputs, then verifies they were called.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    expectations: RefCell<Vec<(String, Vec<String>, CommandOutput)>>,
    call_index: RefCell<usize>,
}

impl MockCommandRunner {
    /// Create a new mock command runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected command and its output.
    pub fn expect(&mut self, program: &str, args: &[&str], output: CommandOutput) {
        self.expectations.borrow_mut().push((
            program.to_string(),
            args.iter().map(|s| (*s).to_string()).collect(),
            output,
        ));
    }

    /// Verify all expected commands were called.
    ///
    /// # Panics
    ///
    /// Panics if not all expected commands were called.
    pub fn verify(&self) {
        let index = *self.call_index.borrow();
        let expected = self.expectations.borrow().len();
        assert_eq!(
            index, expected,
            "Expected {expected} command calls, but only {index} were made"
        );
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut index = self.call_index.borrow_mut();
        let expectations = self.expectations.borrow();

        assert!(
            *index < expectations.len(),
            "Unexpected command call: {program} {args:?} (no more expectations)"
        );

        let (exp_program, exp_args, output) = &expectations[*index];
        let args_vec: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();

        assert!(
            !(program != exp_program || &args_vec != exp_args),
            "Command mismatch at index {}:\n  Expected: {} {:?}\n  Got: {} {:?}",
            *index,
            exp_program,
            exp_args,
            program,
            args
        );

        *index += 1;
        Ok(output.clone())
    }
}

/// One call made to a [`MockStashProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    /// `list_changesets`
    List(PathBuf),
    /// `changeset_files`
    Files(String),
    /// `apply_changeset`
    Apply {
        /// Stash reference.
        ref_name: String,
        /// Whether it was a pop.
        remove: bool,
    },
    /// `delete_changeset`
    Delete(String),
    /// `save_changeset`
    Save {
        /// Message.
        message: String,
        /// Path scope.
        paths: Vec<PathBuf>,
        /// Flags.
        flags: StashFlags,
    },
    /// `reveal`
    Reveal(RevealTarget),
}

/// An in-memory stash provider that records every call.
#[derive(Debug, Default)]
pub struct MockStashProvider {
    contexts: Vec<Repository>,
    active: Option<Repository>,
    stashes: HashMap<PathBuf, Vec<Changeset>>,
    files: HashMap<String, Vec<String>>,
    failures: HashMap<&'static str, Error>,
    calls: RefCell<Vec<ProviderCall>>,
}

impl MockStashProvider {
    /// A provider offering the given repositories.
    #[must_use]
    pub fn with_contexts(paths: &[&str]) -> Self {
        Self {
            contexts: paths.iter().map(|p| Repository::from_path(*p)).collect(),
            ..Self::default()
        }
    }

    /// Report `path` as the active repository.
    #[must_use]
    pub fn active(mut self, path: &str) -> Self {
        self.active = Some(Repository::from_path(path));
        self
    }

    /// Add stashes to a repository, newest first.
    #[must_use]
    pub fn stashes(mut self, repo: &str, changesets: Vec<Changeset>) -> Self {
        self.stashes.entry(PathBuf::from(repo)).or_default().extend(changesets);
        self
    }

    /// Files reported for a stash reference.
    #[must_use]
    pub fn files(mut self, ref_name: &str, files: &[&str]) -> Self {
        self.files.insert(ref_name.to_string(), files.iter().map(|f| (*f).to_string()).collect());
        self
    }

    /// Make an operation fail. `op` is one of `list`, `files`, `apply`,
    /// `delete`, `save`, `reveal`.
    #[must_use]
    pub fn failing(mut self, op: &'static str, error: Error) -> Self {
        self.failures.insert(op, error);
        self
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.borrow().clone()
    }

    /// Calls that change the repository.
    #[must_use]
    pub fn terminal_calls(&self) -> Vec<ProviderCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    ProviderCall::Apply { .. } | ProviderCall::Delete(_) | ProviderCall::Save { .. }
                )
            })
            .cloned()
            .collect()
    }

    fn check(&self, op: &'static str, call: ProviderCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.failures.get(op) {
            Some(error) => Err(clone_error(error)),
            None => Ok(()),
        }
    }
}

/// Errors are not `Clone`; rebuild the variants tests configure.
fn clone_error(error: &Error) -> Error {
    match error {
        Error::CommandFailed { command, exit_code, output } => Error::CommandFailed {
            command: command.clone(),
            exit_code: *exit_code,
            output: output.clone(),
        },
        Error::Stash { reason, message } => {
            Error::Stash { reason: *reason, message: message.clone() }
        }
        other => Error::Git(other.to_string()),
    }
}

impl StashProvider for MockStashProvider {
    fn list_contexts(&self) -> Result<Vec<Repository>> {
        Ok(self.contexts.clone())
    }

    fn active_context(&self) -> Option<Repository> {
        self.active.clone()
    }

    fn list_changesets(&self, repo: &Path) -> Result<Option<Vec<Changeset>>> {
        self.check("list", ProviderCall::List(repo.to_path_buf()))?;
        Ok(self.stashes.get(repo).filter(|s| !s.is_empty()).cloned())
    }

    fn changeset_files(&self, _repo: &Path, changeset: &Changeset) -> Result<Vec<String>> {
        self.check("files", ProviderCall::Files(changeset.ref_name.clone()))?;
        Ok(self.files.get(&changeset.ref_name).cloned().unwrap_or_default())
    }

    fn apply_changeset(&self, _repo: &Path, changeset: &Changeset, remove: bool) -> Result<String> {
        self.check("apply", ProviderCall::Apply { ref_name: changeset.ref_name.clone(), remove })?;
        Ok(format!("applied {}", changeset.ref_name))
    }

    fn delete_changeset(&self, _repo: &Path, changeset: &Changeset) -> Result<String> {
        self.check("delete", ProviderCall::Delete(changeset.ref_name.clone()))?;
        Ok(format!("Dropped {}", changeset.ref_name))
    }

    fn save_changeset(
        &self,
        _repo: &Path,
        message: &str,
        paths: &[PathBuf],
        flags: StashFlags,
    ) -> Result<String> {
        self.check(
            "save",
            ProviderCall::Save { message: message.to_string(), paths: paths.to_vec(), flags },
        )?;
        Ok("Saved working directory and index state".to_string())
    }

    fn reveal(&self, target: &RevealTarget, _options: RevealOptions) -> Result<Option<String>> {
        self.check("reveal", ProviderCall::Reveal(target.clone()))?;
        Ok(Some(match target {
            RevealTarget::Changeset(c) => format!("showing {}", c.ref_name),
            RevealTarget::Repository(path) => format!("showing {}", path.display()),
        }))
    }
}

/// Create a stash entry for tests.
#[must_use]
pub fn changeset(repo: &str, index: usize, message: &str) -> Changeset {
    let sha = format!("{:0>40}", format!("{index}abc"));
    Changeset {
        ref_name: format!("stash@{{{index}}}"),
        sha,
        message: message.to_string(),
        branch: Some("main".to_string()),
        date: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        repo_path: PathBuf::from(repo),
    }
}

/// A presenter that answers from a queue and records what it was shown.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    responses: VecDeque<Response>,
    shown: Vec<Step>,
}

impl ScriptedPresenter {
    /// Answer with these responses, in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self { responses: responses.into_iter().collect(), shown: Vec::new() }
    }

    /// Steps presented so far.
    #[must_use]
    pub fn shown(&self) -> &[Step] {
        &self.shown
    }

    /// Responses not yet used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Presenter for ScriptedPresenter {
    fn present(&mut self, step: &Step) -> Result<Response> {
        self.shown.push(step.clone());
        self.responses
            .pop_front()
            .ok_or_else(|| Error::InvalidResponse(format!("no scripted answer for '{}'", step.title)))
    }
}
