//! The stash wizard engine.
//!
//! [`Wizard`] is an explicit state machine. [`Wizard::start`] yields the first
//! step; every [`Wizard::resume`] takes the presentation layer's answer and
//! yields either the next step or the final [`Outcome`]. Nothing is executed
//! until a chain hands back its terminal operation, and after that no further
//! step is yielded.

mod chains;
mod classify;
mod outcome;
mod state;
mod step;

pub use classify::{classify, Report, Severity};
pub use outcome::{Outcome, Terminal};
pub use state::{BackTarget, Invocation, Provenance, Slot, WizardState};
pub use step::{Button, Directive, ListAction, Payload, Response, Step, StepId, StepItem, StepKind};

use crate::config::Preferences;
use crate::error::{Error, Result};
use crate::model::{Repository, RevealOptions, RevealTarget, Subcommand};
use crate::traits::{Presenter, StashProvider};
use crate::wizard_logging::{EventLog, WizardEvent};
use chains::{ChainContext, ChainStep};

/// What the engine hands to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Yield {
    /// Ask this step and call [`Wizard::resume`] with the answer.
    Prompt(Step),
    /// The invocation is over.
    Done(Outcome),
}

/// An answer, validated against the step it resolves.
enum Choice {
    Back,
    Cancel,
    Button(Button, Option<usize>),
    Text(String),
    Payloads(Vec<Payload>),
}

/// What resolving a step leads to.
enum Flow {
    Advance,
    Repeat(Step),
    Finish(Outcome),
}

/// One wizard invocation.
pub struct Wizard<P> {
    provider: P,
    preferences: Preferences,
    contexts: Vec<Repository>,
    state: WizardState,
    pending: Option<Step>,
    finished: bool,
    events: Option<EventLog>,
}

impl<P: StashProvider> Wizard<P> {
    /// Create a wizard. The repository list is fetched once here and reused
    /// for the whole invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository list cannot be fetched.
    pub fn new(provider: P, invocation: Invocation, preferences: Preferences) -> Result<Self> {
        let contexts = provider.list_contexts()?;
        let mut state = WizardState::from_invocation(invocation, &contexts);

        if state.repository.value().is_none() {
            let active = provider
                .active_context()
                .and_then(|active| contexts.iter().position(|r| r.path == active.path));
            state.repository = Slot::hint(active);
        }

        Ok(Self {
            provider,
            preferences,
            contexts,
            state,
            pending: None,
            finished: false,
            events: None,
        })
    }

    /// Record every prompt, response and outcome to an event log.
    #[must_use]
    pub fn with_event_log(mut self, events: Option<EventLog>) -> Self {
        self.events = events;
        self
    }

    /// The state collected so far.
    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    /// The repositories fetched at creation.
    #[must_use]
    pub fn contexts(&self) -> &[Repository] {
        &self.contexts
    }

    /// The collaborator.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Whether an outcome has been produced.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Yield the first step (or the pending one if already started).
    ///
    /// # Errors
    ///
    /// Returns [`Error::WizardFinished`] if the wizard already ended.
    pub fn start(&mut self) -> Result<Yield> {
        if self.finished {
            return Err(Error::WizardFinished);
        }
        if let Some(step) = &self.pending {
            return Ok(Yield::Prompt(step.clone()));
        }
        Ok(self.advance())
    }

    /// Resolve the pending step with `response`.
    ///
    /// Failures of the collaborator never surface here; they end the wizard
    /// with [`Outcome::Reported`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] if the response does not fit the
    /// pending step (the step stays pending), and [`Error::WizardFinished`]
    /// after the wizard ended.
    pub fn resume(&mut self, response: Response) -> Result<Yield> {
        if self.finished {
            return Err(Error::WizardFinished);
        }
        let Some(step) = self.pending.take() else {
            return Err(Error::InvalidResponse("no step is waiting for a response".to_string()));
        };

        let choice = match interpret(&step, &response) {
            Ok(choice) => choice,
            Err(e) => {
                self.pending = Some(step);
                return Err(e);
            }
        };
        self.record(&WizardEvent::Response { step: step.id, response: &response });

        Ok(match self.apply(step, choice) {
            Flow::Advance => self.advance(),
            Flow::Repeat(step) => {
                self.pending = Some(step.clone());
                Yield::Prompt(step)
            }
            Flow::Finish(outcome) => self.finish(outcome),
        })
    }

    fn apply(&mut self, step: Step, choice: Choice) -> Flow {
        match choice {
            Choice::Cancel => Flow::Finish(Outcome::Cancelled),
            Choice::Back => match self.state.back_from(step.id) {
                BackTarget::Reenter => Flow::Advance,
                BackTarget::Leave => Flow::Finish(Outcome::Back),
            },
            Choice::Button(button, item) => Flow::Repeat(self.reveal(step, button, item)),
            Choice::Text(text) => {
                self.state.message.settle(text, Provenance::Picked);
                Flow::Advance
            }
            Choice::Payloads(payloads) => {
                self.apply_payloads(payloads);
                Flow::Advance
            }
        }
    }

    fn apply_payloads(&mut self, payloads: Vec<Payload>) {
        for payload in payloads {
            match payload {
                Payload::Subcommand(sub) => self.state.subcommand.settle(sub, Provenance::Picked),
                Payload::Repository(index) => {
                    self.state.repository.settle(index, Provenance::Picked);
                }
                Payload::Changeset(changeset) => {
                    self.state.changeset.settle(changeset, Provenance::Picked);
                }
                Payload::Verb(verb) => {
                    self.state.subcommand.replace(verb);
                    self.state.confirmed = true;
                }
                Payload::PushFlags(bundle) => {
                    self.state.flags = bundle;
                    self.state.confirmed = true;
                }
                Payload::Proceed => self.state.confirmed = true,
                Payload::ListAction(action) => self.apply_list_action(action),
                // Directives are turned into navigation by `interpret`.
                Payload::Directive(_) => {}
            }
        }
    }

    fn apply_list_action(&mut self, action: ListAction) {
        if !action.is_executable() {
            // Informational row: back to the stash picker.
            self.state.changeset.unsettle();
            self.state.list_action = None;
            return;
        }
        // Drop still asks; the list chain renders its confirmation.
        self.state.confirmed = false;
        self.state.list_action = Some(action);
    }

    fn reveal(&self, mut step: Step, button: Button, item: Option<usize>) -> Step {
        let target = match (button, item) {
            (Button::RevealChangeset, Some(index)) => match &step.items[index].payload {
                Payload::Changeset(changeset) => Some(RevealTarget::Changeset(changeset.clone())),
                _ => None,
            },
            (Button::RevealChangeset, None) => {
                self.state.changeset.value().cloned().map(RevealTarget::Changeset)
            }
            (Button::RevealAll, _) => self
                .current_repository()
                .map(|repo| RevealTarget::Repository(repo.path.clone())),
        };

        step.notice = match target {
            Some(target) => {
                let options = RevealOptions { select: true, expand: true, focus: false };
                self.provider.reveal(&target, options).unwrap_or_else(|e| Some(e.to_string()))
            }
            None => Some("Nothing to reveal".to_string()),
        };
        step
    }

    fn advance(&mut self) -> Yield {
        match self.next_step() {
            Ok(ChainStep::Prompt(step)) => {
                self.record(&WizardEvent::Prompt { step: &step });
                self.pending = Some(step.clone());
                Yield::Prompt(step)
            }
            Ok(ChainStep::Execute(terminal)) => {
                let outcome = self.execute(terminal);
                self.finish(outcome)
            }
            Err(report) => self.finish(Outcome::Reported(report)),
        }
    }

    fn next_step(&mut self) -> std::result::Result<ChainStep, Report> {
        let Some(&sub) = self.state.subcommand.settled() else {
            return Ok(ChainStep::Prompt(self.subcommand_step()));
        };

        if !self.state.repository.is_settled() {
            match self.contexts.len() {
                0 => return Err(classify(sub, &Error::NoRepositories)),
                1 => self.state.repository.settle(0, Provenance::Implicit),
                _ => return Ok(ChainStep::Prompt(self.repository_step(sub))),
            }
        }

        let repo = self.current_repository().ok_or_else(|| classify(sub, &Error::NoRepositories))?;
        let cx = ChainContext {
            provider: &self.provider,
            repo,
            state: &self.state,
            confirm: self.needs_confirmation(sub),
            title: self.title(sub),
        };

        let next = match sub {
            Subcommand::Apply | Subcommand::Pop => chains::apply::next(&cx, sub),
            Subcommand::Drop => chains::drop::next(&cx),
            Subcommand::List => chains::list::next(&cx),
            Subcommand::Push => chains::push::next(&cx),
        };
        next.map_err(|e| classify(sub, &e))
    }

    fn execute(&self, terminal: Terminal) -> Outcome {
        let result = match &terminal {
            Terminal::Apply { repo, changeset, remove } => {
                self.provider.apply_changeset(repo, changeset, *remove)
            }
            Terminal::Drop { repo, changeset } => self.provider.delete_changeset(repo, changeset),
            Terminal::Push { repo, message, paths, flags } => {
                self.provider.save_changeset(repo, message, paths, *flags)
            }
        };

        match result {
            Ok(output) => Outcome::Completed { terminal, output },
            Err(e) => Outcome::Reported(classify(terminal.subcommand(), &e)),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Yield {
        self.record(&WizardEvent::Outcome { outcome: &outcome });
        self.finished = true;
        self.pending = None;
        Yield::Done(outcome)
    }

    fn needs_confirmation(&self, sub: Subcommand) -> bool {
        match sub {
            Subcommand::Drop => true,
            Subcommand::List => false,
            Subcommand::Apply | Subcommand::Pop | Subcommand::Push => {
                self.state.confirm_override.unwrap_or_else(|| !self.preferences.skips(sub))
            }
        }
    }

    fn current_repository(&self) -> Option<&Repository> {
        self.state.repository.settled().and_then(|&index| self.contexts.get(index))
    }

    fn title(&self, sub: Subcommand) -> String {
        let base = match sub {
            Subcommand::List => "Stashes".to_string(),
            other => format!("{} Stash", other.label()),
        };
        match self.current_repository() {
            Some(repo) if self.contexts.len() > 1 => format!("{base} ({})", repo.name),
            _ => base,
        }
    }

    fn subcommand_step(&self) -> Step {
        let hint = self.state.subcommand.value().copied();
        let items = Subcommand::ALL
            .into_iter()
            .map(|sub| {
                StepItem::new(sub.label(), Payload::Subcommand(sub))
                    .description(sub.description())
                    .picked(hint == Some(sub))
            })
            .collect();
        Step::select_one(StepId::Subcommand, "Stash", items).placeholder("Choose a stash command")
    }

    fn repository_step(&self, sub: Subcommand) -> Step {
        let hint = self.state.repository.value().copied();
        let items = self
            .contexts
            .iter()
            .enumerate()
            .map(|(index, repo)| {
                StepItem::new(repo.name.clone(), Payload::Repository(index))
                    .description(repo.path.display().to_string())
                    .picked(hint == Some(index))
            })
            .collect();
        Step::select_one(StepId::Repository, self.title(sub), items)
            .placeholder("Choose a repository")
    }

    fn record(&self, event: &WizardEvent<'_>) {
        if let Some(events) = &self.events {
            events.record(event);
        }
    }
}

/// Check a response against the step it answers.
fn interpret(step: &Step, response: &Response) -> Result<Choice> {
    match response {
        Response::Back => Ok(Choice::Back),
        Response::Cancel => Ok(Choice::Cancel),
        Response::Text(text) => {
            if step.kind == StepKind::Input {
                Ok(Choice::Text(text.clone()))
            } else {
                Err(Error::InvalidResponse("this step expects a selection".to_string()))
            }
        }
        Response::Button { button, item } => {
            let known = match item {
                None => step.buttons.contains(button),
                Some(index) => *index < step.items.len() && step.item_buttons.contains(button),
            };
            if known {
                Ok(Choice::Button(*button, *item))
            } else {
                Err(Error::InvalidResponse("that button is not available here".to_string()))
            }
        }
        Response::Items(indices) => interpret_items(step, indices),
    }
}

fn interpret_items(step: &Step, indices: &[usize]) -> Result<Choice> {
    if step.kind == StepKind::Input {
        return Err(Error::InvalidResponse("this step expects text".to_string()));
    }
    if indices.is_empty() {
        return Err(Error::InvalidResponse("nothing was selected".to_string()));
    }
    if indices.len() > 1 && step.kind != StepKind::SelectMany {
        return Err(Error::InvalidResponse("choose exactly one item".to_string()));
    }

    let mut payloads = Vec::with_capacity(indices.len());
    for &index in indices {
        let item = step
            .items
            .get(index)
            .ok_or_else(|| Error::InvalidResponse(format!("no item number {}", index + 1)))?;
        payloads.push(item.payload.clone());
    }

    match payloads.as_slice() {
        [Payload::Directive(Directive::Back)] => Ok(Choice::Back),
        [Payload::Directive(Directive::Cancel)] => Ok(Choice::Cancel),
        many if many.iter().any(|p| matches!(p, Payload::Directive(_))) => {
            Err(Error::InvalidResponse("directives cannot be combined".to_string()))
        }
        // Each row is a complete bundle; rows are never merged.
        [_, _, ..] if payloads.iter().any(|p| matches!(p, Payload::PushFlags(_))) => {
            Err(Error::InvalidResponse("choose exactly one way to push".to_string()))
        }
        _ => Ok(Choice::Payloads(payloads)),
    }
}

/// Drive a wizard to completion with a presenter.
///
/// Responses the engine rejects are shown again with the reason as the
/// step's notice.
///
/// # Errors
///
/// Returns an error if the presenter fails or the wizard was already finished.
pub fn run<P: StashProvider>(wizard: &mut Wizard<P>, presenter: &mut dyn Presenter) -> Result<Outcome> {
    let mut current = wizard.start()?;
    loop {
        let step = match current {
            Yield::Done(outcome) => return Ok(outcome),
            Yield::Prompt(step) => step,
        };
        let response = presenter.present(&step)?;
        current = match wizard.resume(response) {
            Err(Error::InvalidResponse(reason)) => Yield::Prompt(Step { notice: Some(reason), ..step }),
            other => other?,
        };
    }
}

#[cfg(test)]
mod tests;
