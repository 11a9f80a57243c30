//! Per-invocation wizard state.
//!
//! Every skippable answer lives in a [`Slot`]. A slot is settled when it holds
//! a value *and* records where the value came from; only settled slots let
//! their step be skipped. Navigating back unsettles slots but keeps their
//! values, so re-entered steps pre-select the previous answer.

use super::step::{ListAction, StepId};
use crate::model::{Changeset, PushFlag, Repository, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Where a slot's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provenance {
    /// Supplied by the caller before the wizard started.
    Preset,
    /// Chosen by the user in this invocation.
    Picked,
    /// Chosen by the engine because there was only one option.
    Implicit,
}

/// A skippable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot<T> {
    value: Option<T>,
    provenance: Option<Provenance>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: None, provenance: None }
    }
}

impl<T> Slot<T> {
    /// A slot whose step has to be asked. The value, if any, is a pre-selection hint.
    #[must_use]
    pub const fn hint(value: Option<T>) -> Self {
        Self { value, provenance: None }
    }

    /// Whether the step for this slot can be skipped.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.value.is_some() && self.provenance.is_some()
    }

    /// The current value, settled or not.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The value, only if settled.
    #[must_use]
    pub fn settled(&self) -> Option<&T> {
        self.provenance.and(self.value.as_ref())
    }

    /// Where the value came from, if settled.
    #[must_use]
    pub const fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    /// Record an answer.
    pub fn settle(&mut self, value: T, provenance: Provenance) {
        self.value = Some(value);
        self.provenance = Some(provenance);
    }

    /// Replace the value without touching provenance.
    pub fn replace(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Force the step to be asked again.
    pub fn unsettle(&mut self) {
        self.provenance = None;
    }
}

/// The slots in the order their steps are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotId {
    Subcommand,
    Repository,
    Changeset,
    Message,
}

impl SlotId {
    const fn third_for(subcommand: Option<Subcommand>) -> Option<Self> {
        match subcommand {
            Some(Subcommand::Push) => Some(Self::Message),
            Some(_) => Some(Self::Changeset),
            None => None,
        }
    }
}

/// Partial state supplied by whoever starts the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Subcommand to run.
    pub subcommand: Option<Subcommand>,
    /// Root of the repository to operate on.
    pub repository: Option<PathBuf>,
    /// Stash to apply, pop, drop or inspect.
    pub changeset: Option<Changeset>,
    /// Message for a new stash. `Some("")` is a valid, empty message.
    pub message: Option<String>,
    /// Restrict a push to these paths.
    pub paths: Vec<PathBuf>,
    /// Flags for a push when confirmation is skipped.
    pub flags: Vec<PushFlag>,
    /// Force confirmation on or off for this invocation.
    pub confirm: Option<bool>,
}

/// Result of navigating back from a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    /// An earlier step will be asked again.
    Reenter,
    /// Navigation left the wizard.
    Leave,
}

/// Everything collected so far in one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WizardState {
    /// Active subcommand.
    pub subcommand: Slot<Subcommand>,
    /// Index into the wizard's repository list.
    pub repository: Slot<usize>,
    /// Target stash.
    pub changeset: Slot<Changeset>,
    /// Message for a new stash.
    pub message: Slot<String>,
    /// File scope restriction for a push.
    pub paths: Vec<PathBuf>,
    /// Flags for a push.
    pub flags: Vec<PushFlag>,
    /// Action chosen in the browse menu.
    pub list_action: Option<ListAction>,
    /// The confirmation step has been answered.
    pub confirmed: bool,
    /// Confirmation override for this invocation.
    pub confirm_override: Option<bool>,
}

impl WizardState {
    /// Build the initial state.
    ///
    /// Only the leading run of populated fields is preset. A field supplied
    /// after a gap is kept as a hint and its step is still asked.
    #[must_use]
    pub fn from_invocation(invocation: Invocation, repositories: &[Repository]) -> Self {
        let repo_index = invocation
            .repository
            .as_ref()
            .and_then(|path| repositories.iter().position(|r| r.path == *path));

        let mut state = Self {
            subcommand: Slot::hint(invocation.subcommand),
            repository: Slot::hint(repo_index),
            changeset: Slot::hint(invocation.changeset),
            message: Slot::hint(invocation.message),
            paths: invocation.paths,
            flags: invocation.flags,
            list_action: None,
            confirmed: false,
            confirm_override: invocation.confirm,
        };

        // With a single repository there is nothing to ask, so it never
        // interrupts the leading run.
        if state.repository.value.is_none() && repositories.len() == 1 {
            state.repository.settle(0, Provenance::Implicit);
        }

        for slot in state.order() {
            if state.slot_provenance(slot) == Some(Provenance::Implicit) {
                continue;
            }
            if !state.has_value(slot) {
                break;
            }
            state.set_provenance(slot, Some(Provenance::Preset));
        }
        state
    }

    /// Number of leading steps that are already answered.
    #[must_use]
    pub fn position(&self) -> usize {
        self.order().into_iter().take_while(|s| self.is_settled(*s)).count()
    }

    /// Navigate back from `step`.
    ///
    /// Implicit answers are stepped over. Landing on a preset answer leaves
    /// the wizard because the caller owns that answer.
    pub fn back_from(&mut self, step: StepId) -> BackTarget {
        // A drop chosen from the browse menu returns to that menu.
        if step == StepId::Confirm && self.list_action == Some(ListAction::Drop) {
            self.list_action = None;
            self.confirmed = false;
            return BackTarget::Reenter;
        }

        let order = self.order();
        let current = match step {
            StepId::Subcommand => 0,
            StepId::Repository => 1,
            StepId::Changeset | StepId::Message => 2,
            StepId::Confirm | StepId::ListAction => 3,
        };

        let target = order[..current.min(order.len())]
            .iter()
            .rev()
            .copied()
            .find(|s| self.slot_provenance(*s) != Some(Provenance::Implicit));

        match target {
            Some(slot) if self.slot_provenance(slot) != Some(Provenance::Preset) => {
                let from = order.iter().position(|s| *s == slot).unwrap_or(0);
                for later in &order[from..] {
                    if self.slot_provenance(*later) != Some(Provenance::Implicit) {
                        self.set_provenance(*later, None);
                    }
                }
                self.list_action = None;
                self.confirmed = false;
                BackTarget::Reenter
            }
            _ => BackTarget::Leave,
        }
    }

    fn order(&self) -> Vec<SlotId> {
        let mut order = vec![SlotId::Subcommand, SlotId::Repository];
        order.extend(SlotId::third_for(self.subcommand.value().copied()));
        order
    }

    const fn has_value(&self, slot: SlotId) -> bool {
        match slot {
            SlotId::Subcommand => self.subcommand.value.is_some(),
            SlotId::Repository => self.repository.value.is_some(),
            SlotId::Changeset => self.changeset.value.is_some(),
            SlotId::Message => self.message.value.is_some(),
        }
    }

    const fn is_settled(&self, slot: SlotId) -> bool {
        match slot {
            SlotId::Subcommand => self.subcommand.is_settled(),
            SlotId::Repository => self.repository.is_settled(),
            SlotId::Changeset => self.changeset.is_settled(),
            SlotId::Message => self.message.is_settled(),
        }
    }

    const fn slot_provenance(&self, slot: SlotId) -> Option<Provenance> {
        match slot {
            SlotId::Subcommand => self.subcommand.provenance,
            SlotId::Repository => self.repository.provenance,
            SlotId::Changeset => self.changeset.provenance,
            SlotId::Message => self.message.provenance,
        }
    }

    fn set_provenance(&mut self, slot: SlotId, provenance: Option<Provenance>) {
        match slot {
            SlotId::Subcommand => self.subcommand.provenance = provenance,
            SlotId::Repository => self.repository.provenance = provenance,
            SlotId::Changeset => self.changeset.provenance = provenance,
            SlotId::Message => self.message.provenance = provenance,
        }
    }
}
