//! Step descriptors handed to the presentation layer.
//!
//! A [`Step`] is inert data: it says what to ask and carries a typed
//! [`Payload`] per item so the engine can interpret the answer. Steps are
//! rebuilt every time they are entered.

use crate::model::{Changeset, PushFlag, Subcommand};
use serde::Serialize;

/// The decision point a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepId {
    /// Pick a stash subcommand.
    Subcommand,
    /// Pick the repository to operate on.
    Repository,
    /// Pick a stash entry.
    Changeset,
    /// Type the message for a new stash.
    Message,
    /// Confirm the terminal action.
    Confirm,
    /// Pick an action for an inspected stash.
    ListAction,
}

/// How the presentation layer should render a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    /// Choose exactly one item.
    SelectOne,
    /// Choose one or more pre-composed flag rows.
    SelectMany,
    /// Type free text.
    Input,
    /// Choose one of the confirmation items.
    Confirm,
}

/// Navigation pseudo-items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Directive {
    /// Go to the previous step.
    Back,
    /// Abort the wizard.
    Cancel,
}

impl Directive {
    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Cancel => "Cancel",
        }
    }
}

/// Actions offered for a stash while browsing the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListAction {
    /// Apply the stash right away.
    Apply,
    /// Pop the stash right away.
    Pop,
    /// Continue to the drop confirmation.
    Drop,
    /// A file touched by the stash. Informational only.
    File(String),
}

impl ListAction {
    /// Whether choosing this action ends the browsing loop.
    #[must_use]
    pub const fn is_executable(&self) -> bool {
        !matches!(self, Self::File(_))
    }
}

/// The answer an item stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Payload {
    /// A navigation directive.
    Directive(Directive),
    /// A subcommand for the first step.
    Subcommand(Subcommand),
    /// Index into the wizard's repository list.
    Repository(usize),
    /// A stash entry.
    Changeset(Changeset),
    /// Apply or pop, chosen at confirmation time.
    Verb(Subcommand),
    /// A pre-composed bundle of push flags.
    PushFlags(Vec<PushFlag>),
    /// An action from the browse menu.
    ListAction(ListAction),
    /// Go ahead with the only available action.
    Proceed,
}

/// Auxiliary buttons. Pressing one never resolves the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Button {
    /// Reveal one stash in the companion view.
    RevealChangeset,
    /// Reveal every stash of the repository.
    RevealAll,
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepItem {
    /// Primary text.
    pub label: String,
    /// Secondary text shown next to the label.
    pub description: Option<String>,
    /// Tertiary text shown below the label.
    pub detail: Option<String>,
    /// Pre-selected when the step opens.
    pub picked: bool,
    /// What choosing the row means.
    pub payload: Payload,
}

impl StepItem {
    /// Create an item with just a label and payload.
    pub fn new(label: impl Into<String>, payload: Payload) -> Self {
        Self { label: label.into(), description: None, detail: None, picked: false, payload }
    }

    /// A directive row.
    #[must_use]
    pub fn directive(directive: Directive) -> Self {
        Self::new(directive.label(), Payload::Directive(directive))
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the detail.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the picked flag.
    #[must_use]
    pub const fn picked(mut self, picked: bool) -> Self {
        self.picked = picked;
        self
    }
}

/// A single interaction point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Which decision this step resolves.
    pub id: StepId,
    /// How to render it.
    pub kind: StepKind,
    /// Title line.
    pub title: String,
    /// Hint shown while nothing is typed or selected.
    pub placeholder: Option<String>,
    /// Selectable rows (empty for `Input`).
    pub items: Vec<StepItem>,
    /// Pre-filled text for `Input`.
    pub value: Option<String>,
    /// Buttons that apply to the whole step.
    pub buttons: Vec<Button>,
    /// Buttons shown on every item.
    pub item_buttons: Vec<Button>,
    /// Text produced by a side channel since the step was yielded.
    pub notice: Option<String>,
}

impl Step {
    fn new(id: StepId, kind: StepKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            placeholder: None,
            items: Vec::new(),
            value: None,
            buttons: Vec::new(),
            item_buttons: Vec::new(),
            notice: None,
        }
    }

    /// A single-choice step.
    pub fn select_one(id: StepId, title: impl Into<String>, items: Vec<StepItem>) -> Self {
        Self { items, ..Self::new(id, StepKind::SelectOne, title) }
    }

    /// A flag-bundle step.
    pub fn select_many(id: StepId, title: impl Into<String>, items: Vec<StepItem>) -> Self {
        Self { items, ..Self::new(id, StepKind::SelectMany, title) }
    }

    /// A confirmation step.
    pub fn confirm(title: impl Into<String>, items: Vec<StepItem>) -> Self {
        Self { items, ..Self::new(StepId::Confirm, StepKind::Confirm, title) }
    }

    /// A free-text step.
    pub fn input(id: StepId, title: impl Into<String>, value: Option<String>) -> Self {
        Self { value, ..Self::new(id, StepKind::Input, title) }
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the step-level buttons.
    #[must_use]
    pub fn buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Set the per-item buttons.
    #[must_use]
    pub fn item_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.item_buttons = buttons;
        self
    }

    /// Whether every item is a directive (the natural list was empty).
    #[must_use]
    pub fn directives_only(&self) -> bool {
        !self.items.is_empty()
            && self.items.iter().all(|i| matches!(i.payload, Payload::Directive(_)))
    }

    /// Labels of all items, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}

/// What the presentation layer hands back for a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Response {
    /// Indices into the step's items.
    Items(Vec<usize>),
    /// Typed text for an `Input` step.
    Text(String),
    /// Go to the previous step.
    Back,
    /// Abort the wizard.
    Cancel,
    /// An auxiliary button was pressed, optionally on one item.
    Button {
        /// The button.
        button: Button,
        /// Index of the item the button belongs to.
        item: Option<usize>,
    },
}

impl Response {
    /// Select a single item.
    #[must_use]
    pub fn item(index: usize) -> Self {
        Self::Items(vec![index])
    }
}
