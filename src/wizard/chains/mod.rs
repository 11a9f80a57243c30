//! Subcommand step chains.
//!
//! Each chain looks at the current state and either produces the next
//! [`Step`] or the [`Terminal`] operation it ends with. Chains never execute
//! anything themselves and never classify errors.

pub(super) mod apply;
pub(super) mod drop;
pub(super) mod list;
pub(super) mod push;

use super::outcome::Terminal;
use super::state::WizardState;
use super::step::{Button, Directive, Payload, Step, StepId, StepItem};
use crate::error::Result;
use crate::model::{Changeset, Repository};
use crate::traits::StashProvider;

/// What a chain wants to happen next.
#[derive(Debug)]
pub(super) enum ChainStep {
    Prompt(Step),
    Execute(Terminal),
}

/// Everything a chain may read.
pub(super) struct ChainContext<'a> {
    pub provider: &'a dyn StashProvider,
    pub repo: &'a Repository,
    pub state: &'a WizardState,
    /// Whether this chain has to ask for confirmation.
    pub confirm: bool,
    pub title: String,
}

/// The stash picker shared by apply, pop, drop and list.
///
/// An empty listing is replaced by `Back` and `Cancel` so the picker is never empty.
pub(super) fn changeset_step(cx: &ChainContext<'_>, placeholder: &str) -> Result<Step> {
    let entries = cx.provider.list_changesets(cx.repo.path())?.unwrap_or_default();

    if entries.is_empty() {
        return Ok(Step::select_one(
            StepId::Changeset,
            cx.title.clone(),
            vec![StepItem::directive(Directive::Back), StepItem::directive(Directive::Cancel)],
        )
        .placeholder(format!("No stashes found in {}", cx.repo.name)));
    }

    let hint = cx.state.changeset.value().map(|c| c.sha.as_str());
    let items = entries
        .into_iter()
        .map(|c| {
            let picked = hint == Some(c.sha.as_str());
            changeset_item(c).picked(picked)
        })
        .collect();

    Ok(Step::select_one(StepId::Changeset, cx.title.clone(), items)
        .placeholder(placeholder)
        .buttons(vec![Button::RevealAll])
        .item_buttons(vec![Button::RevealChangeset]))
}

fn changeset_item(c: Changeset) -> StepItem {
    let description = match &c.branch {
        Some(branch) => format!("{} on {branch}", c.ref_name),
        None => c.ref_name.clone(),
    };
    let detail = format!("{} \u{2022} {}", c.short_sha(), c.date.format("%Y-%m-%d %H:%M"));
    let label = if c.message.is_empty() { c.ref_name.clone() } else { c.message.clone() };
    StepItem::new(label, Payload::Changeset(c)).description(description).detail(detail)
}

/// The settled stash, which every chain past its first step relies on.
pub(super) fn settled_changeset<'a>(cx: &'a ChainContext<'_>) -> Option<&'a Changeset> {
    cx.state.changeset.settled()
}
