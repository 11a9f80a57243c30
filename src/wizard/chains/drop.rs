//! Drop: pick a stash, always confirm, delete it.

use super::{changeset_step, settled_changeset, ChainContext, ChainStep};
use crate::error::Result;
use crate::wizard::outcome::Terminal;
use crate::model::Changeset;
use crate::wizard::step::{Payload, Step, StepItem};

pub(in crate::wizard) fn next(cx: &ChainContext<'_>) -> Result<ChainStep> {
    let Some(changeset) = settled_changeset(cx) else {
        return changeset_step(cx, "Choose a stash to delete").map(ChainStep::Prompt);
    };

    // Deleting a stash cannot be undone; this ignores `cx.confirm`.
    if !cx.state.confirmed {
        return Ok(ChainStep::Prompt(confirm_step(changeset, &cx.title)));
    }

    Ok(ChainStep::Execute(Terminal::Drop {
        repo: cx.repo.path.clone(),
        changeset: changeset.clone(),
    }))
}

/// The single-row confirmation shown before a stash is deleted.
pub(super) fn confirm_step(changeset: &Changeset, title: &str) -> Step {
    let item = StepItem::new("Drop Stash", Payload::Proceed)
        .detail(format!("Will delete {}", changeset.summary()));
    Step::confirm(format!("Confirm {title}"), vec![item]).placeholder("Confirm Stash Drop")
}
