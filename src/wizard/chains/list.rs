//! List: browse stashes. Picking a stash opens a menu of actions for it;
//! informational rows return to the stash picker. Dropping from the menu
//! still asks for confirmation, and backing out of it returns to the menu.

use super::{changeset_step, drop, settled_changeset, ChainContext, ChainStep};
use crate::error::Result;
use crate::model::Changeset;
use crate::wizard::outcome::Terminal;
use crate::wizard::step::{Button, ListAction, Payload, Step, StepId, StepItem};

pub(in crate::wizard) fn next(cx: &ChainContext<'_>) -> Result<ChainStep> {
    let Some(changeset) = settled_changeset(cx) else {
        return changeset_step(cx, "Choose a stash").map(ChainStep::Prompt);
    };

    let remove = match cx.state.list_action {
        Some(ListAction::Apply) => false,
        Some(ListAction::Pop) => true,
        Some(ListAction::Drop) if !cx.state.confirmed => {
            return Ok(ChainStep::Prompt(drop::confirm_step(changeset, "Drop Stash")));
        }
        Some(ListAction::Drop) => {
            return Ok(ChainStep::Execute(Terminal::Drop {
                repo: cx.repo.path.clone(),
                changeset: changeset.clone(),
            }));
        }
        // File rows are turned back into the picker by the engine.
        Some(ListAction::File(_)) | None => {
            return action_step(cx, changeset).map(ChainStep::Prompt);
        }
    };

    Ok(ChainStep::Execute(Terminal::Apply {
        repo: cx.repo.path.clone(),
        changeset: changeset.clone(),
        remove,
    }))
}

fn action_step(cx: &ChainContext<'_>, changeset: &Changeset) -> Result<Step> {
    let files = cx.provider.changeset_files(cx.repo.path(), changeset)?;

    let mut items = vec![
        StepItem::new("Apply Stash", Payload::ListAction(ListAction::Apply))
            .detail(format!("Will apply {} to your working tree", changeset.ref_name)),
        StepItem::new("Pop Stash", Payload::ListAction(ListAction::Pop)).detail(format!(
            "Will delete {} and apply the changes to your working tree",
            changeset.ref_name
        )),
        StepItem::new("Drop Stash...", Payload::ListAction(ListAction::Drop))
            .detail(format!("Will delete {}", changeset.ref_name)),
    ];
    items.extend(files.into_iter().map(|file| {
        StepItem::new(file.clone(), Payload::ListAction(ListAction::File(file)))
            .description("changed file")
    }));

    Ok(Step::select_one(StepId::ListAction, changeset.summary(), items)
        .placeholder(format!("{} \u{2022} {}", changeset.short_sha(), cx.title))
        .buttons(vec![Button::RevealChangeset]))
}
