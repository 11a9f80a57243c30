//! Apply and pop share one chain: pick a stash, confirm (optionally switching
//! verb), then apply it.

use super::{changeset_step, settled_changeset, ChainContext, ChainStep};
use crate::error::Result;
use crate::model::Subcommand;
use crate::wizard::outcome::Terminal;
use crate::wizard::step::{Payload, Step, StepItem};

pub(in crate::wizard) fn next(cx: &ChainContext<'_>, verb: Subcommand) -> Result<ChainStep> {
    let Some(changeset) = settled_changeset(cx) else {
        let placeholder = match verb {
            Subcommand::Pop => "Choose a stash to pop into your working tree",
            _ => "Choose a stash to apply to your working tree",
        };
        return changeset_step(cx, placeholder).map(ChainStep::Prompt);
    };

    if cx.confirm && !cx.state.confirmed {
        return Ok(ChainStep::Prompt(confirm_step(cx, verb)));
    }

    Ok(ChainStep::Execute(Terminal::Apply {
        repo: cx.repo.path.clone(),
        changeset: changeset.clone(),
        remove: verb == Subcommand::Pop,
    }))
}

fn confirm_step(cx: &ChainContext<'_>, verb: Subcommand) -> Step {
    let summary = cx.state.changeset.value().map(|c| c.summary()).unwrap_or_default();

    let items = std::iter::once(verb)
        .chain(verb.counterpart())
        .map(|choice| {
            let detail = if choice == Subcommand::Pop {
                format!("Will delete {summary} and apply the changes to your working tree")
            } else {
                format!("Will apply {summary} to your working tree")
            };
            StepItem::new(format!("{} Stash", choice.label()), Payload::Verb(choice)).detail(detail)
        })
        .collect();
    Step::confirm(format!("Confirm {}", cx.title), items).placeholder("Confirm Stash")
}
