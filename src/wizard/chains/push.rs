//! Push: collect a message, confirm with a pre-composed flag bundle, save.

use super::{ChainContext, ChainStep};
use crate::error::Result;
use crate::model::{PushFlag, StashFlags};
use crate::wizard::outcome::Terminal;
use crate::wizard::step::{Payload, Step, StepId, StepItem};
use std::path::PathBuf;

pub(in crate::wizard) fn next(cx: &ChainContext<'_>) -> Result<ChainStep> {
    let Some(message) = cx.state.message.settled() else {
        let value = cx.state.message.value().cloned();
        return Ok(ChainStep::Prompt(
            Step::input(StepId::Message, cx.title.clone(), value)
                .placeholder("Please provide a stash message"),
        ));
    };

    if cx.confirm && !cx.state.confirmed {
        return Ok(ChainStep::Prompt(confirm_step(cx)));
    }

    Ok(ChainStep::Execute(Terminal::Push {
        repo: cx.repo.path.clone(),
        message: message.clone(),
        paths: cx.state.paths.clone(),
        flags: StashFlags::from_flags(&cx.state.flags),
    }))
}

/// One row per flag bundle. Untracked files only make sense for the whole
/// working tree, so path-scoped pushes do not offer them.
fn confirm_step(cx: &ChainContext<'_>) -> Step {
    let paths = &cx.state.paths;
    let scope = describe_scope(paths);

    let mut bundles: Vec<(&str, Vec<PushFlag>, String)> =
        vec![("Push Stash", Vec::new(), format!("Will stash {scope}"))];
    if paths.is_empty() {
        bundles.push((
            "Push Stash & Include Untracked",
            vec![PushFlag::IncludeUntracked],
            format!("Will stash {scope}, including untracked files"),
        ));
    }
    bundles.push((
        "Push Stash & Keep Staged",
        vec![PushFlag::KeepIndex],
        format!("Will stash {scope}, but will keep staged files intact"),
    ));

    let items = bundles
        .into_iter()
        .map(|(label, flags, detail)| {
            let picked = flags == cx.state.flags;
            StepItem::new(label, Payload::PushFlags(flags)).detail(detail).picked(picked)
        })
        .collect();

    Step::select_many(StepId::Confirm, format!("Confirm {}", cx.title), items)
        .placeholder("Confirm Stash Push")
}

fn describe_scope(paths: &[PathBuf]) -> String {
    match paths {
        [] => "uncommitted changes".to_string(),
        [single] => format!("changes from {}", single.display()),
        many => format!("changes from {} files", many.len()),
    }
}
