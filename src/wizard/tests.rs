//! Tests for the wizard engine.

use super::*;
use crate::model::{Changeset, PushFlag, StashFailure, StashFlags};
use crate::testing::{changeset, MockStashProvider, ProviderCall, ScriptedPresenter};
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const REPO: &str = "/work/app";
const OTHER: &str = "/work/lib";

fn two_stashes() -> Vec<Changeset> {
    vec![changeset(REPO, 0, "first"), changeset(REPO, 1, "second")]
}

fn provider() -> MockStashProvider {
    MockStashProvider::with_contexts(&[REPO]).stashes(REPO, two_stashes())
}

fn invoke(subcommand: Subcommand) -> Invocation {
    Invocation { subcommand: Some(subcommand), ..Invocation::default() }
}

fn wizard(provider: MockStashProvider, invocation: Invocation) -> Wizard<MockStashProvider> {
    Wizard::new(provider, invocation, Preferences::default()).unwrap()
}

fn prompt(result: Result<Yield>) -> Step {
    match result.unwrap() {
        Yield::Prompt(step) => step,
        Yield::Done(outcome) => panic!("expected a step, got {outcome:?}"),
    }
}

fn done(result: Result<Yield>) -> Outcome {
    match result.unwrap() {
        Yield::Done(outcome) => outcome,
        Yield::Prompt(step) => panic!("expected an outcome, got step {:?}", step.id),
    }
}

fn save(message: &str, paths: &[&str], flags: StashFlags) -> ProviderCall {
    ProviderCall::Save {
        message: message.to_string(),
        paths: paths.iter().map(PathBuf::from).collect(),
        flags,
    }
}

// === Forward passes ===

#[test]
fn test_drop_single_context_yields_pick_then_confirm() {
    let mut w = wizard(provider(), invoke(Subcommand::Drop));

    let pick = prompt(w.start());
    assert_eq!(pick.id, StepId::Changeset);
    assert_eq!(pick.labels(), vec!["first", "second"]);
    assert_eq!(pick.title, "Drop Stash");

    let confirm = prompt(w.resume(Response::item(1)));
    assert_eq!(confirm.id, StepId::Confirm);
    assert_eq!(confirm.labels(), vec!["Drop Stash"]);
    assert_eq!(confirm.items[0].detail.as_deref(), Some("Will delete stash@{1}: second"));

    let outcome = done(w.resume(Response::item(0)));
    assert!(matches!(outcome, Outcome::Completed { terminal: Terminal::Drop { .. }, .. }));
    assert_eq!(w.provider().terminal_calls(), vec![ProviderCall::Delete("stash@{1}".into())]);
}

#[test]
fn test_push_preset_empty_message_with_single_path() {
    let mut w = wizard(
        provider(),
        Invocation {
            subcommand: Some(Subcommand::Push),
            message: Some(String::new()),
            paths: vec![PathBuf::from("src/lib.rs")],
            ..Invocation::default()
        },
    );

    let confirm = prompt(w.start());
    assert_eq!(confirm.id, StepId::Confirm, "the message step is skipped");
    assert_eq!(confirm.kind, StepKind::SelectMany);
    assert_eq!(confirm.labels(), vec!["Push Stash", "Push Stash & Keep Staged"]);
    assert_eq!(
        confirm.items[0].detail.as_deref(),
        Some("Will stash changes from src/lib.rs")
    );

    let outcome = done(w.resume(Response::item(0)));
    assert!(outcome.is_success());
    assert_eq!(
        w.provider().terminal_calls(),
        vec![save("", &["src/lib.rs"], StashFlags::default())]
    );
}

#[test]
fn test_push_many_paths_names_file_count() {
    let mut w = wizard(
        provider(),
        Invocation {
            subcommand: Some(Subcommand::Push),
            message: Some("m".to_string()),
            paths: vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")],
            ..Invocation::default()
        },
    );
    let confirm = prompt(w.start());
    assert_eq!(
        confirm.items[1].detail.as_deref(),
        Some("Will stash changes from 3 files, but will keep staged files intact")
    );
}

#[test]
fn test_list_empty_listing_offers_directives_and_back_leaves() {
    let provider = MockStashProvider::with_contexts(&[REPO]);
    let mut w = wizard(provider, invoke(Subcommand::List));

    let pick = prompt(w.start());
    assert!(pick.directives_only());
    assert_eq!(pick.labels(), vec!["Back", "Cancel"]);
    assert_eq!(pick.placeholder.as_deref(), Some("No stashes found in app"));

    assert_eq!(done(w.resume(Response::item(0))), Outcome::Back);
    assert!(w.provider().terminal_calls().is_empty());
}

#[test]
fn test_empty_listing_cancel_directive() {
    let mut w = wizard(MockStashProvider::with_contexts(&[REPO]), invoke(Subcommand::Apply));
    prompt(w.start());
    assert_eq!(done(w.resume(Response::item(1))), Outcome::Cancelled);
}

#[test]
fn test_apply_overwrite_failure_is_a_warning_report() {
    let provider = provider().failing(
        "apply",
        Error::CommandFailed {
            command: "git stash apply stash@{0}".to_string(),
            exit_code: 1,
            output: "error: Your local changes to the following files would be overwritten by merge:\n\ta.txt"
                .to_string(),
        },
    );
    let mut w = wizard(provider, invoke(Subcommand::Apply));
    prompt(w.start());
    prompt(w.resume(Response::item(0)));

    match done(w.resume(Response::item(0))) {
        Outcome::Reported(report) => {
            assert_eq!(report.severity, Severity::Warning);
            assert_eq!(report.subcommand, Subcommand::Apply);
            assert!(report.message.contains("would be overwritten"));
            assert!(report.detail.contains("a.txt"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(w.is_finished());
}

#[test]
fn test_confirm_can_switch_apply_to_pop() {
    let mut w = wizard(provider(), invoke(Subcommand::Apply));
    prompt(w.start());

    let confirm = prompt(w.resume(Response::item(0)));
    assert_eq!(confirm.labels(), vec!["Apply Stash", "Pop Stash"]);

    done(w.resume(Response::item(1)));
    assert_eq!(
        w.provider().terminal_calls(),
        vec![ProviderCall::Apply { ref_name: "stash@{0}".into(), remove: true }]
    );
    assert_eq!(w.state().subcommand.value(), Some(&Subcommand::Pop));
}

#[test]
fn test_pop_confirm_lists_requested_verb_first() {
    let mut w = wizard(provider(), invoke(Subcommand::Pop));
    prompt(w.start());
    let confirm = prompt(w.resume(Response::item(1)));
    assert_eq!(confirm.labels(), vec!["Pop Stash", "Apply Stash"]);
    assert_eq!(confirm.title, "Confirm Pop Stash");
}

#[test]
fn test_push_collects_message_and_takes_one_bundle() {
    let mut w = wizard(provider(), invoke(Subcommand::Push));

    let message = prompt(w.start());
    assert_eq!(message.kind, StepKind::Input);
    assert_eq!(message.placeholder.as_deref(), Some("Please provide a stash message"));

    let confirm = prompt(w.resume(Response::Text("wip".to_string())));
    assert_eq!(
        confirm.labels(),
        vec!["Push Stash", "Push Stash & Include Untracked", "Push Stash & Keep Staged"]
    );
    assert!(confirm.items[0].picked, "no flags requested picks the plain bundle");

    assert!(matches!(w.resume(Response::Items(vec![0, 1, 2])), Err(Error::InvalidResponse(_))));
    assert!(matches!(w.resume(Response::Items(vec![1, 2])), Err(Error::InvalidResponse(_))));
    assert_eq!(prompt(w.start()), confirm);
    assert!(w.provider().terminal_calls().is_empty());

    done(w.resume(Response::item(2)));
    assert_eq!(
        w.provider().terminal_calls(),
        vec![save("wip", &[], StashFlags { include_untracked: false, keep_index: true })]
    );
}

#[test]
fn test_path_scoped_push_rejects_combined_rows() {
    let mut w = wizard(
        provider(),
        Invocation {
            subcommand: Some(Subcommand::Push),
            paths: vec![PathBuf::from("src/a.rs")],
            ..Invocation::default()
        },
    );
    prompt(w.start());
    let confirm = prompt(w.resume(Response::Text("m".to_string())));
    assert_eq!(confirm.labels(), vec!["Push Stash", "Push Stash & Keep Staged"]);

    assert!(matches!(w.resume(Response::Items(vec![0, 1])), Err(Error::InvalidResponse(_))));
    done(w.resume(Response::item(0)));
    assert_eq!(w.provider().terminal_calls(), vec![save("m", &["src/a.rs"], StashFlags::default())]);
}

#[test]
fn test_push_without_confirmation_uses_invocation_flags() {
    let mut w = wizard(
        provider(),
        Invocation {
            subcommand: Some(Subcommand::Push),
            message: Some("m".to_string()),
            flags: vec![PushFlag::KeepIndex],
            confirm: Some(false),
            ..Invocation::default()
        },
    );
    let outcome = done(w.start());
    assert!(matches!(outcome, Outcome::Completed { terminal: Terminal::Push { .. }, .. }));
    assert_eq!(
        w.provider().terminal_calls(),
        vec![save("m", &[], StashFlags { include_untracked: false, keep_index: true })]
    );
}

#[test]
fn test_push_nothing_to_save_is_informational() {
    let provider = provider().failing(
        "save",
        Error::Stash {
            reason: Some(StashFailure::NothingToSave),
            message: "No local changes to save".to_string(),
        },
    );
    let mut w = wizard(
        provider,
        Invocation {
            subcommand: Some(Subcommand::Push),
            message: Some(String::new()),
            confirm: Some(false),
            ..Invocation::default()
        },
    );
    match done(w.start()) {
        outcome @ Outcome::Reported(_) => {
            assert!(outcome.is_success());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

// === Confirmation rules ===

#[test]
fn test_skip_preference_removes_confirmation() {
    let mut w = Wizard::new(
        provider(),
        invoke(Subcommand::Apply),
        Preferences::skipping([Subcommand::Apply]),
    )
    .unwrap();
    prompt(w.start());
    let outcome = done(w.resume(Response::item(0)));
    assert!(matches!(
        outcome,
        Outcome::Completed { terminal: Terminal::Apply { remove: false, .. }, .. }
    ));
}

#[test]
fn test_confirm_override_beats_preference() {
    let mut w = Wizard::new(
        provider(),
        Invocation { confirm: Some(true), ..invoke(Subcommand::Apply) },
        Preferences::skipping([Subcommand::Apply]),
    )
    .unwrap();
    prompt(w.start());
    assert_eq!(prompt(w.resume(Response::item(0))).id, StepId::Confirm);
}

#[test]
fn test_drop_always_confirms() {
    let mut w = Wizard::new(
        provider(),
        Invocation { confirm: Some(false), ..invoke(Subcommand::Drop) },
        Preferences::skipping([Subcommand::Drop]),
    )
    .unwrap();
    prompt(w.start());
    assert_eq!(prompt(w.resume(Response::item(0))).id, StepId::Confirm);
    assert!(w.provider().terminal_calls().is_empty());
}

// === Navigation ===

#[test]
fn test_single_context_back_lands_on_subcommand_step() {
    let mut w = wizard(provider(), Invocation::default());

    let menu = prompt(w.start());
    assert_eq!(menu.id, StepId::Subcommand);
    assert_eq!(menu.labels(), vec!["Apply", "Drop", "List", "Pop", "Push"]);

    let pick = prompt(w.resume(Response::item(1)));
    assert_eq!(pick.id, StepId::Changeset, "the repository step is never yielded");

    let menu = prompt(w.resume(Response::Back));
    assert_eq!(menu.id, StepId::Subcommand);
    assert!(menu.items[1].picked, "the previous answer is pre-selected");
    assert_eq!(w.state().repository.provenance(), Some(Provenance::Implicit));
}

#[test]
fn test_multiple_contexts_ask_for_repository() {
    let provider = MockStashProvider::with_contexts(&[REPO, OTHER])
        .active(OTHER)
        .stashes(REPO, two_stashes());
    let mut w = wizard(provider, invoke(Subcommand::Drop));

    let repos = prompt(w.start());
    assert_eq!(repos.id, StepId::Repository);
    assert_eq!(repos.labels(), vec!["app", "lib"]);
    assert!(repos.items[1].picked, "the active repository is pre-selected");

    let pick = prompt(w.resume(Response::item(0)));
    assert_eq!(pick.title, "Drop Stash (app)");

    assert_eq!(prompt(w.resume(Response::Back)).id, StepId::Repository);
    assert_eq!(done(w.resume(Response::Back)), Outcome::Back, "the subcommand was preset");
}

#[test]
fn test_back_from_first_step_leaves() {
    let mut w = wizard(provider(), Invocation::default());
    prompt(w.start());
    assert_eq!(done(w.resume(Response::Back)), Outcome::Back);
}

#[test]
fn test_back_then_forward_rebuilds_identical_confirm() {
    let mut w = wizard(provider(), invoke(Subcommand::Apply));
    prompt(w.start());
    let first = prompt(w.resume(Response::item(1)));

    let pick = prompt(w.resume(Response::Back));
    assert_eq!(pick.id, StepId::Changeset);
    assert!(pick.items[1].picked);

    let second = prompt(w.resume(Response::item(1)));
    assert_eq!(first, second);
}

#[test]
fn test_push_back_then_forward_rebuilds_identical_confirm() {
    let mut w = wizard(provider(), invoke(Subcommand::Push));
    prompt(w.start());
    let first = prompt(w.resume(Response::Text("wip".to_string())));
    assert_eq!(first.id, StepId::Confirm);

    let message = prompt(w.resume(Response::Back));
    assert_eq!(message.id, StepId::Message);
    assert_eq!(message.value.as_deref(), Some("wip"));

    let second = prompt(w.resume(Response::Text("wip".to_string())));
    assert_eq!(first, second);
    assert!(w.provider().terminal_calls().is_empty());
}

#[test]
fn test_preset_changeset_skips_picker_and_back_leaves() {
    let mut w = wizard(
        provider(),
        Invocation {
            subcommand: Some(Subcommand::Apply),
            repository: Some(PathBuf::from(REPO)),
            changeset: Some(changeset(REPO, 1, "second")),
            ..Invocation::default()
        },
    );
    let confirm = prompt(w.start());
    assert_eq!(confirm.id, StepId::Confirm);
    assert_eq!(done(w.resume(Response::Back)), Outcome::Back);
    assert!(w.provider().terminal_calls().is_empty());
}

#[test]
fn test_cancel_anywhere_is_side_effect_free() {
    let mut w = wizard(provider(), invoke(Subcommand::Drop));
    prompt(w.start());
    prompt(w.resume(Response::item(0)));
    assert_eq!(done(w.resume(Response::Cancel)), Outcome::Cancelled);
    assert!(w.provider().terminal_calls().is_empty());
}

// === List browsing ===

#[test]
fn test_list_menu_file_rows_return_to_picker_and_drop_confirms() {
    let provider = provider().files("stash@{0}", &["src/a.rs"]);
    let mut w = wizard(provider, invoke(Subcommand::List));

    let pick = prompt(w.start());
    assert_eq!(pick.title, "Stashes");

    let menu = prompt(w.resume(Response::item(0)));
    assert_eq!(menu.id, StepId::ListAction);
    assert_eq!(menu.labels(), vec!["Apply Stash", "Pop Stash", "Drop Stash...", "src/a.rs"]);
    assert_eq!(menu.title, "stash@{0}: first");

    let pick = prompt(w.resume(Response::item(3)));
    assert_eq!(pick.id, StepId::Changeset);
    assert!(pick.items[0].picked);

    prompt(w.resume(Response::item(0)));
    let confirm = prompt(w.resume(Response::item(2)));
    assert_eq!(confirm.id, StepId::Confirm);
    assert_eq!(confirm.title, "Confirm Drop Stash");
    assert!(w.provider().terminal_calls().is_empty());

    done(w.resume(Response::item(0)));
    assert_eq!(w.provider().terminal_calls(), vec![ProviderCall::Delete("stash@{0}".into())]);
}

#[test]
fn test_back_from_list_drop_confirm_returns_to_list_menu() {
    let mut w = wizard(provider(), Invocation::default());
    prompt(w.start());
    prompt(w.resume(Response::item(2)));
    let menu = prompt(w.resume(Response::item(0)));
    assert_eq!(menu.id, StepId::ListAction);

    let confirm = prompt(w.resume(Response::item(2)));
    assert_eq!(confirm.title, "Confirm Drop Stash");

    assert_eq!(prompt(w.resume(Response::Back)), menu);
    assert_eq!(w.state().subcommand.value(), Some(&Subcommand::List));

    let pick = prompt(w.resume(Response::Back));
    assert_eq!(pick.id, StepId::Changeset);
    assert_eq!(pick.title, "Stashes");
    assert!(pick.items[0].picked);

    let subcommands = prompt(w.resume(Response::Back));
    assert_eq!(subcommands.id, StepId::Subcommand);
    let picked: Vec<&str> =
        subcommands.items.iter().filter(|i| i.picked).map(|i| i.label.as_str()).collect();
    assert_eq!(picked, vec!["List"]);
    assert!(w.provider().terminal_calls().is_empty());
}

#[test]
fn test_list_menu_pop_executes_without_confirmation() {
    let mut w = wizard(provider(), invoke(Subcommand::List));
    prompt(w.start());
    prompt(w.resume(Response::item(1)));

    let outcome = done(w.resume(Response::item(1)));
    assert!(matches!(
        outcome,
        Outcome::Completed { terminal: Terminal::Apply { remove: true, .. }, .. }
    ));
    assert_eq!(
        w.provider().terminal_calls(),
        vec![ProviderCall::Apply { ref_name: "stash@{1}".into(), remove: true }]
    );
}

// === Buttons and validation ===

#[test]
fn test_buttons_reveal_without_resolving() {
    let mut w = wizard(provider(), invoke(Subcommand::Apply));
    let pick = prompt(w.start());

    let shown =
        prompt(w.resume(Response::Button { button: Button::RevealChangeset, item: Some(1) }));
    assert_eq!(shown.id, StepId::Changeset);
    assert_eq!(shown.items, pick.items);
    assert_eq!(shown.notice.as_deref(), Some("showing stash@{1}"));
    assert!(!w.state().changeset.is_settled());

    let shown = prompt(w.resume(Response::Button { button: Button::RevealAll, item: None }));
    assert_eq!(shown.notice.as_deref(), Some("showing /work/app"));

    assert!(matches!(
        w.resume(Response::Button { button: Button::RevealAll, item: Some(0) }),
        Err(Error::InvalidResponse(_))
    ));

    assert_eq!(prompt(w.resume(Response::item(0))).id, StepId::Confirm);
    assert!(w.provider().terminal_calls().is_empty());
}

#[test]
fn test_invalid_responses_keep_step_pending() {
    let mut w = wizard(provider(), invoke(Subcommand::Apply));
    let pick = prompt(w.start());

    for bad in [
        Response::Text("stash@{0}".to_string()),
        Response::Items(vec![]),
        Response::Items(vec![7]),
        Response::Items(vec![0, 1]),
    ] {
        assert!(matches!(w.resume(bad), Err(Error::InvalidResponse(_))));
    }
    assert_eq!(prompt(w.start()), pick);
    assert!(!w.state().changeset.is_settled());
}

#[test]
fn test_items_for_input_step_are_rejected() {
    let mut w = wizard(provider(), invoke(Subcommand::Push));
    prompt(w.start());
    assert!(matches!(w.resume(Response::item(0)), Err(Error::InvalidResponse(_))));
    assert!(!w.state().message.is_settled());
}

#[test]
fn test_resume_before_start_is_invalid() {
    let mut w = wizard(provider(), invoke(Subcommand::Apply));
    assert!(matches!(w.resume(Response::Cancel), Err(Error::InvalidResponse(_))));
}

// === Termination ===

#[test]
fn test_nothing_is_yielded_after_terminal_operation() {
    let mut w = wizard(provider(), invoke(Subcommand::Drop));
    prompt(w.start());
    prompt(w.resume(Response::item(0)));
    done(w.resume(Response::item(0)));

    let calls = w.provider().calls();
    assert_eq!(calls.last(), Some(&ProviderCall::Delete("stash@{0}".into())));
    assert!(w.is_finished());
    assert!(matches!(w.resume(Response::Cancel), Err(Error::WizardFinished)));
    assert!(matches!(w.start(), Err(Error::WizardFinished)));
    assert_eq!(w.provider().calls(), calls);
}

#[test]
fn test_listing_failure_is_reported() {
    let provider = provider().failing(
        "list",
        Error::CommandFailed {
            command: "git stash list".to_string(),
            exit_code: 128,
            output: "fatal: not a git repository".to_string(),
        },
    );
    let mut w = wizard(provider, invoke(Subcommand::Drop));
    match done(w.start()) {
        Outcome::Reported(report) => {
            assert_eq!(report.severity, Severity::Failure);
            assert_eq!(report.message, "Unable to delete stash");
            assert_eq!(report.detail, "fatal: not a git repository");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_no_repositories_is_reported() {
    let mut w = wizard(MockStashProvider::with_contexts(&[]), invoke(Subcommand::List));
    match done(w.start()) {
        Outcome::Reported(report) => assert_eq!(report.message, "Unable to list stashes"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

// === Driver ===

#[test]
fn test_run_reprompts_with_reason_after_invalid_response() {
    let mut w = wizard(provider(), invoke(Subcommand::Drop));
    let mut presenter = ScriptedPresenter::new([
        Response::Text("first".to_string()),
        Response::item(0),
        Response::item(0),
    ]);

    let outcome = run(&mut w, &mut presenter).unwrap();
    assert!(matches!(outcome, Outcome::Completed { .. }));

    let shown = presenter.shown();
    assert_eq!(shown.len(), 3);
    assert_eq!(shown[0].notice, None);
    assert_eq!(shown[1].id, StepId::Changeset);
    assert_eq!(shown[1].notice.as_deref(), Some("this step expects a selection"));
    assert_eq!(shown[2].id, StepId::Confirm);
}

#[test]
fn test_run_propagates_presenter_failure() {
    let mut w = wizard(provider(), invoke(Subcommand::Drop));
    let mut presenter = ScriptedPresenter::new(Vec::new());
    assert!(run(&mut w, &mut presenter).is_err());
    assert!(w.provider().terminal_calls().is_empty());
}

#[test]
fn test_event_log_records_prompt_response_outcome() {
    let dir = TempDir::new().unwrap();
    let log = EventLog::at(dir.path().join("events.jsonl"));
    let mut w = wizard(provider(), invoke(Subcommand::Drop)).with_event_log(Some(log.clone()));

    prompt(w.start());
    done(w.resume(Response::Cancel));

    let events: Vec<serde_json::Value> = std::fs::read_to_string(log.path())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["prompt", "response", "outcome"]);
    assert_eq!(events[0]["step"]["id"], "Changeset");
    assert_eq!(events[2]["outcome"], "Cancelled");
}

// === Properties ===

fn confirmable() -> impl Strategy<Value = Subcommand> {
    prop_oneof![Just(Subcommand::Apply), Just(Subcommand::Pop), Just(Subcommand::Push)]
}

fn preset_through_third(subcommand: Subcommand, confirm: Option<bool>) -> Invocation {
    let mut invocation = Invocation {
        subcommand: Some(subcommand),
        repository: Some(PathBuf::from(REPO)),
        confirm,
        ..Invocation::default()
    };
    if subcommand == Subcommand::Push {
        invocation.message = Some("m".to_string());
    } else {
        invocation.changeset = Some(changeset(REPO, 0, "first"));
    }
    invocation
}

proptest! {
    #[test]
    fn prop_confirmation_follows_override_then_preference(
        subcommand in confirmable(),
        skip in any::<bool>(),
        confirm in proptest::option::of(any::<bool>()),
    ) {
        let preferences =
            if skip { Preferences::skipping([subcommand]) } else { Preferences::default() };
        let mut w =
            Wizard::new(provider(), preset_through_third(subcommand, confirm), preferences).unwrap();

        let expect_confirm = confirm.unwrap_or(!skip);
        match w.start().unwrap() {
            Yield::Prompt(step) => {
                prop_assert!(expect_confirm);
                prop_assert_eq!(step.id, StepId::Confirm);
                prop_assert!(w.provider().terminal_calls().is_empty());
            }
            Yield::Done(outcome) => {
                prop_assert!(!expect_confirm);
                prop_assert!(outcome.terminal().is_some());
                prop_assert_eq!(w.provider().terminal_calls().len(), 1);
            }
        }
    }

    #[test]
    fn prop_drop_confirms_regardless_of_settings(
        skip in any::<bool>(),
        confirm in proptest::option::of(any::<bool>()),
    ) {
        let preferences =
            if skip { Preferences::skipping([Subcommand::Drop]) } else { Preferences::default() };
        let mut w = Wizard::new(
            provider(),
            preset_through_third(Subcommand::Drop, confirm),
            preferences,
        )
        .unwrap();
        match w.start().unwrap() {
            Yield::Prompt(step) => prop_assert_eq!(step.id, StepId::Confirm),
            Yield::Done(outcome) => prop_assert!(false, "drop ran without asking: {:?}", outcome),
        }
    }
}
