//! Editing committed terms: focus, drafts, validation and selection

mod common;

use common::{commit_text, labels, model_from};
use term_filter::commands::Cmd;
use term_filter::filter::Filter;
use term_filter::messages::{
    CompletionMsg, Direction, FocusMsg, InputMsg, Msg, SlotId, TermsMsg,
};
use term_filter::model::{FilterModel, Term};
use term_filter::update::update;

/// `host = web`
fn condition() -> FilterModel {
    model_from(&Filter::condition("host", "=", "web"))
}

fn run(model: &mut FilterModel, msg: Msg) -> Vec<Cmd> {
    update(model, msg).map(Cmd::flatten).unwrap_or_default()
}

fn delete_all(model: &mut FilterModel) {
    let len = model.slot_text(model.focus).chars().count();
    for _ in 0..len {
        run(model, Msg::Input(InputMsg::DeleteBackward));
    }
}

// ========================================================================
// Focus
// ========================================================================

#[test]
fn test_left_at_start_of_input_focuses_last_term() {
    let mut model = condition();
    let cmds = run(&mut model, Msg::move_cursor(Direction::Left));

    assert!(cmds.contains(&Cmd::Focus(SlotId::Term(2))));
    // Focus only moves once the surface reports it
    assert_eq!(model.focus, SlotId::Input);
}

#[test]
fn test_focus_navigation_wraps_through_input() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(2)));

    let cmds = run(&mut model, Msg::Focus(FocusMsg::Forward));
    assert_eq!(cmds, vec![Cmd::Focus(SlotId::Input)]);

    run(&mut model, Msg::focused(SlotId::Term(0)));
    let cmds = run(&mut model, Msg::Focus(FocusMsg::Backward));
    assert_eq!(cmds, vec![Cmd::Focus(SlotId::Input)]);
}

#[test]
fn test_focus_without_terms_does_nothing() {
    let mut model = common::filter_model();
    assert!(update(&mut model, Msg::Focus(FocusMsg::Forward)).is_none());
    assert!(update(&mut model, Msg::Focus(FocusMsg::Backward)).is_none());
}

#[test]
fn test_focused_term_gets_draft() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(0)));

    assert_eq!(model.focus, SlotId::Term(0));
    assert_eq!(model.slot_text(SlotId::Term(0)), "host");
}

#[test]
fn test_focused_out_of_range_is_ignored() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(9)));
    assert_eq!(model.focus, SlotId::Input);
}

// ========================================================================
// Drafts and saving
// ========================================================================

#[test]
fn test_edit_and_save_term() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(0)));
    let typed = run(&mut model, Msg::insert_char('s'));

    assert!(typed.contains(&Cmd::SetValidity {
        slot: SlotId::Term(0),
        message: None,
    }));
    // Not committed until saved
    assert_eq!(model.serialized(), "host = web");

    let cmds = run(&mut model, Msg::Terms(TermsMsg::Save(0)));
    assert_eq!(model.serialized(), "hosts = web");
    assert!(cmds.contains(&Cmd::SyncValue("hosts = web".into())));
}

#[test]
fn test_leaving_term_saves_draft() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(2)));
    delete_all(&mut model);
    for ch in "db".chars() {
        run(&mut model, Msg::insert_char(ch));
    }
    run(&mut model, Msg::focused(SlotId::Input));

    assert_eq!(model.focus, SlotId::Input);
    assert_eq!(model.serialized(), "host = db");
}

#[test]
fn test_empty_draft_reverts() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(2)));
    delete_all(&mut model);
    let cmds = run(&mut model, Msg::focused(SlotId::Input));

    assert!(cmds.contains(&Cmd::WriteValue {
        slot: SlotId::Term(2),
        value: "web".into(),
    }));
    assert_eq!(labels(&model), vec!["host", "=", "web"]);
    assert_eq!(model.focus, SlotId::Input);
}

#[test]
fn test_invalid_operator_keeps_focus() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(1)));
    delete_all(&mut model);
    let typed = run(&mut model, Msg::insert_char('x'));

    assert!(typed.contains(&Cmd::ReportValidity(SlotId::Term(1))));
    let message = model.validity.clone().unwrap();
    assert!(message.starts_with("Please type one of: =, !="));

    let cmds = run(&mut model, Msg::focused(SlotId::Input));
    assert_eq!(model.focus, SlotId::Term(1));
    assert!(cmds.contains(&Cmd::Focus(SlotId::Term(1))));
    assert_eq!(model.serialized(), "host = web");
}

#[test]
fn test_partial_operator_is_valid_while_typing() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(1)));
    delete_all(&mut model);
    run(&mut model, Msg::insert_char('<'));
    assert!(model.validity.is_none());

    run(&mut model, Msg::insert_char('='));
    run(&mut model, Msg::focused(SlotId::Input));
    assert_eq!(model.serialized(), "host <= web");
}

#[test]
fn test_space_in_term_slot_is_literal() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(2)));
    run(&mut model, Msg::Input(InputMsg::MoveCursorEnd));
    for ch in " farm".chars() {
        run(&mut model, Msg::insert_char(ch));
    }
    run(&mut model, Msg::Terms(TermsMsg::Save(2)));

    assert_eq!(model.terms.get(2).unwrap().label, "web farm");
    assert_eq!(model.serialized(), "host = web%20farm");
}

#[test]
fn test_term_edit_requests_completion_for_its_slot() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(2)));
    let cmds = run(&mut model, Msg::insert_char('1'));

    let request = cmds
        .iter()
        .find_map(|cmd| match cmd {
            Cmd::Notify(term_filter::commands::EditorEvent::Complete(r)) => Some(r),
            _ => None,
        })
        .unwrap();
    assert_eq!(request.term_index, Some(2));
    assert_eq!(request.column.as_deref(), Some("host"));
    assert_eq!(request.operator.as_deref(), Some("="));
}

// ========================================================================
// Suggestions for term slots
// ========================================================================

#[test]
fn test_suggestion_for_unfocused_slot_is_ignored() {
    let mut model = condition();
    let cmd = update(
        &mut model,
        Msg::Completion(CompletionMsg::Suggestion {
            slot: SlotId::Term(0),
            data: "service".into(),
        }),
    );
    assert!(cmd.is_none());
    assert_eq!(model.serialized(), "host = web");
}

#[test]
fn test_completed_term_slot_keeps_search() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(0)));
    let cmds = run(
        &mut model,
        Msg::complete(
            SlotId::Term(0),
            Term::column("service.name").with_label("Service"),
        ),
    );
    assert_eq!(
        cmds,
        vec![Cmd::WriteValue {
            slot: SlotId::Term(0),
            value: "Service".into(),
        }]
    );

    run(&mut model, Msg::Terms(TermsMsg::Save(0)));
    let term = model.terms.get(0).unwrap();
    assert_eq!(term.label, "Service");
    assert_eq!(term.search, "service.name");
}

#[test]
fn test_plain_completion_keeps_term_class() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(1)));
    run(&mut model, Msg::complete(SlotId::Term(1), "!="));
    run(&mut model, Msg::Terms(TermsMsg::Save(1)));

    let term = model.terms.get(1).unwrap();
    assert_eq!(term.label, "!=");
    assert_eq!(term.class.as_deref(), Some("operator"));
    assert_eq!(model.serialized(), "host != web");
}

#[test]
fn test_returning_to_input_resets_cycled_preview() {
    let mut model = common::filter_model();
    commit_text(&mut model, "host");
    run(&mut model, Msg::Input(InputMsg::CyclePreview(Direction::Down)));
    assert_eq!(model.previewed.as_ref().map(|t| t.label.as_str()), Some("!="));

    run(&mut model, Msg::focused(SlotId::Term(0)));
    let cmds = run(&mut model, Msg::focused(SlotId::Input));

    assert_eq!(model.previewed.as_ref().map(|t| t.label.as_str()), Some("="));
    assert!(cmds.contains(&Cmd::RenderPreview(Some("=".into()))));
}

// ========================================================================
// Removing and selection
// ========================================================================

#[test]
fn test_remove_shifts_focus_and_selection() {
    let mut model = model_from(&Filter::all(vec![
        Filter::condition("a", "=", "1"),
        Filter::condition("b", "=", "2"),
    ]));
    run(&mut model, Msg::focused(SlotId::Term(5)));
    run(&mut model, Msg::Terms(TermsMsg::ToggleSelection(6)));

    run(&mut model, Msg::Terms(TermsMsg::Remove(3)));

    assert_eq!(model.focus, SlotId::Term(4));
    assert_eq!(model.selected.iter().copied().collect::<Vec<_>>(), vec![5]);
    assert_eq!(model.serialized(), "a = 1 b = 2");
}

#[test]
fn test_removing_focused_term_returns_to_input() {
    let mut model = condition();
    run(&mut model, Msg::focused(SlotId::Term(2)));
    run(&mut model, Msg::Terms(TermsMsg::Remove(2)));

    assert_eq!(model.focus, SlotId::Input);
    assert!(model.draft.is_none());
}

#[test]
fn test_select_all_then_delete_clears() {
    let mut model = condition();
    let cmds = run(&mut model, Msg::Terms(TermsMsg::SelectAll));
    assert_eq!(cmds.len(), 3);

    run(&mut model, Msg::Input(InputMsg::DeleteBackward));
    assert!(labels(&model).is_empty());
    assert_eq!(model.serialized(), "");
}

#[test]
fn test_typing_clears_selection() {
    let mut model = condition();
    commit_text(&mut model, "&");
    run(&mut model, Msg::Terms(TermsMsg::SelectAll));
    common::type_text(&mut model, "x");

    assert!(labels(&model).is_empty());
    assert_eq!(model.input.text(), "x");
}

#[test]
fn test_deselect() {
    let mut model = condition();
    run(&mut model, Msg::Terms(TermsMsg::SelectAll));
    let cmds = run(&mut model, Msg::Terms(TermsMsg::Deselect));

    assert!(model.selected.is_empty());
    assert!(cmds.contains(&Cmd::SetSelected {
        index: 1,
        selected: false,
    }));
    assert_eq!(labels(&model).len(), 3);
}

#[test]
fn test_remove_last_message() {
    let mut model = condition();
    commit_text(&mut model, "&");
    run(&mut model, Msg::Terms(TermsMsg::RemoveLast));
    assert_eq!(model.serialized(), "host = web");
}
