//! Completer integration: suggestion payloads in, completion requests out.

use tracing::warn;

use super::some;
use super::terms::{exchange_term, placeholder_cmd};
use crate::commands::{Cmd, CompletionRequest, EditorEvent};
use crate::messages::{CompletionMsg, SlotId, Suggestion};
use crate::model::{FilterModel, TermType};

/// Handle completer messages
pub fn update_completion(model: &mut FilterModel, msg: CompletionMsg) -> Option<Cmd> {
    match msg {
        CompletionMsg::Suggestion { slot, data } => {
            let written = write_suggestion(model, slot, &data)?;
            let label = model.slot_text(slot).to_string();
            some(Cmd::batch(vec![
                written,
                completion_request(model, slot, label),
            ]))
        }
        CompletionMsg::Completion { slot, data } => {
            let written = write_suggestion(model, slot, &data)?;
            if !slot.is_input() {
                return Some(written);
            }
            some(Cmd::batch(vec![
                written,
                exchange_term(model),
                placeholder_cmd(model),
            ]))
        }
    }
}

/// Remember the suggestion and write its label into the slot
///
/// Returns `None` if the slot cannot take it (a term slot without focus).
fn write_suggestion(model: &mut FilterModel, slot: SlotId, data: &Suggestion) -> Option<Cmd> {
    let term = data.to_term();

    match slot {
        SlotId::Input => model.input.set_text(&term.label),
        SlotId::Term(index) => match model.draft.as_mut() {
            Some(draft) if model.focus == slot => draft.set_text(&term.label),
            _ => {
                warn!(index, "suggestion for a term slot without focus ignored");
                return None;
            }
        },
    }

    let value = term.label.clone();
    model.last_completed = Some(term);
    Some(Cmd::WriteValue { slot, value })
}

/// Ask listeners for continuations of `slot`
///
/// Value slots carry the searches of their operator and column, operator
/// slots the search of their column.
pub fn completion_request(model: &FilterModel, slot: SlotId, label: String) -> Cmd {
    if !model.config.term_completion || model.focus != slot {
        return Cmd::None;
    }

    let position = slot.term_index().unwrap_or(model.terms.len());
    let term_type = model.slot_type(slot);
    let search_before = |distance: usize| {
        position
            .checked_sub(distance)
            .and_then(|i| model.terms.get(i))
            .map(|t| t.search.clone())
    };

    let (column, operator) = match term_type {
        Some(TermType::Value) => (search_before(2), search_before(1)),
        Some(TermType::Operator) => (search_before(1), None),
        _ => (None, None),
    };

    Cmd::Notify(EditorEvent::Complete(CompletionRequest {
        label,
        term_type,
        term_index: slot.term_index(),
        column,
        operator,
    }))
}
