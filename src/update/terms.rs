//! Term sequence updates: commit, exchange, remove, save and selection.
//!
//! The helpers in here are shared by the other handlers. Each one mutates the
//! model and returns the surface commands that keep the rendering in step.

use tracing::debug;

use super::some;
use crate::commands::{Cmd, EditorEvent};
use crate::messages::{SlotId, TermsMsg};
use crate::model::{FilterModel, Term};

/// Handle term sequence messages
pub fn update_terms(model: &mut FilterModel, msg: TermsMsg) -> Option<Cmd> {
    match msg {
        TermsMsg::RemoveLast => some(Cmd::batch(vec![
            pop_term(model),
            placeholder_cmd(model),
        ])),
        TermsMsg::Remove(index) => some(Cmd::batch(vec![
            remove_term(model, index),
            placeholder_cmd(model),
        ])),
        TermsMsg::ClearSelected => some(Cmd::batch(vec![
            clear_selected(model),
            placeholder_cmd(model),
        ])),
        TermsMsg::Save(index) => some(save_term(model, index).1),
        TermsMsg::SelectAll => some(select_all(model)),
        TermsMsg::Deselect => some(deselect_all(model)),
        TermsMsg::ToggleSelection(index) => {
            if index >= model.terms.len() {
                return None;
            }
            let selected = if model.selected.remove(&index) {
                false
            } else {
                model.selected.insert(index);
                true
            };
            Some(Cmd::SetSelected { index, selected })
        }
    }
}

/// Append `term` to the sequence and advance the grammar position
pub(crate) fn add_term(model: &mut FilterModel, term: Term) -> Cmd {
    let index = model.terms.insert(term.clone(), None);
    model.recompute_position();
    debug!(target: "terms", index, label = %term.label, search = %term.search, "term committed");

    Cmd::batch(vec![
        Cmd::RenderTerm { index, term },
        Cmd::SyncValue(model.serialized().to_string()),
        preview_cmd(model),
    ])
}

/// Build the term a slot's current text would commit as
///
/// Returns `None` for an empty (after trim) slot. The suggestion remembered in
/// `last_completed` is consumed either way; its search and class are used
/// when its label still matches the typed text.
pub(crate) fn read_full_term(model: &mut FilterModel, slot: SlotId) -> Option<Term> {
    let value = model.slot_text(slot).trim().to_string();
    if value.is_empty() {
        return None;
    }

    let mut term = match slot.term_index().and_then(|i| model.terms.get(i)) {
        Some(existing) => existing.clone(),
        None => Term::plain(String::new()),
    };
    term.label = value.clone();
    term.search = value;

    if let Some(completed) = model.last_completed.take() {
        if completed.label == term.label {
            term.search = completed.search;
            if completed.class.is_some() {
                term.class = completed.class;
            }
            if term.term_type.is_none() {
                term.term_type = completed.term_type;
            }
        }
    }

    if term.term_type.is_none() {
        term.term_type = model.term_type;
    }
    model.grammar.prepare_search(&mut term);

    Some(term)
}

/// Commit the trailing input as a new term and clear it
pub(crate) fn exchange_term(model: &mut FilterModel) -> Cmd {
    let Some(term) = read_full_term(model, SlotId::Input) else {
        return Cmd::None;
    };

    let added = add_term(model, term);
    model.input.clear();

    Cmd::batch(vec![
        Cmd::Notify(EditorEvent::ResetCompletion),
        added,
        Cmd::WriteValue {
            slot: SlotId::Input,
            value: String::new(),
        },
    ])
}

/// Remove the term at `index`, shifting selection and focus of later terms down
pub(crate) fn remove_term(model: &mut FilterModel, index: usize) -> Cmd {
    let Some(removed) = model.terms.remove_at(index) else {
        return Cmd::None;
    };
    debug!(target: "terms", index, label = %removed.label, "term removed");

    model.selected = model
        .selected
        .iter()
        .filter(|&&i| i != index)
        .map(|&i| if i > index { i - 1 } else { i })
        .collect();

    match model.focus {
        SlotId::Term(focused) if focused == index => {
            model.focus = SlotId::Input;
            model.draft = None;
            model.validity = None;
        }
        SlotId::Term(focused) if focused > index => {
            model.focus = SlotId::Term(focused - 1);
        }
        _ => {}
    }

    model.recompute_position();

    Cmd::batch(vec![
        Cmd::RemoveSlot(index),
        Cmd::SyncValue(model.serialized().to_string()),
        preview_cmd(model),
    ])
}

/// Remove the last term and cancel pending suggestion lookups
pub(crate) fn pop_term(model: &mut FilterModel) -> Cmd {
    if !model.has_terms() {
        return Cmd::None;
    }

    let last = model.terms.len() - 1;
    Cmd::batch(vec![
        remove_term(model, last),
        Cmd::Notify(EditorEvent::AbortCompletion),
    ])
}

/// Remove all selected terms
pub(crate) fn clear_selected(model: &mut FilterModel) -> Cmd {
    if !model.has_terms() || model.selected.is_empty() {
        return Cmd::None;
    }

    // Highest first, so lower indices stay valid
    let indices: Vec<usize> = model.selected.iter().rev().copied().collect();
    let cmds = indices
        .into_iter()
        .map(|index| remove_term(model, index))
        .collect();
    Cmd::batch(cmds)
}

/// Save the draft of the term slot at `index`
///
/// Returns whether the slot may be left. An invalid draft keeps its message
/// and is reported; an empty draft reverts to the committed label.
pub(crate) fn save_term(model: &mut FilterModel, index: usize) -> (bool, Cmd) {
    let slot = SlotId::Term(index);
    if model.focus != slot || model.terms.get(index).is_none() {
        return (true, Cmd::None);
    }
    let Some(draft) = model.draft.as_ref() else {
        return (true, Cmd::None);
    };

    let validity = model.grammar.check_validity(
        draft.text(),
        model.slot_type(slot),
        model.slot_context(slot),
        &model.config.choose_template,
    );
    if let Some(message) = validity.message() {
        let message = message.to_string();
        debug!(target: "terms", index, %message, "term not saved");
        model.validity = Some(message.clone());
        return (
            false,
            Cmd::batch(vec![
                Cmd::SetValidity {
                    slot,
                    message: Some(message),
                },
                Cmd::ReportValidity(slot),
            ]),
        );
    }
    model.validity = None;

    let Some(term) = read_full_term(model, slot) else {
        let label = model
            .terms
            .get(index)
            .map(|t| t.label.clone())
            .unwrap_or_default();
        if let Some(draft) = model.draft.as_mut() {
            draft.set_text(&label);
        }
        return (
            true,
            Cmd::WriteValue {
                slot,
                value: label,
            },
        );
    };

    if !model.terms.replace_at(index, term.clone()) {
        return (true, Cmd::None);
    }
    debug!(target: "terms", index, label = %term.label, "term saved");

    (
        true,
        Cmd::batch(vec![
            Cmd::UpdateTerm { index, term },
            Cmd::SyncValue(model.serialized().to_string()),
        ]),
    )
}

pub(crate) fn select_all(model: &mut FilterModel) -> Cmd {
    model.selected = (0..model.terms.len()).collect();
    Cmd::batch(
        model
            .selected
            .iter()
            .map(|&index| Cmd::SetSelected {
                index,
                selected: true,
            })
            .collect(),
    )
}

pub(crate) fn deselect_all(model: &mut FilterModel) -> Cmd {
    let cmds = model
        .selected
        .iter()
        .map(|&index| Cmd::SetSelected {
            index,
            selected: false,
        })
        .collect();
    model.selected.clear();
    Cmd::batch(cmds)
}

pub(crate) fn preview_cmd(model: &FilterModel) -> Cmd {
    Cmd::RenderPreview(model.previewed.as_ref().map(|t| t.label.clone()))
}

pub(crate) fn placeholder_cmd(model: &FilterModel) -> Cmd {
    Cmd::SetPlaceholder(model.placeholder().to_string())
}
