//! Slot editing: typing, deleting, cursor movement and the preview.
//!
//! The trailing input runs every typed character past the grammar before it
//! lands: a character that completes an operator is committed right away, one
//! that starts an operator commits the pending text first. Term slots edit
//! their draft and are re-validated after every change.

use tracing::trace;

use super::completion::completion_request;
use super::focus::{focus_backward, focus_forward};
use super::some;
use super::terms::{
    add_term, clear_selected, deselect_all, exchange_term, placeholder_cmd, pop_term,
};
use crate::commands::Cmd;
use crate::editable::SlotInput;
use crate::messages::{Direction, InputMsg, SlotId};
use crate::model::{FilterModel, TermType};

/// Handle editing messages for the focused slot
pub fn update_input(model: &mut FilterModel, msg: InputMsg) -> Option<Cmd> {
    let slot = model.focus;

    match msg {
        InputMsg::InsertChar(ch) => some(insert_char(model, slot, ch)),
        InputMsg::InsertText(text) => some(Cmd::batch(
            text.chars()
                .map(|ch| {
                    let focus = model.focus;
                    insert_char(model, focus, ch)
                })
                .collect(),
        )),
        InputMsg::DeleteBackward => some(delete_backward(model, slot)),
        InputMsg::DeleteForward => some(delete_forward(model, slot)),
        InputMsg::MoveCursor(direction) => some(move_cursor(model, slot, direction)),
        InputMsg::MoveCursorStart => {
            edit_slot(model, slot, |input| {
                input.move_start();
                true
            });
            None
        }
        InputMsg::MoveCursorEnd => {
            edit_slot(model, slot, |input| {
                input.move_end();
                true
            });
            if slot.is_input() {
                some(deselect_all(model))
            } else {
                None
            }
        }
        InputMsg::ConfirmPreview => some(confirm_preview(model, slot)),
        InputMsg::CommitPreview => {
            if !slot.is_input() {
                return None;
            }
            let preview = model.previewed.clone()?;
            some(Cmd::batch(vec![
                add_term(model, preview),
                placeholder_cmd(model),
            ]))
        }
        InputMsg::CyclePreview(direction) => cycle_preview(model, direction),
        InputMsg::Exchange => some(Cmd::batch(vec![
            exchange_term(model),
            placeholder_cmd(model),
        ])),
    }
}

/// Run `edit` on the text of `slot`, returning whether it changed anything
fn edit_slot(
    model: &mut FilterModel,
    slot: SlotId,
    edit: impl FnOnce(&mut SlotInput) -> bool,
) -> bool {
    match slot {
        SlotId::Input => edit(&mut model.input),
        SlotId::Term(_) => model.draft.as_mut().is_some_and(edit),
    }
}

fn write_slot(model: &FilterModel, slot: SlotId) -> Cmd {
    Cmd::WriteValue {
        slot,
        value: model.slot_text(slot).to_string(),
    }
}

fn insert_char(model: &mut FilterModel, slot: SlotId, ch: char) -> Cmd {
    if ch == ' ' {
        return confirm_preview(model, slot);
    }
    if !slot.is_input() {
        return insert_plain(model, slot, ch);
    }

    let typed = if model.term_type == Some(TermType::Operator) {
        format!("{}{}", model.input.trimmed(), ch)
    } else {
        ch.to_string()
    };
    let options =
        model
            .grammar
            .continuations(&typed, model.term_type, model.slot_context(SlotId::Input));

    if options.partial {
        trace!(typed, "partial operator, exchanging pending input");
        return Cmd::batch(vec![
            exchange_term(model),
            placeholder_cmd(model),
            insert_plain(model, slot, ch),
        ]);
    }

    if let Some(matched) = options.exact(&typed).cloned() {
        trace!(typed, "operator completed");
        let before = if model.term_type != matched.term_type {
            exchange_term(model)
        } else {
            model.input.clear();
            write_slot(model, SlotId::Input)
        };
        return Cmd::batch(vec![
            before,
            add_term(model, matched),
            placeholder_cmd(model),
        ]);
    }

    insert_plain(model, slot, ch)
}

/// Insert `ch` without consulting the grammar
fn insert_plain(model: &mut FilterModel, slot: SlotId, ch: char) -> Cmd {
    if !edit_slot(model, slot, |input| input.insert_char(ch)) {
        return Cmd::None;
    }
    Cmd::batch(vec![write_slot(model, slot), after_edit(model, slot)])
}

/// Space: commit the preview on an empty trailing input, otherwise type a space
fn confirm_preview(model: &mut FilterModel, slot: SlotId) -> Cmd {
    if !slot.is_input() || !model.input.is_empty() {
        return insert_plain(model, slot, ' ');
    }

    let added = match model.previewed.clone() {
        Some(preview) => add_term(model, preview),
        None => Cmd::None,
    };
    Cmd::batch(vec![
        added,
        completion_request(model, SlotId::Input, String::new()),
    ])
}

fn delete_backward(model: &mut FilterModel, slot: SlotId) -> Cmd {
    if !slot.is_input() {
        if !edit_slot(model, slot, |input| input.delete_backward()) {
            return Cmd::None;
        }
        return Cmd::batch(vec![write_slot(model, slot), after_edit(model, slot)]);
    }

    let mut cmds = vec![clear_selected(model)];
    if model.input.is_empty() {
        cmds.push(pop_term(model));
    } else if model.input.delete_backward() {
        cmds.push(write_slot(model, slot));
        cmds.push(after_edit(model, slot));
    }
    cmds.push(placeholder_cmd(model));
    Cmd::batch(cmds)
}

fn delete_forward(model: &mut FilterModel, slot: SlotId) -> Cmd {
    let mut cmds = Vec::new();
    if edit_slot(model, slot, |input| input.delete_forward()) {
        cmds.push(write_slot(model, slot));
        cmds.push(after_edit(model, slot));
    }
    if slot.is_input() {
        cmds.push(clear_selected(model));
        cmds.push(placeholder_cmd(model));
    }
    Cmd::batch(cmds)
}

fn move_cursor(model: &mut FilterModel, slot: SlotId, direction: Direction) -> Cmd {
    let at_edge = match direction {
        Direction::Left => edit_slot(model, slot, |input| input.is_at_start()),
        Direction::Right => edit_slot(model, slot, |input| input.is_at_end()),
        Direction::Up | Direction::Down => {
            return cycle_preview(model, direction).unwrap_or_default();
        }
    };

    let moved = if at_edge && model.has_terms() {
        if direction == Direction::Left {
            focus_backward(model)
        } else {
            focus_forward(model)
        }
    } else {
        edit_slot(model, slot, |input| match direction {
            Direction::Left => input.move_left(),
            _ => input.move_right(),
        });
        Cmd::None
    };

    if slot.is_input() {
        Cmd::batch(vec![moved, deselect_all(model)])
    } else {
        moved
    }
}

fn cycle_preview(model: &mut FilterModel, direction: Direction) -> Option<Cmd> {
    let current = model.previewed.as_ref()?;
    let forward = !matches!(direction, Direction::Up | Direction::Left);
    let next = model.grammar.cycle_preview(current, forward)?;

    let label = next.label.clone();
    model.previewed = Some(next);
    Some(Cmd::RenderPreview(Some(label)))
}

/// Follow-up of a text change in `slot`
fn after_edit(model: &mut FilterModel, slot: SlotId) -> Cmd {
    match slot {
        SlotId::Input => after_input(model),
        SlotId::Term(_) => after_term_edit(model, slot),
    }
}

/// A changed trailing input either keeps going, or commits the preview when the
/// text can no longer be an operator of the previewed kind
fn after_input(model: &mut FilterModel) -> Cmd {
    let mut cmds = Vec::new();
    let value = model.input.trimmed().to_string();

    if !value.is_empty() && model.has_terms() {
        if let Some(preview) = model.previewed.clone() {
            let options = model.grammar.continuations(
                &value,
                model.term_type,
                model.slot_context(SlotId::Input),
            );
            if options.partial {
                return Cmd::None;
            }

            if value != preview.label {
                cmds.push(add_term(model, preview));
            } else {
                cmds.push(exchange_term(model));
            }
            cmds.push(placeholder_cmd(model));
        }
    }

    let label = model.input.text().to_string();
    cmds.push(completion_request(model, SlotId::Input, label));
    cmds.push(clear_selected(model));
    cmds.push(placeholder_cmd(model));
    Cmd::batch(cmds)
}

/// Re-validate an edited term slot, asking for completions only while valid
fn after_term_edit(model: &mut FilterModel, slot: SlotId) -> Cmd {
    let text = model.slot_text(slot).to_string();
    let validity = model.grammar.check_validity(
        &text,
        model.slot_type(slot),
        model.slot_context(slot),
        &model.config.choose_template,
    );
    model.validity = validity.message().map(str::to_string);

    let set = Cmd::SetValidity {
        slot,
        message: model.validity.clone(),
    };
    if !validity.is_valid() {
        return Cmd::batch(vec![set, Cmd::ReportValidity(slot)]);
    }

    Cmd::batch(vec![set, completion_request(model, slot, text)])
}
