//! Focus navigation between the term slots and the trailing input.
//!
//! Moves are requested with a deferred [`Cmd::Focus`]; the model only changes
//! once the surface reports the slot as focused. Leaving a term slot saves its
//! draft, and an invalid draft keeps the focus where it is. Arriving at the
//! trailing input recomputes its preview.

use tracing::{debug, warn};

use super::some;
use super::terms::{preview_cmd, save_term};
use crate::commands::Cmd;
use crate::editable::SlotInput;
use crate::messages::{FocusMsg, SlotId};
use crate::model::FilterModel;

/// Handle focus messages
pub fn update_focus(model: &mut FilterModel, msg: FocusMsg) -> Option<Cmd> {
    match msg {
        FocusMsg::Forward => some(focus_forward(model)),
        FocusMsg::Backward => some(focus_backward(model)),
        FocusMsg::Focused(slot) => some(focused(model, slot)),
    }
}

/// Request focus for the slot after the focused one
///
/// From the last term that is the trailing input; from the trailing input it
/// wraps to the first term.
pub(crate) fn focus_forward(model: &FilterModel) -> Cmd {
    let target = match model.focus {
        SlotId::Term(index) if index + 1 < model.terms.len() => SlotId::Term(index + 1),
        SlotId::Term(_) => SlotId::Input,
        SlotId::Input if model.has_terms() => SlotId::Term(0),
        SlotId::Input => return Cmd::None,
    };
    Cmd::Focus(target)
}

/// Request focus for the slot before the focused one
///
/// From the first term that is the trailing input; from the trailing input it
/// goes to the last term.
pub(crate) fn focus_backward(model: &FilterModel) -> Cmd {
    let target = match model.focus {
        SlotId::Term(0) => SlotId::Input,
        SlotId::Term(index) => SlotId::Term(index - 1),
        SlotId::Input => match model.terms.len() {
            0 => return Cmd::None,
            len => SlotId::Term(len - 1),
        },
    };
    Cmd::Focus(target)
}

/// The surface moved focus to `slot`
fn focused(model: &mut FilterModel, slot: SlotId) -> Cmd {
    if slot == model.focus {
        return Cmd::None;
    }
    if let SlotId::Term(index) = slot {
        if index >= model.terms.len() {
            return Cmd::None;
        }
    }

    let mut cmds = Vec::new();
    if let SlotId::Term(left) = model.focus {
        let (saved, cmd) = save_term(model, left);
        cmds.push(cmd);
        if !saved {
            warn!(index = left, "invalid term keeps focus");
            cmds.push(Cmd::Focus(model.focus));
            return Cmd::batch(cmds);
        }
    }

    debug!(from = ?model.focus, to = ?slot, "focus moved");
    model.focus = slot;
    model.validity = None;
    model.draft = slot
        .term_index()
        .and_then(|index| model.terms.get(index))
        .map(|term| SlotInput::from_text(&term.label));

    if slot == SlotId::Input {
        model.previewed = model.grammar.preview_for(model.term_type);
        cmds.push(preview_cmd(model));
    }

    Cmd::batch(cmds)
}
