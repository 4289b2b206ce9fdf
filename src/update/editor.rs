//! Editor lifecycle: restoring, refreshing, resetting and submitting.

use tracing::{debug, error};

use super::some;
use super::terms::{exchange_term, placeholder_cmd, preview_cmd};
use crate::commands::Cmd;
use crate::messages::{EditorMsg, LoadPayload, SlotId};
use crate::model::{FilterModel, RestoreError, Term};
use crate::transcode::tree_to_terms;

/// Handle editor lifecycle messages
pub fn update_editor(model: &mut FilterModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::Load(payload) => match try_load(model, payload) {
            Ok(cmd) => cmd,
            Err(e) => {
                error!("Failed to restore terms: {}", e);
                None
            }
        },
        EditorMsg::Refresh => {
            let terms: Vec<Term> = model.terms.iter().cloned().collect();
            model.restore(terms);
            let rendered = model
                .terms
                .iter()
                .enumerate()
                .map(|(index, term)| Cmd::RenderTerm {
                    index,
                    term: term.clone(),
                })
                .collect();
            some(Cmd::batch(vec![
                Cmd::batch(rendered),
                settled(model),
            ]))
        }
        EditorMsg::Reset => {
            let removed = remove_all_slots(model);
            model.reset();
            debug!("editor reset");
            some(Cmd::batch(vec![removed, settled(model)]))
        }
        EditorMsg::Submit => {
            let mut cmds = vec![exchange_term(model), placeholder_cmd(model)];
            if model.config.manage_required {
                model.required = !model.has_terms();
                cmds.push(Cmd::SetRequired(model.required));
            }
            cmds.push(Cmd::Submit {
                value: model.serialized().to_string(),
            });
            some(Cmd::batch(cmds))
        }
    }
}

/// Restore the committed terms from `payload`
///
/// Pre-rendered slots are adopted as they are; every other source replaces
/// the rendered slots. A malformed payload leaves the model untouched.
pub fn try_load(model: &mut FilterModel, payload: LoadPayload) -> Result<Option<Cmd>, RestoreError> {
    let (terms, prerendered) = match payload {
        LoadPayload::Slots(slots) => {
            model.check_slots(&slots)?;
            (slots.iter().map(|s| s.to_term()).collect::<Vec<_>>(), true)
        }
        LoadPayload::Json(json) => {
            let terms: Vec<Term> = serde_json::from_str(&json)
                .map_err(|e| RestoreError::InvalidJson(e.to_string()))?;
            (terms, false)
        }
        LoadPayload::Tree(filter) => (tree_to_terms(&filter), false),
        LoadPayload::Terms(terms) => (terms, false),
    };
    model.check_restorable(&terms)?;

    let removed = if prerendered {
        Cmd::None
    } else {
        remove_all_slots(model)
    };

    model.restore(terms);
    debug!(count = model.terms.len(), serialized = model.serialized(), "terms restored");

    let rendered = if prerendered {
        Cmd::None
    } else {
        Cmd::batch(
            model
                .terms
                .iter()
                .enumerate()
                .map(|(index, term)| Cmd::RenderTerm {
                    index,
                    term: term.clone(),
                })
                .collect(),
        )
    };

    Ok(some(Cmd::batch(vec![removed, rendered, settled(model)])))
}

/// Remove every rendered term slot, last first
fn remove_all_slots(model: &FilterModel) -> Cmd {
    Cmd::batch((0..model.terms.len()).rev().map(Cmd::RemoveSlot).collect())
}

/// Commands that bring the surface in line after the whole sequence changed
fn settled(model: &FilterModel) -> Cmd {
    Cmd::batch(vec![
        Cmd::WriteValue {
            slot: SlotId::Input,
            value: String::new(),
        },
        Cmd::SyncValue(model.serialized().to_string()),
        preview_cmd(model),
        placeholder_cmd(model),
    ])
}
