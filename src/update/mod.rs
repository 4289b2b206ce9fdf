//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod completion;
mod editor;
mod focus;
mod input;
mod terms;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::FilterModel;

#[cfg(debug_assertions)]
use crate::tracing::TermSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use completion::{completion_request, update_completion};
pub use editor::{try_load, update_editor};
pub use focus::update_focus;
pub use input::update_input;
pub use terms::update_terms;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut FilterModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut FilterModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Input(m) => input::update_input(model, m),
        Msg::Terms(m) => terms::update_terms(model, m),
        Msg::Focus(m) => focus::update_focus(model, m),
        Msg::Completion(m) => completion::update_completion(model, m),
        Msg::Editor(m) => editor::update_editor(model, m),
    }
}

/// `Some(cmd)` unless there is nothing to do
pub(crate) fn some(cmd: Cmd) -> Option<Cmd> {
    if cmd.is_none() {
        None
    } else {
        Some(cmd)
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after editor state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut FilterModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = TermSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = TermSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "terms", %diff, "state changed");
    }

    debug_assert_eq!(
        model.serialized(),
        model.terms.serialize(),
        "serialized string out of sync after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Input::InsertChar('x')`
/// - `Terms::Remove(2)`
/// - `Focus::Focused(Term(0))`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Input(m) => format!("Input::{:?}", m),
        Msg::Terms(m) => format!("Terms::{:?}", m),
        Msg::Focus(m) => format!("Focus::{:?}", m),
        Msg::Completion(m) => format!("Completion::{:?}", m),
        Msg::Editor(m) => format!("Editor::{:?}", m),
    }
}
