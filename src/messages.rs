//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::collections::BTreeMap;

use crate::filter::Filter;
use crate::model::term::Term;
use crate::surface::SlotMeta;

/// Direction for cursor movement and preview cycling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An editable slot: the trailing input or a committed term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotId {
    /// The trailing input where new terms are typed
    #[default]
    Input,
    /// The rendered input of the committed term at this index
    Term(usize),
}

impl SlotId {
    pub fn term_index(self) -> Option<usize> {
        match self {
            SlotId::Input => None,
            SlotId::Term(index) => Some(index),
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, SlotId::Input)
    }
}

/// Payload delivered by a completer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// A bare value, used as both label and search
    Plain(String),
    /// Structured data with `term` prefixed keys (`termLabel`, `termSearch`, ...)
    Data(BTreeMap<String, String>),
}

impl Suggestion {
    pub fn to_term(&self) -> Term {
        match self {
            Suggestion::Plain(value) => Term::plain(value.as_str()),
            Suggestion::Data(data) => Term::from_data(data),
        }
    }
}

impl From<&str> for Suggestion {
    fn from(value: &str) -> Self {
        Suggestion::Plain(value.to_string())
    }
}

impl From<Term> for Suggestion {
    fn from(term: Term) -> Self {
        Suggestion::Data(term.to_data())
    }
}

/// Source of terms to restore an editor from
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPayload {
    /// Slots the surface already rendered
    Slots(Vec<SlotMeta>),
    /// A JSON array of terms
    Json(String),
    /// A filter tree
    Tree(Filter),
    /// Terms in memory
    Terms(Vec<Term>),
}

/// Editing messages for the focused slot
#[derive(Debug, Clone, PartialEq)]
pub enum InputMsg {
    /// Insert a typed character
    InsertChar(char),
    /// Insert pasted text, character by character
    InsertText(String),
    /// Backspace
    DeleteBackward,
    /// Delete key
    DeleteForward,
    /// Move the cursor, or leave the slot at its edge
    MoveCursor(Direction),
    /// Home key
    MoveCursorStart,
    /// End key
    MoveCursorEnd,
    /// Space: commit the preview on an empty input, otherwise a literal space
    ConfirmPreview,
    /// Tab: commit the preview
    CommitPreview,
    /// Step the preview through its operator group (Up = previous, Down = next)
    CyclePreview(Direction),
    /// Commit the trailing input as a new term
    Exchange,
}

/// Term sequence messages
#[derive(Debug, Clone, PartialEq)]
pub enum TermsMsg {
    /// Remove the last committed term
    RemoveLast,
    /// Remove the term at this index
    Remove(usize),
    /// Remove all selected terms
    ClearSelected,
    /// Save the edited draft of the term at this index (Enter)
    Save(usize),
    SelectAll,
    Deselect,
    ToggleSelection(usize),
}

/// Focus navigation messages
#[derive(Debug, Clone, PartialEq)]
pub enum FocusMsg {
    Forward,
    Backward,
    /// The surface moved focus to this slot
    Focused(SlotId),
}

/// Messages from an attached completer
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionMsg {
    /// A suggestion was highlighted; it is written into the slot but not committed
    Suggestion { slot: SlotId, data: Suggestion },
    /// A suggestion was chosen; the trailing input commits it right away
    Completion { slot: SlotId, data: Suggestion },
}

/// Editor lifecycle messages
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMsg {
    /// Restore terms from a payload
    Load(LoadPayload),
    /// Re-render all committed terms (the surface was replaced)
    Refresh,
    /// Clear everything back to the initial state
    Reset,
    /// Commit pending input and hand off the serialized string
    Submit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Slot editing (typing, deleting, previews)
    Input(InputMsg),
    /// Term sequence edits and selection
    Terms(TermsMsg),
    /// Focus navigation
    Focus(FocusMsg),
    /// Completer events
    Completion(CompletionMsg),
    /// Lifecycle (load, refresh, reset, submit)
    Editor(EditorMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn insert_char(ch: char) -> Self {
        Msg::Input(InputMsg::InsertChar(ch))
    }

    pub fn insert_text(text: impl Into<String>) -> Self {
        Msg::Input(InputMsg::InsertText(text.into()))
    }

    pub fn move_cursor(direction: Direction) -> Self {
        Msg::Input(InputMsg::MoveCursor(direction))
    }

    pub fn exchange() -> Self {
        Msg::Input(InputMsg::Exchange)
    }

    pub fn focused(slot: SlotId) -> Self {
        Msg::Focus(FocusMsg::Focused(slot))
    }

    pub fn complete(slot: SlotId, data: impl Into<Suggestion>) -> Self {
        Msg::Completion(CompletionMsg::Completion {
            slot,
            data: data.into(),
        })
    }

    pub fn load(payload: LoadPayload) -> Self {
        Msg::Editor(EditorMsg::Load(payload))
    }

    pub fn submit() -> Self {
        Msg::Editor(EditorMsg::Submit)
    }
}
