//! Command enum representing all executable editor actions
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to one or more `Msg` values for the Elm-style update loop.

use crate::messages::{Direction, EditorMsg, FocusMsg, InputMsg, Msg, SlotId, TermsMsg};

/// All editor commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Cursor Movement
    // ========================================================================
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorStart,
    MoveCursorEnd,
    FocusForward,
    FocusBackward,

    // ========================================================================
    // Editing
    // ========================================================================
    DeleteBackward,
    DeleteForward,
    /// Space: commit the preview on an empty input
    ConfirmPreview,
    /// Tab: commit the preview
    CommitPreview,
    PreviousPreview,
    NextPreview,
    /// Commit the trailing input as a term
    ExchangeTerm,
    /// Save the focused term slot
    SaveTerm,

    // ========================================================================
    // Term Selection
    // ========================================================================
    SelectAllTerms,
    DeselectTerms,
    ClearSelectedTerms,
    RemoveLastTerm,

    // ========================================================================
    // Editor
    // ========================================================================
    Submit,
    Reset,

    /// Removes a default binding in a user keymap
    Unbound,
}

impl Command {
    /// Every command, in declaration order
    pub const ALL: [Command; 21] = [
        Command::MoveCursorLeft,
        Command::MoveCursorRight,
        Command::MoveCursorStart,
        Command::MoveCursorEnd,
        Command::FocusForward,
        Command::FocusBackward,
        Command::DeleteBackward,
        Command::DeleteForward,
        Command::ConfirmPreview,
        Command::CommitPreview,
        Command::PreviousPreview,
        Command::NextPreview,
        Command::ExchangeTerm,
        Command::SaveTerm,
        Command::SelectAllTerms,
        Command::DeselectTerms,
        Command::ClearSelectedTerms,
        Command::RemoveLastTerm,
        Command::Submit,
        Command::Reset,
        Command::Unbound,
    ];

    /// Convert this command to the messages it dispatches
    ///
    /// `focus` is the slot the keystroke was typed into.
    pub fn to_msgs(self, focus: SlotId) -> Vec<Msg> {
        use Command::*;

        match self {
            MoveCursorLeft => vec![Msg::move_cursor(Direction::Left)],
            MoveCursorRight => vec![Msg::move_cursor(Direction::Right)],
            MoveCursorStart => vec![Msg::Input(InputMsg::MoveCursorStart)],
            MoveCursorEnd => vec![Msg::Input(InputMsg::MoveCursorEnd)],
            FocusForward => vec![Msg::Focus(FocusMsg::Forward)],
            FocusBackward => vec![Msg::Focus(FocusMsg::Backward)],

            DeleteBackward => vec![Msg::Input(InputMsg::DeleteBackward)],
            DeleteForward => vec![Msg::Input(InputMsg::DeleteForward)],
            ConfirmPreview => vec![Msg::Input(InputMsg::ConfirmPreview)],
            CommitPreview => vec![Msg::Input(InputMsg::CommitPreview)],
            PreviousPreview => vec![Msg::Input(InputMsg::CyclePreview(Direction::Up))],
            NextPreview => vec![Msg::Input(InputMsg::CyclePreview(Direction::Down))],
            ExchangeTerm => vec![Msg::exchange()],
            SaveTerm => match focus {
                SlotId::Term(index) => vec![Msg::Terms(TermsMsg::Save(index))],
                SlotId::Input => vec![],
            },

            SelectAllTerms => vec![Msg::Terms(TermsMsg::SelectAll)],
            DeselectTerms => vec![Msg::Terms(TermsMsg::Deselect)],
            ClearSelectedTerms => vec![Msg::Terms(TermsMsg::ClearSelected)],
            RemoveLastTerm => vec![Msg::Terms(TermsMsg::RemoveLast)],

            Submit => vec![Msg::submit()],
            Reset => vec![Msg::Editor(EditorMsg::Reset)],

            Unbound => vec![],
        }
    }

    /// Get a display name for this command
    pub fn display_name(self) -> &'static str {
        use Command::*;

        match self {
            MoveCursorLeft => "Move Cursor Left",
            MoveCursorRight => "Move Cursor Right",
            MoveCursorStart => "Move to Start",
            MoveCursorEnd => "Move to End",
            FocusForward => "Focus Next Slot",
            FocusBackward => "Focus Previous Slot",

            DeleteBackward => "Delete Backward",
            DeleteForward => "Delete Forward",
            ConfirmPreview => "Confirm Preview",
            CommitPreview => "Commit Preview",
            PreviousPreview => "Previous Preview",
            NextPreview => "Next Preview",
            ExchangeTerm => "Commit Input",
            SaveTerm => "Save Term",

            SelectAllTerms => "Select All Terms",
            DeselectTerms => "Deselect Terms",
            ClearSelectedTerms => "Remove Selected Terms",
            RemoveLastTerm => "Remove Last Term",

            Submit => "Submit",
            Reset => "Reset",
            Unbound => "Unbound",
        }
    }
}

/// Parses the variant name used in keymap files, e.g. `CommitPreview`
impl std::str::FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| format!("{:?}", command) == s)
            .ok_or(())
    }
}
