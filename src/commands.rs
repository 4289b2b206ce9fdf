//! Command types for the Elm-style architecture
//!
//! Commands represent side effects on the surface that should be performed
//! after an update. Most apply immediately; focus changes, validity reports and
//! completer notifications are deferred to the runtime's next turn.

use serde::Serialize;

use crate::messages::SlotId;
use crate::model::term::{Term, TermType};

/// Context sent to a completer when a slot's value changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    /// Current (untrimmed) text of the slot, empty for a fresh request
    pub label: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub term_type: Option<TermType>,
    /// Index of the edited term, `None` for the trailing input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_index: Option<usize>,
    /// Search of the column the slot belongs to (operator and value slots)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Search of the operator the slot belongs to (value slots)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Notifications for listeners of the editor (typically a completer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Suggest continuations for a slot
    Complete(CompletionRequest),
    /// A term was committed; drop any open suggestions
    ResetCompletion,
    /// The last term was removed; cancel pending suggestion lookups
    AbortCompletion,
}

impl EditorEvent {
    /// Name listeners subscribe with
    pub fn name(&self) -> &'static str {
        match self {
            EditorEvent::Complete(_) => "complete",
            EditorEvent::ResetCompletion => "reset",
            EditorEvent::AbortCompletion => "abort",
        }
    }
}

/// Side effects emitted by `update`
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Render a slot for a committed term (appends, or replaces the slot at `index`)
    RenderTerm { index: usize, term: Term },
    /// Update the metadata of an existing term slot
    UpdateTerm { index: usize, term: Term },
    /// Remove the slot of the term at `index`; following slots shift down
    RemoveSlot(usize),
    /// Write text into a slot
    WriteValue { slot: SlotId, value: String },
    /// Write the serialized search string to the value sink
    SyncValue(String),
    /// Show (or hide) the preview after the trailing input
    RenderPreview(Option<String>),
    SetPlaceholder(String),
    SetRequired(bool),
    SetSelected { index: usize, selected: bool },
    /// Set or clear the validation message of a slot
    SetValidity {
        slot: SlotId,
        message: Option<String>,
    },
    /// Surface the validation message of a slot to the user (deferred)
    ReportValidity(SlotId),
    /// Move focus to a slot (deferred)
    Focus(SlotId),
    /// Notify editor listeners (deferred)
    Notify(EditorEvent),
    /// Hand off the serialized search string
    Submit { value: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening nested batches and dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut flat = Vec::with_capacity(cmds.len());
        for cmd in cmds {
            match cmd {
                Cmd::None => {}
                Cmd::Batch(inner) => flat.extend(inner.into_iter().flat_map(Cmd::flatten)),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Cmd::None,
            1 => flat.pop().unwrap_or_default(),
            _ => Cmd::Batch(flat),
        }
    }

    /// Whether the runtime runs this command on its next turn instead of immediately
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            Cmd::Focus(_) | Cmd::Notify(_) | Cmd::ReportValidity(_)
        )
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Iterate leaf commands, descending into batches
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_flattens_and_drops_none() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::Batch(vec![Cmd::SyncValue("a".into()), Cmd::None]),
            Cmd::RenderPreview(None),
        ]);
        assert_eq!(
            cmd,
            Cmd::Batch(vec![Cmd::SyncValue("a".into()), Cmd::RenderPreview(None)])
        );
        assert_eq!(Cmd::batch(vec![Cmd::None]), Cmd::None);
        assert_eq!(
            Cmd::batch(vec![Cmd::SetRequired(true)]),
            Cmd::SetRequired(true)
        );
    }

    #[test]
    fn test_deferred_commands() {
        assert!(Cmd::Focus(SlotId::Input).is_deferred());
        assert!(Cmd::Notify(EditorEvent::ResetCompletion).is_deferred());
        assert!(Cmd::ReportValidity(SlotId::Term(0)).is_deferred());
        assert!(!Cmd::SyncValue(String::new()).is_deferred());
    }

    #[test]
    fn test_completion_request_json() {
        let request = CompletionRequest {
            label: "web".into(),
            term_type: Some(TermType::Value),
            term_index: None,
            column: Some("host".into()),
            operator: Some("=".into()),
        };
        let json = serde_json::to_string(&EditorEvent::Complete(request)).unwrap();
        assert!(json.contains(r#""event":"complete""#));
        assert!(json.contains(r#""type":"value""#));
        assert!(!json.contains("term_index"));
    }
}
