//! Context system for conditional keybindings
//!
//! Enables bindings that only activate under certain conditions,
//! such as "Tab commits the preview while the trailing input has focus".

use crate::model::FilterModel;

/// Context extracted from the editor model for keybinding evaluation
#[derive(Debug, Clone, Default)]
pub struct KeyContext {
    /// Whether the trailing input (not a term slot) has focus
    pub trailing_input: bool,
    /// Whether the focused slot holds no text
    pub input_empty: bool,
    /// Whether a preview is shown after the trailing input
    pub has_preview: bool,
    /// Whether any term is committed
    pub has_terms: bool,
}

impl KeyContext {
    pub fn from_model(model: &FilterModel) -> Self {
        Self {
            trailing_input: model.focus.is_input(),
            input_empty: model.slot_text(model.focus).is_empty(),
            has_preview: model.previewed.is_some(),
            has_terms: model.has_terms(),
        }
    }
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    TrailingInput,
    TermSlot,
    InputEmpty,
    HasPreview,
    HasTerms,
}

impl Condition {
    /// Accepted spellings in keymap files, canonical form first
    const NAMES: [(Condition, &'static [&'static str]); 5] = [
        (Condition::TrailingInput, &["trailing_input", "input"]),
        (Condition::TermSlot, &["term_slot", "term"]),
        (Condition::InputEmpty, &["input_empty", "empty"]),
        (Condition::HasPreview, &["has_preview", "preview"]),
        (Condition::HasTerms, &["has_terms", "terms"]),
    ];

    /// Parse a `when:` entry; case and underscores are ignored
    pub fn from_name(name: &str) -> Option<Condition> {
        let wanted: String = name
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::NAMES.iter().find_map(|(cond, spellings)| {
            spellings
                .iter()
                .any(|s| s.replace('_', "") == wanted)
                .then_some(*cond)
        })
    }

    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::TrailingInput => ctx.trailing_input,
            Condition::TermSlot => !ctx.trailing_input,
            Condition::InputEmpty => ctx.input_empty,
            Condition::HasPreview => ctx.has_preview,
            Condition::HasTerms => ctx.has_terms,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
