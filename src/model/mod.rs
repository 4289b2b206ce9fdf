//! Editor model - the complete state of one term editor
//!
//! This module contains the state types following the Elm Architecture pattern.
//! The committed terms live in a [`TermSequence`]; everything else on
//! [`FilterModel`] is transient editing state derived from or layered on top
//! of it.

pub mod sequence;
pub mod term;

pub use sequence::{join_search, TermSequence};
pub use term::{Term, TermType};

use std::collections::BTreeSet;
use std::fmt;

use crate::config::EditorConfig;
use crate::editable::SlotInput;
use crate::filter::Filter;
use crate::grammar::{FilterGrammar, PlainGrammar, SlotContext, TermGrammar};
use crate::messages::SlotId;
use crate::surface::SlotMeta;
use crate::transcode::tree_to_terms;

/// A restore payload that cannot be turned into committed terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// A filter term without a type
    MissingType { index: usize },
    /// Pre-rendered slots are not numbered `0..n` in order
    IndexMismatch { expected: usize, found: usize },
    /// A JSON term array that does not parse
    InvalidJson(String),
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::MissingType { index } => {
                write!(f, "Term at index {} has no type", index)
            }
            RestoreError::IndexMismatch { expected, found } => {
                write!(
                    f,
                    "Slot index mismatch: expected {} but found {}",
                    expected, found
                )
            }
            RestoreError::InvalidJson(msg) => write!(f, "Invalid term JSON: {}", msg),
        }
    }
}

impl std::error::Error for RestoreError {}

/// The complete state of a term editor
#[derive(Debug)]
pub struct FilterModel {
    /// Editor configuration
    pub config: EditorConfig,
    /// Strategy deciding types, continuations and validity
    pub grammar: Box<dyn TermGrammar>,
    /// Committed terms and their serialized string
    pub terms: TermSequence,
    /// Type expected for the next committed term
    pub term_type: Option<TermType>,
    /// The trailing input
    pub input: SlotInput,
    /// Slot that currently has focus
    pub focus: SlotId,
    /// Edited text of the focused term slot, if one is focused
    pub draft: Option<SlotInput>,
    /// Suggestion shown after the trailing input
    pub previewed: Option<Term>,
    /// The suggestion most recently written into a slot
    pub last_completed: Option<Term>,
    /// Indices of selected terms
    pub selected: BTreeSet<usize>,
    /// Validation message of the focused slot
    pub validity: Option<String>,
    /// Whether the surface currently marks the input as required
    pub required: bool,
}

impl FilterModel {
    /// Create an empty editor using `grammar`
    pub fn new(config: EditorConfig, grammar: Box<dyn TermGrammar>) -> Self {
        let terms = TermSequence::new(config.separator.clone());
        let mut model = Self {
            config,
            grammar,
            terms,
            term_type: None,
            input: SlotInput::new(),
            focus: SlotId::Input,
            draft: None,
            previewed: None,
            last_completed: None,
            selected: BTreeSet::new(),
            validity: None,
            required: false,
        };
        model.recompute_position();
        model
    }

    /// An empty filter expression editor
    pub fn filter(config: EditorConfig) -> Self {
        Self::new(config, Box::new(FilterGrammar::new()))
    }

    /// An empty editor for untyped free-text terms
    pub fn plain(config: EditorConfig) -> Self {
        Self::new(config, Box::new(PlainGrammar))
    }

    /// Create an editor holding already committed terms
    pub fn from_terms(
        config: EditorConfig,
        grammar: Box<dyn TermGrammar>,
        terms: Vec<Term>,
    ) -> Result<Self, RestoreError> {
        let mut model = Self::new(config, grammar);
        model.check_restorable(&terms)?;
        model.restore(terms);
        Ok(model)
    }

    /// Create a filter editor from a filter tree
    pub fn from_filter(config: EditorConfig, filter: &Filter) -> Self {
        let mut model = Self::filter(config);
        model.restore(tree_to_terms(filter));
        model
    }

    /// The serialized search string
    pub fn serialized(&self) -> &str {
        self.terms.serialized()
    }

    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Type expected after `last`, or the initial type for an empty sequence
    pub fn expected_after(&self, last: Option<&Term>) -> Option<TermType> {
        match last {
            Some(term) => self.grammar.next_type(term),
            None => self.grammar.initial_type(),
        }
    }

    /// Re-derive the expected type and preview from the last committed term
    pub fn recompute_position(&mut self) {
        self.term_type = self.expected_after(self.terms.last());
        self.previewed = self.grammar.preview_for(self.term_type);
    }

    /// Type of the term a slot holds (or will hold, for the trailing input)
    pub fn slot_type(&self, slot: SlotId) -> Option<TermType> {
        match slot {
            SlotId::Input => self.term_type,
            SlotId::Term(index) => self.terms.get(index).and_then(|t| t.term_type),
        }
    }

    /// Grammar context of a slot
    pub fn slot_context(&self, slot: SlotId) -> SlotContext<'_> {
        let preceding = match slot {
            SlotId::Input => self.terms.last(),
            SlotId::Term(index) => index.checked_sub(1).and_then(|i| self.terms.get(i)),
        };
        SlotContext {
            pending: self.input.text(),
            preceding,
        }
    }

    /// Current text of a slot: the trailing input, a focused draft, or the committed label
    pub fn slot_text(&self, slot: SlotId) -> &str {
        match slot {
            SlotId::Input => self.input.text(),
            SlotId::Term(index) => match &self.draft {
                Some(draft) if self.focus == slot => draft.text(),
                _ => self.terms.get(index).map_or("", |t| t.label.as_str()),
            },
        }
    }

    /// Placeholder text for the trailing input
    pub fn placeholder(&self) -> &str {
        if self.has_terms() {
            ""
        } else {
            self.config.placeholder.as_deref().unwrap_or("")
        }
    }

    /// Fail if `terms` cannot be committed as they are
    pub fn check_restorable(&self, terms: &[Term]) -> Result<(), RestoreError> {
        if !self.grammar.requires_types() {
            return Ok(());
        }
        match terms.iter().position(|t| t.term_type.is_none()) {
            Some(index) => Err(RestoreError::MissingType { index }),
            None => Ok(()),
        }
    }

    /// Fail unless pre-rendered slots are numbered `0..n` in order
    pub fn check_slots(&self, slots: &[SlotMeta]) -> Result<(), RestoreError> {
        for (expected, slot) in slots.iter().enumerate() {
            if slot.index != expected {
                return Err(RestoreError::IndexMismatch {
                    expected,
                    found: slot.index,
                });
            }
        }
        Ok(())
    }

    /// Replace all committed terms, dropping transient editing state
    pub fn restore(&mut self, terms: Vec<Term>) {
        self.terms = TermSequence::with_terms(self.config.separator.clone(), terms);
        self.input.clear();
        self.focus = SlotId::Input;
        self.draft = None;
        self.last_completed = None;
        self.selected.clear();
        self.validity = None;
        self.recompute_position();
    }

    /// Clear everything back to the initial state
    pub fn reset(&mut self) {
        self.restore(Vec::new());
    }
}
