//! Term grammars
//!
//! A grammar decides which term type is expected next, which tokens may
//! legally continue a slot and how a committed term's search text is prepared.
//! The editor holds one grammar, chosen at construction:
//!
//! - [`FilterGrammar`]: typed `column operator value` conditions joined by
//!   logical operators, with grouping
//! - [`PlainGrammar`]: an untyped list of free-text terms

mod filter;
mod plain;

pub use filter::{escape_expression, FilterGrammar};
pub use plain::PlainGrammar;

use std::fmt::Debug;

use crate::model::term::{Term, TermType};

/// What surrounds the slot continuations are computed for
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotContext<'a> {
    /// Current text of the trailing input
    pub pending: &'a str,
    /// The committed term right before the slot (the last term for the trailing input)
    pub preceding: Option<&'a Term>,
}

/// Candidate tokens that may continue a slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Continuations {
    pub terms: Vec<Term>,
    /// The typed value is a strict prefix of at least one candidate
    pub partial: bool,
}

impl Continuations {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The single candidate whose label equals `value`, if that is all there is
    pub fn exact(&self, value: &str) -> Option<&Term> {
        match self.terms.as_slice() {
            [only] if only.label == value => Some(only),
            _ => None,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.label.as_str()).collect()
    }
}

/// Outcome of validating a slot's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid { message: String },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validity::Valid => None,
            Validity::Invalid { message } => Some(message),
        }
    }
}

/// Strategy consulted by the editor state machine
pub trait TermGrammar: Debug {
    /// Type expected when no term has been committed yet
    fn initial_type(&self) -> Option<TermType>;

    /// Type expected after `term`
    fn next_type(&self, term: &Term) -> Option<TermType>;

    /// Tokens that may follow in a slot expecting `expected`
    fn continuations(
        &self,
        typed: &str,
        expected: Option<TermType>,
        ctx: SlotContext<'_>,
    ) -> Continuations;

    /// Whether restored terms must carry a type
    fn requires_types(&self) -> bool {
        false
    }

    /// Validate `value` typed into a slot of type `term_type`
    ///
    /// `template` is the configured message with one `%s` placeholder.
    fn check_validity(
        &self,
        value: &str,
        term_type: Option<TermType>,
        ctx: SlotContext<'_>,
        template: &str,
    ) -> Validity {
        let _ = (value, term_type, ctx, template);
        Validity::Valid
    }

    /// Deterministic suggestion shown after the input for `expected`
    fn preview_for(&self, expected: Option<TermType>) -> Option<Term> {
        let _ = expected;
        None
    }

    /// Step the displayed preview to the next (or previous) token of its group
    fn cycle_preview(&self, current: &Term, forward: bool) -> Option<Term> {
        let _ = (current, forward);
        None
    }

    /// Adjust a term's search text before it is committed
    fn prepare_search(&self, term: &mut Term) {
        let _ = term;
    }
}

/// Substitute the candidate labels into the `%s` placeholder of `template`
pub fn choose_message(template: &str, candidates: &Continuations) -> String {
    template.replacen("%s", &candidates.labels().join(", "), 1)
}
