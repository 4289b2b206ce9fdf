//! Plain grammar: free-text terms without types

use super::{Continuations, SlotContext, TermGrammar};
use crate::model::term::{Term, TermType};

/// A generic term list (tags, keywords); every input is accepted verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainGrammar;

impl TermGrammar for PlainGrammar {
    fn initial_type(&self) -> Option<TermType> {
        None
    }

    fn next_type(&self, _term: &Term) -> Option<TermType> {
        None
    }

    fn continuations(
        &self,
        _typed: &str,
        _expected: Option<TermType>,
        _ctx: SlotContext<'_>,
    ) -> Continuations {
        Continuations::default()
    }
}
