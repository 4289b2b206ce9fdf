//! Term sequence - the ordered, index-stable list of committed terms
//!
//! Owns the terms of one editor and the serialized search string derived from
//! them. Every mutation recomputes the string synchronously.

use super::term::Term;

/// Ordered list of committed terms plus their serialized form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSequence {
    terms: Vec<Term>,
    separator: String,
    serialized: String,
}

impl TermSequence {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            terms: Vec::new(),
            separator: separator.into(),
            serialized: String::new(),
        }
    }

    /// Build a sequence from already committed terms
    pub fn with_terms(separator: impl Into<String>, terms: Vec<Term>) -> Self {
        let mut sequence = Self::new(separator);
        sequence.terms = terms;
        sequence.reserialize();
        sequence
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    /// The final term, `None` when the sequence is empty
    pub fn last(&self) -> Option<&Term> {
        self.terms.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    pub fn as_slice(&self) -> &[Term] {
        &self.terms
    }

    /// The serialized search string (cached)
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// Join all search values with the separator, trimmed
    pub fn serialize(&self) -> String {
        join_search(&self.terms, &self.separator)
    }

    /// Append a term, or overwrite the term at `at`
    ///
    /// An index at or past the end appends. Returns the index the term ended up at.
    pub fn insert(&mut self, term: Term, at: Option<usize>) -> usize {
        let index = match at {
            Some(index) if index < self.terms.len() => {
                self.terms[index] = term;
                index
            }
            _ => {
                self.terms.push(term);
                self.terms.len() - 1
            }
        };

        self.reserialize();
        index
    }

    /// Remove the term at `index`, shifting all following terms down by one
    ///
    /// Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Term> {
        if index >= self.terms.len() {
            return None;
        }

        let removed = self.terms.remove(index);
        self.reserialize();
        Some(removed)
    }

    /// Replace the term at `index` if its label differs from the current one
    ///
    /// Returns whether anything changed.
    pub fn replace_at(&mut self, index: usize, term: Term) -> bool {
        let Some(current) = self.terms.get_mut(index) else {
            return false;
        };
        if current.label == term.label {
            return false;
        }

        *current = term;
        self.reserialize();
        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
        self.serialized.clear();
    }

    fn reserialize(&mut self) {
        self.serialized = self.serialize();
    }
}

impl<'a> IntoIterator for &'a TermSequence {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Join the search values of `terms` with `separator`, trimmed
pub fn join_search(terms: &[Term], separator: &str) -> String {
    terms
        .iter()
        .map(|t| t.search.as_str())
        .collect::<Vec<_>>()
        .join(separator)
        .trim()
        .to_string()
}
