//! Suggestion lists for completers
//!
//! A completer answers a [`CompletionRequest`](crate::commands::CompletionRequest)
//! with a bounded list of candidates plus an optional "search for" default
//! entry. Every entry converts to the structured [`Suggestion`] payload the
//! editor accepts back.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::filter::FilterChain;
use crate::messages::Suggestion;
use crate::model::{Term, TermType};
use crate::transcode::chain_to_terms;

/// Maximum number of entries in one list
pub const DEFAULT_LIMIT: usize = 50;

/// A raw candidate from a data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A bare value used as both search and label
    Plain(String),
    /// A search value with extra metadata; a `label` key overrides the label
    Meta {
        search: String,
        meta: BTreeMap<String, String>,
    },
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Candidate::Plain(value.to_string())
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Candidate::Plain(value)
    }
}

impl From<(String, BTreeMap<String, String>)> for Candidate {
    fn from((search, meta): (String, BTreeMap<String, String>)) -> Self {
        Candidate::Meta { search, meta }
    }
}

/// One entry of an assembled list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionEntry {
    pub search: String,
    pub label: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub term_type: Option<TermType>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl SuggestionEntry {
    fn from_candidate(candidate: Candidate, term_type: Option<TermType>) -> Self {
        match candidate {
            Candidate::Plain(value) => Self {
                search: value.clone(),
                label: value,
                term_type,
                meta: BTreeMap::new(),
            },
            Candidate::Meta { search, mut meta } => {
                let label = meta.remove("label").unwrap_or_else(|| search.clone());
                Self {
                    search,
                    label,
                    term_type,
                    meta,
                }
            }
        }
    }

    pub fn to_term(&self) -> Term {
        Term {
            label: self.label.clone(),
            search: self.search.clone(),
            class: self.meta.get("class").cloned(),
            term_type: self.term_type,
        }
    }

    /// The payload handed back to the editor when this entry is picked
    pub fn to_suggestion(&self) -> Suggestion {
        Suggestion::from(self.to_term())
    }
}

/// What the default entry searches for
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultKind {
    /// A single term; without a type the list's type applies
    Term(Option<TermType>),
    /// The search value matched against every column of a filter chain
    Terms(FilterChain),
}

/// The "search for" entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultSuggestion {
    pub search: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub term_type: Option<TermType>,
    /// Terms of a chain default, empty otherwise
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<Term>,
    /// Labels of the columns a chain default searches in
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl DefaultSuggestion {
    pub fn to_suggestion(&self) -> Suggestion {
        Suggestion::from(Term {
            label: self.search.clone(),
            search: self.search.clone(),
            class: None,
            term_type: self.term_type,
        })
    }
}

/// An assembled suggestion list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionList {
    pub entries: Vec<SuggestionEntry>,
    /// The source held more candidates than were listed
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultSuggestion>,
}

impl SuggestionList {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.default.is_none()
    }

    /// Payloads in display order, default first
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.default
            .iter()
            .map(DefaultSuggestion::to_suggestion)
            .chain(self.entries.iter().map(SuggestionEntry::to_suggestion))
            .collect()
    }
}

/// Builder for a [`SuggestionList`]
#[derive(Debug, Clone, Default)]
pub struct Suggestions {
    search_term: Option<String>,
    data: Vec<Candidate>,
    default: Option<(String, DefaultKind)>,
    term_type: Option<TermType>,
}

impl Suggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text the user typed
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Candidates; only one past the limit is ever read
    pub fn data<I>(mut self, data: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        self.data = data
            .into_iter()
            .take(DEFAULT_LIMIT + 1)
            .map(Into::into)
            .collect();
        self
    }

    pub fn default_entry(mut self, search: impl Into<String>, kind: DefaultKind) -> Self {
        self.default = Some((search.into(), kind));
        self
    }

    /// Type given to every entry
    pub fn term_type(mut self, term_type: TermType) -> Self {
        self.term_type = Some(term_type);
        self
    }

    pub fn assemble(self) -> SuggestionList {
        let has_more = self.data.len() > DEFAULT_LIMIT;
        let term_type = self.term_type;
        let entries: Vec<SuggestionEntry> = self
            .data
            .into_iter()
            .take(DEFAULT_LIMIT)
            .map(|candidate| SuggestionEntry::from_candidate(candidate, term_type))
            .collect();

        // An exact single hit makes the default redundant
        let show_default = match (self.search_term.as_deref(), entries.as_slice()) {
            (Some(term), [only]) if !term.is_empty() => only.label != term && only.search != term,
            _ => true,
        };

        let default = self
            .default
            .filter(|_| show_default)
            .map(|(search, kind)| match kind {
                DefaultKind::Term(own_type) => DefaultSuggestion {
                    search,
                    term_type: own_type.or(term_type),
                    terms: Vec::new(),
                    columns: Vec::new(),
                },
                DefaultKind::Terms(chain) => {
                    let terms = chain_to_terms(&chain);
                    let columns = terms
                        .iter()
                        .filter(|t| t.is_type(TermType::Column))
                        .map(|t| t.label.clone())
                        .collect();
                    DefaultSuggestion {
                        search,
                        term_type: None,
                        terms,
                        columns,
                    }
                }
            });

        trace!(
            entries = entries.len(),
            has_more,
            default = default.is_some(),
            "suggestions assembled"
        );

        SuggestionList {
            entries,
            has_more,
            default,
        }
    }
}
