//! Term types - the atomic editable unit of a filter expression
//!
//! A term is one typed token (`host`, `=`, `foo`, `&`, `(` ...) in the flat
//! representation the user edits.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The grammatical role of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermType {
    Column,
    Operator,
    Value,
    LogicalOperator,
    GroupingOperator,
}

impl TermType {
    /// Name as used in slot metadata and completion requests
    pub fn as_str(self) -> &'static str {
        match self {
            TermType::Column => "column",
            TermType::Operator => "operator",
            TermType::Value => "value",
            TermType::LogicalOperator => "logical_operator",
            TermType::GroupingOperator => "grouping_operator",
        }
    }

    /// Parse a metadata type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "column" => Some(TermType::Column),
            "operator" => Some(TermType::Operator),
            "value" => Some(TermType::Value),
            "logical_operator" => Some(TermType::LogicalOperator),
            "grouping_operator" => Some(TermType::GroupingOperator),
            _ => None,
        }
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const CLASS_GROUPING_OPEN: &str = "grouping_operator_open";
pub const CLASS_GROUPING_CLOSE: &str = "grouping_operator_close";
pub const CLASS_LOGICAL_OPERATOR: &str = "logical_operator";
pub const CLASS_OPERATOR: &str = "operator";

/// Key prefix used by structured suggestion payloads (`termLabel`, `termSearch`, ...)
const DATA_PREFIX: &str = "term";

/// One committed (or about to be committed) token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Display text
    pub label: String,
    /// Canonical text written into the serialized search string
    pub search: String,
    /// Rendering hint / sub-kind (e.g. grouping open vs close)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub term_type: Option<TermType>,
}

impl Term {
    /// An untyped term whose label and search are the same text
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            search: text,
            class: None,
            term_type: None,
        }
    }

    /// A typed term whose label and search are the same text
    pub fn typed(text: impl Into<String>, term_type: TermType) -> Self {
        Self {
            term_type: Some(term_type),
            ..Self::plain(text)
        }
    }

    fn token(text: &str, class: &str, term_type: TermType) -> Self {
        Self {
            label: text.to_string(),
            search: text.to_string(),
            class: Some(class.to_string()),
            term_type: Some(term_type),
        }
    }

    pub fn column(text: impl Into<String>) -> Self {
        Self::typed(text, TermType::Column)
    }

    pub fn value(text: impl Into<String>) -> Self {
        Self::typed(text, TermType::Value)
    }

    pub fn operator(sign: &str) -> Self {
        Self::token(sign, CLASS_OPERATOR, TermType::Operator)
    }

    pub fn logical(symbol: &str) -> Self {
        Self::token(symbol, CLASS_LOGICAL_OPERATOR, TermType::LogicalOperator)
    }

    pub fn grouping_open() -> Self {
        Self::token("(", CLASS_GROUPING_OPEN, TermType::GroupingOperator)
    }

    pub fn grouping_close() -> Self {
        Self::token(")", CLASS_GROUPING_CLOSE, TermType::GroupingOperator)
    }

    /// Set the label, keeping search as is (builder pattern)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn is_type(&self, term_type: TermType) -> bool {
        self.term_type == Some(term_type)
    }

    /// Whether this is an opening parenthesis
    ///
    /// Decided by class, falling back to the label for terms restored without one.
    pub fn is_grouping_open(&self) -> bool {
        self.is_type(TermType::GroupingOperator)
            && match self.class.as_deref() {
                Some(class) => class == CLASS_GROUPING_OPEN,
                None => self.label == "(",
            }
    }

    /// Build a term from a structured payload using the `term` key prefix
    ///
    /// `termLabel` becomes `label`, `termSearch` becomes `search` and so on.
    /// Keys without the prefix are ignored. A missing search falls back to the
    /// label and vice versa.
    pub fn from_data(data: &BTreeMap<String, String>) -> Self {
        let mut term = Term::plain(String::new());
        let mut has_label = false;
        let mut has_search = false;

        for (key, value) in data {
            let Some(name) = key.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            match lower_first(name).as_str() {
                "label" => {
                    term.label = value.clone();
                    has_label = true;
                }
                "search" => {
                    term.search = value.clone();
                    has_search = true;
                }
                "class" => term.class = Some(value.clone()),
                "type" => term.term_type = TermType::from_name(value),
                _ => {}
            }
        }

        if !has_search {
            term.search = term.label.clone();
        } else if !has_label {
            term.label = term.search.clone();
        }

        term
    }

    /// Inverse of [`Term::from_data`]
    pub fn to_data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        data.insert(format!("{DATA_PREFIX}Label"), self.label.clone());
        data.insert(format!("{DATA_PREFIX}Search"), self.search.clone());
        if let Some(class) = &self.class {
            data.insert(format!("{DATA_PREFIX}Class"), class.clone());
        }
        if let Some(term_type) = self.term_type {
            data.insert(format!("{DATA_PREFIX}Type"), term_type.as_str().to_string());
        }
        data
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Relational operators in declaration order; the first is the default preview
pub fn relational_operators() -> [Term; 6] {
    [
        Term::operator("="),
        Term::operator("!="),
        Term::operator(">"),
        Term::operator("<"),
        Term::operator(">="),
        Term::operator("<="),
    ]
}

/// Logical operators; the first is the default preview
pub fn logical_operators() -> [Term; 2] {
    [Term::logical("&"), Term::logical("|")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_type_names_roundtrip() {
        for ty in [
            TermType::Column,
            TermType::Operator,
            TermType::Value,
            TermType::LogicalOperator,
            TermType::GroupingOperator,
        ] {
            assert_eq!(TermType::from_name(ty.as_str()), Some(ty));
        }
        assert_eq!(TermType::from_name("bogus"), None);
    }

    #[test]
    fn test_grouping_open_detection() {
        assert!(Term::grouping_open().is_grouping_open());
        assert!(!Term::grouping_close().is_grouping_open());

        // Restored without class
        let mut open = Term::typed("(", TermType::GroupingOperator);
        assert!(open.is_grouping_open());
        open.label = ")".into();
        assert!(!open.is_grouping_open());
    }

    #[test]
    fn test_from_data_prefix_convention() {
        let mut data = BTreeMap::new();
        data.insert("termLabel".to_string(), "Host Name".to_string());
        data.insert("termSearch".to_string(), "host.name".to_string());
        data.insert("termType".to_string(), "column".to_string());
        data.insert("unrelated".to_string(), "ignored".to_string());

        let term = Term::from_data(&data);
        assert_eq!(term.label, "Host Name");
        assert_eq!(term.search, "host.name");
        assert_eq!(term.term_type, Some(TermType::Column));
        assert_eq!(term.class, None);
    }

    #[test]
    fn test_from_data_fills_missing_search() {
        let mut data = BTreeMap::new();
        data.insert("termLabel".to_string(), "foo".to_string());
        let term = Term::from_data(&data);
        assert_eq!(term.search, "foo");
    }

    #[test]
    fn test_data_roundtrip() {
        let term = Term::grouping_close();
        assert_eq!(Term::from_data(&term.to_data()), term);
    }

    #[test]
    fn test_serde_uses_type_key() {
        let json = serde_json::to_string(&Term::operator("!=")).unwrap();
        assert!(json.contains("\"type\":\"operator\""));

        let term: Term = serde_json::from_str(r#"{"label":"a","search":"a"}"#).unwrap();
        assert_eq!(term.term_type, None);
    }
}
