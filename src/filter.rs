//! Filter tree - the nested boolean expression the editor edits in flat form
//!
//! A tree is either a chain of child filters joined by one logical operator or
//! a single `column sign value` condition. Trees are (de)serialized as JSON:
//!
//! ```json
//! {"operator": "&", "filters": [
//!     {"column": "host", "sign": "=", "value": "web*"},
//!     {"column": "problem", "sign": "=", "value": true}
//! ]}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical operator joining the filters of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "&")]
    And,
    #[serde(rename = "|")]
    Or,
}

impl LogicalOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOperator::And => "&",
            LogicalOperator::Or => "|",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "&" => Some(LogicalOperator::And),
            "|" => Some(LogicalOperator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpressionValue {
    Bool(bool),
    Text(String),
}

impl ExpressionValue {
    /// `column = true` is written as just the column
    pub fn is_boolean_true(&self) -> bool {
        matches!(self, ExpressionValue::Bool(true))
    }
}

impl fmt::Display for ExpressionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionValue::Bool(true) => f.write_str("1"),
            ExpressionValue::Bool(false) => f.write_str("0"),
            ExpressionValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ExpressionValue {
    fn from(value: &str) -> Self {
        ExpressionValue::Text(value.to_string())
    }
}

impl From<String> for ExpressionValue {
    fn from(value: String) -> Self {
        ExpressionValue::Text(value)
    }
}

impl From<bool> for ExpressionValue {
    fn from(value: bool) -> Self {
        ExpressionValue::Bool(value)
    }
}

/// A single `column sign value` condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterExpression {
    pub column: String,
    pub sign: String,
    pub value: ExpressionValue,
    /// Display label of the column, if it differs from the column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FilterExpression {
    pub fn new(
        column: impl Into<String>,
        sign: impl Into<String>,
        value: impl Into<ExpressionValue>,
    ) -> Self {
        Self {
            column: column.into(),
            sign: sign.into(),
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label shown for the column
    pub fn column_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.column)
    }
}

/// Filters joined by one logical operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChain {
    pub operator: LogicalOperator,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new(operator: LogicalOperator, filters: Vec<Filter>) -> Self {
        Self { operator, filters }
    }

    /// Whether the chain holds no conditions, directly or in nested chains
    pub fn is_empty(&self) -> bool {
        self.filters.iter().all(Filter::is_empty)
    }

    /// Column labels of all conditions, depth-first
    pub fn column_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        for filter in &self.filters {
            filter.collect_column_labels(&mut labels);
        }
        labels
    }
}

/// A filter tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Chain(FilterChain),
    Expression(FilterExpression),
}

impl Filter {
    /// All of `filters` must match
    pub fn all(filters: Vec<Filter>) -> Self {
        Filter::Chain(FilterChain::new(LogicalOperator::And, filters))
    }

    /// Any of `filters` must match
    pub fn any(filters: Vec<Filter>) -> Self {
        Filter::Chain(FilterChain::new(LogicalOperator::Or, filters))
    }

    pub fn condition(
        column: impl Into<String>,
        sign: impl Into<String>,
        value: impl Into<ExpressionValue>,
    ) -> Self {
        Filter::Expression(FilterExpression::new(column, sign, value))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Filter::Chain(chain) => chain.is_empty(),
            Filter::Expression(_) => false,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn collect_column_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Filter::Chain(chain) => {
                for filter in &chain.filters {
                    filter.collect_column_labels(out);
                }
            }
            Filter::Expression(expr) => out.push(expr.column_label()),
        }
    }
}

impl From<FilterExpression> for Filter {
    fn from(expr: FilterExpression) -> Self {
        Filter::Expression(expr)
    }
}

impl From<FilterChain> for Filter {
    fn from(chain: FilterChain) -> Self {
        Filter::Chain(chain)
    }
}
