//! Filter tree to flat term sequence
//!
//! Walks a [`Filter`] depth-first, left to right. Siblings are separated by
//! their chain's logical operator, nested chains are wrapped in grouping
//! parentheses and each condition becomes `column operator value` (just the
//! column for boolean-true conditions, unless the full form is asked for).

use crate::filter::{Filter, FilterChain, FilterExpression};
use crate::model::sequence::join_search;
use crate::model::term::Term;

/// Flatten a filter tree into the terms the editor shows
///
/// Empty chains produce no terms and leave no dangling operator behind.
pub fn tree_to_terms(filter: &Filter) -> Vec<Term> {
    let mut terms = Vec::new();
    match filter {
        Filter::Chain(chain) => push_chain(chain, Conditions::Compact, &mut terms),
        Filter::Expression(expr) => push_condition(expr, Conditions::Compact, &mut terms),
    }
    terms
}

/// Terms of a chain with every condition spelled out as `column operator value`
///
/// Used for suggestion payloads, where boolean-true conditions keep their
/// operator and value.
pub fn chain_to_terms(chain: &FilterChain) -> Vec<Term> {
    let mut terms = Vec::new();
    push_chain(chain, Conditions::Full, &mut terms);
    terms
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Conditions {
    /// Boolean-true conditions collapse to their column
    Compact,
    Full,
}

/// The serialized search string for `terms`, as a term sequence would produce it
pub fn terms_to_search(terms: &[Term], separator: &str) -> String {
    join_search(terms, separator)
}

fn push_chain(chain: &FilterChain, mode: Conditions, out: &mut Vec<Term>) {
    let mut first = true;
    for child in chain.filters.iter().filter(|f| !f.is_empty()) {
        if !first {
            out.push(Term::logical(chain.operator.symbol()));
        }
        first = false;

        match child {
            Filter::Chain(nested) => {
                out.push(Term::grouping_open());
                push_chain(nested, mode, out);
                out.push(Term::grouping_close());
            }
            Filter::Expression(expr) => push_condition(expr, mode, out),
        }
    }
}

fn push_condition(expr: &FilterExpression, mode: Conditions, out: &mut Vec<Term>) {
    out.push(Term::column(expr.column.as_str()).with_label(expr.column_label()));

    if mode == Conditions::Full || !expr.value.is_boolean_true() {
        out.push(Term::operator(&expr.sign));
        out.push(Term::value(expr.value.to_string()));
    }
}
