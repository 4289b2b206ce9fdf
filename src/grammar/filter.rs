//! Filter grammar: `column operator value` conditions, logical operators and grouping

use tracing::trace;

use super::{choose_message, Continuations, SlotContext, TermGrammar, Validity};
use crate::model::term::{logical_operators, relational_operators, Term, TermType};

/// Grammar for filter expressions like `host = web* & ( state != 0 | ack = 1 )`
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterGrammar;

impl FilterGrammar {
    pub fn new() -> Self {
        Self
    }

    /// Relational operators extending `typed`, or all of them
    ///
    /// Returns whether `typed` was a strict prefix of at least one operator.
    fn push_relational(typed: &str, out: &mut Vec<Term>) -> bool {
        let mut partial = false;
        if !typed.is_empty() {
            for op in relational_operators() {
                if op.label.len() > typed.len() && op.label.starts_with(typed) {
                    out.push(op);
                    partial = true;
                }
            }
        }

        if !partial {
            out.extend(relational_operators());
        }
        partial
    }

    /// Tokens that may follow a complete condition
    fn push_joiners(out: &mut Vec<Term>) {
        out.push(Term::grouping_close());
        out.extend(logical_operators());
    }
}

impl TermGrammar for FilterGrammar {
    fn initial_type(&self) -> Option<TermType> {
        Some(TermType::Column)
    }

    fn next_type(&self, term: &Term) -> Option<TermType> {
        match term.term_type? {
            TermType::Column => Some(TermType::Operator),
            TermType::Operator => Some(TermType::Value),
            TermType::Value => Some(TermType::LogicalOperator),
            TermType::LogicalOperator => Some(TermType::Column),
            TermType::GroupingOperator => {
                if term.is_grouping_open() {
                    Some(TermType::Column)
                } else {
                    Some(TermType::LogicalOperator)
                }
            }
        }
    }

    fn continuations(
        &self,
        typed: &str,
        expected: Option<TermType>,
        ctx: SlotContext<'_>,
    ) -> Continuations {
        let mut terms = Vec::new();
        let mut partial = false;

        match expected {
            Some(TermType::Column) if ctx.pending.is_empty() => {
                // Only a fresh condition may open a group
                let opens_group = ctx
                    .preceding
                    .map_or(true, |t| t.is_type(TermType::LogicalOperator));
                if opens_group {
                    terms.push(Term::grouping_open());
                }
            }
            Some(TermType::Column) | Some(TermType::Operator) => {
                partial = Self::push_relational(typed, &mut terms);
                Self::push_joiners(&mut terms);
            }
            Some(TermType::Value) | Some(TermType::LogicalOperator) => {
                Self::push_joiners(&mut terms);
            }
            Some(TermType::GroupingOperator) => {
                if let Some(preceding) = ctx.preceding {
                    match preceding.term_type {
                        Some(TermType::Column | TermType::Operator | TermType::Value) => {
                            terms.push(Term::grouping_close())
                        }
                        Some(TermType::LogicalOperator) => terms.push(Term::grouping_open()),
                        Some(TermType::GroupingOperator) => terms.push(preceding.clone()),
                        None => {}
                    }
                }
            }
            None => {}
        }

        if !partial && !typed.is_empty() {
            if let Some(exact) = terms.iter().find(|t| t.label == typed) {
                trace!(typed, ?expected, "exact continuation");
                return Continuations {
                    terms: vec![exact.clone()],
                    partial: false,
                };
            }
        }

        Continuations { terms, partial }
    }

    fn requires_types(&self) -> bool {
        true
    }

    fn check_validity(
        &self,
        value: &str,
        term_type: Option<TermType>,
        ctx: SlotContext<'_>,
        template: &str,
    ) -> Validity {
        match term_type {
            Some(TermType::Operator | TermType::LogicalOperator | TermType::GroupingOperator) => {}
            _ => return Validity::Valid,
        }

        let options = self.continuations(value, term_type, ctx);
        if value.is_empty() || options.partial || options.exact(value).is_some() {
            Validity::Valid
        } else {
            Validity::Invalid {
                message: choose_message(template, &options),
            }
        }
    }

    fn preview_for(&self, expected: Option<TermType>) -> Option<Term> {
        match expected? {
            TermType::Operator => relational_operators().into_iter().next(),
            TermType::LogicalOperator => logical_operators().into_iter().next(),
            _ => None,
        }
    }

    fn cycle_preview(&self, current: &Term, forward: bool) -> Option<Term> {
        let group: Vec<Term> = match current.term_type? {
            TermType::Operator => relational_operators().to_vec(),
            TermType::LogicalOperator => logical_operators().to_vec(),
            _ => return None,
        };

        let position = group.iter().position(|t| t.label == current.label)?;
        let next = if forward {
            (position + 1) % group.len()
        } else {
            (position + group.len() - 1) % group.len()
        };
        group.into_iter().nth(next)
    }

    fn prepare_search(&self, term: &mut Term) {
        if matches!(
            term.term_type,
            Some(TermType::Column) | Some(TermType::Value)
        ) {
            term.search = escape_expression(&term.search);
        }
    }
}

/// Escape a column or value like a URI component, with parentheses encoded too
///
/// `!`, `*` and `'` stay literal like in JavaScript's `encodeURIComponent`.
pub fn escape_expression(expr: &str) -> String {
    urlencoding::encode(expr)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "Please type one of: %s";

    fn ctx<'a>(pending: &'a str, preceding: Option<&'a Term>) -> SlotContext<'a> {
        SlotContext { pending, preceding }
    }

    #[test]
    fn test_next_type_cycle() {
        let g = FilterGrammar;
        assert_eq!(g.next_type(&Term::column("a")), Some(TermType::Operator));
        assert_eq!(g.next_type(&Term::operator("=")), Some(TermType::Value));
        assert_eq!(
            g.next_type(&Term::value("1")),
            Some(TermType::LogicalOperator)
        );
        assert_eq!(g.next_type(&Term::logical("&")), Some(TermType::Column));
        assert_eq!(g.next_type(&Term::grouping_open()), Some(TermType::Column));
        assert_eq!(
            g.next_type(&Term::grouping_close()),
            Some(TermType::LogicalOperator)
        );
    }

    #[test]
    fn test_exact_operator_short_circuits() {
        let c = FilterGrammar.continuations("=", Some(TermType::Operator), ctx("", None));
        assert_eq!(c.labels(), vec!["="]);
        assert!(!c.partial);
    }

    #[test]
    fn test_partial_operator() {
        let c = FilterGrammar.continuations("!", Some(TermType::Operator), ctx("", None));
        assert!(c.partial);
        assert_eq!(c.labels(), vec!["!=", ")", "&", "|"]);
    }

    #[test]
    fn test_greater_than_is_partial() {
        let c = FilterGrammar.continuations(">", Some(TermType::Operator), ctx("", None));
        assert!(c.partial);
        assert_eq!(c.terms[0].label, ">=");
    }

    #[test]
    fn test_open_group_only_at_start_or_after_logical() {
        let g = FilterGrammar;
        let c = g.continuations("(", Some(TermType::Column), ctx("", None));
        assert_eq!(c.labels(), vec!["("]);

        let and = Term::logical("&");
        let c = g.continuations("(", Some(TermType::Column), ctx("", Some(&and)));
        assert_eq!(c.labels(), vec!["("]);

        let open = Term::grouping_open();
        let c = g.continuations("(", Some(TermType::Column), ctx("", Some(&open)));
        assert!(c.is_empty());
    }

    #[test]
    fn test_column_with_pending_text_falls_through() {
        let c = FilterGrammar.continuations("=", Some(TermType::Column), ctx("host", None));
        assert_eq!(c.labels(), vec!["="]);
    }

    #[test]
    fn test_value_continuations_order() {
        let c = FilterGrammar.continuations("", Some(TermType::Value), ctx("", None));
        assert_eq!(c.labels(), vec![")", "&", "|"]);
    }

    #[test]
    fn test_grouping_mirrors_preceding() {
        let g = FilterGrammar;
        let value = Term::value("1");
        let c = g.continuations("", Some(TermType::GroupingOperator), ctx("", Some(&value)));
        assert_eq!(c.labels(), vec![")"]);

        let or = Term::logical("|");
        let c = g.continuations("", Some(TermType::GroupingOperator), ctx("", Some(&or)));
        assert_eq!(c.labels(), vec!["("]);

        let close = Term::grouping_close();
        let c = g.continuations("", Some(TermType::GroupingOperator), ctx("", Some(&close)));
        assert_eq!(c.labels(), vec![")"]);

        let c = g.continuations("", Some(TermType::GroupingOperator), ctx("", None));
        assert!(c.is_empty());
    }

    #[test]
    fn test_validity_messages() {
        let g = FilterGrammar;
        let v = g.check_validity("&", Some(TermType::LogicalOperator), ctx("", None), TEMPLATE);
        assert!(v.is_valid());

        let v = g.check_validity("x", Some(TermType::LogicalOperator), ctx("", None), TEMPLATE);
        assert_eq!(v.message(), Some("Please type one of: ), &, |"));

        assert!(g
            .check_validity("", Some(TermType::Operator), ctx("", None), TEMPLATE)
            .is_valid());
        assert!(g
            .check_validity("anything", Some(TermType::Value), ctx("", None), TEMPLATE)
            .is_valid());
    }

    #[test]
    fn test_cycle_preview_wraps() {
        let g = FilterGrammar;
        let first = g.preview_for(Some(TermType::Operator)).unwrap();
        let last = g.cycle_preview(&first, false).unwrap();
        assert_eq!(last.label, "<=");
        assert_eq!(g.cycle_preview(&last, true).unwrap().label, "=");

        let and = g.preview_for(Some(TermType::LogicalOperator)).unwrap();
        assert_eq!(g.cycle_preview(&and, true).unwrap().label, "|");
        assert!(g.preview_for(Some(TermType::Value)).is_none());
    }

    #[test]
    fn test_escape_expression() {
        assert_eq!(escape_expression("host name"), "host%20name");
        assert_eq!(escape_expression("a(b)"), "a%28b%29");
        assert_eq!(escape_expression("web*!'"), "web*!'");
        assert_eq!(escape_expression("a&b|c"), "a%26b%7Cc");
    }
}
