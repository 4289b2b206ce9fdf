//! A keystroke bound to a command, optionally guarded by conditions

use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// All must hold for the binding to fire; `None` means always
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    pub fn when(self, conditions: Vec<Condition>) -> Self {
        Self {
            when: Some(conditions),
            ..self
        }
    }

    pub fn when_single(self, condition: Condition) -> Self {
        self.when(vec![condition])
    }

    /// Whether the binding's conditions hold in `ctx`
    pub fn matches(&self, ctx: &KeyContext) -> bool {
        self.when
            .as_deref()
            .map_or(true, |conditions| Condition::evaluate_all(conditions, ctx))
    }

    pub fn display_string(&self) -> String {
        self.keystroke.display_string()
    }
}
