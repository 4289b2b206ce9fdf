//! Keystroke lookup over a list of bindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::KeyContext;
use super::types::Keystroke;

/// What a keystroke resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Execute(Command),
    /// Nothing bound; the key is typed into the slot
    NoMatch,
}

/// Bindings indexed by keystroke
///
/// A keystroke can carry several bindings that differ in their `when`
/// conditions. Conditional bindings win over unconditional ones; among
/// equals the one added first wins.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    by_key: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        bindings.into_iter().for_each(|b| keymap.add_binding(b));
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        self.by_key
            .entry(binding.keystroke)
            .or_default()
            .push(self.bindings.len());
        self.bindings.push(binding);
    }

    /// Resolve a keystroke against the focused slot's state
    pub fn handle_keystroke(&self, keystroke: Keystroke, context: &KeyContext) -> KeyAction {
        self.resolve(&keystroke, Some(context))
            .map_or(KeyAction::NoMatch, KeyAction::Execute)
    }

    /// Resolve a keystroke using only its unconditional bindings
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.resolve(keystroke, None)
    }

    fn resolve(&self, keystroke: &Keystroke, context: Option<&KeyContext>) -> Option<Command> {
        let candidates: Vec<&Keybinding> = self
            .by_key
            .get(keystroke)?
            .iter()
            .map(|&i| &self.bindings[i])
            .collect();

        let conditional = context.and_then(|ctx| {
            candidates
                .iter()
                .find(|b| b.when.is_some() && b.matches(ctx))
        });
        conditional
            .or_else(|| candidates.iter().find(|b| b.when.is_none()))
            .map(|b| b.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Every binding for `command`, in keymap order
    pub fn bindings_for(&self, command: Command) -> impl Iterator<Item = &Keybinding> {
        self.bindings.iter().filter(move |b| b.command == command)
    }

    /// Keys bound to `command` joined for a hint, e.g. `Shift+Home, Ctrl+A`
    pub fn display_for(&self, command: Command) -> Option<String> {
        let keys: Vec<String> = self
            .bindings_for(command)
            .map(Keybinding::display_string)
            .collect();
        (!keys.is_empty()).then(|| keys.join(", "))
    }
}
