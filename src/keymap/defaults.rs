//! Default keybindings for the filter editor
//!
//! Loaded from the keymap.yaml embedded at compile time, with hardcoded
//! defaults as a fallback.

use std::path::PathBuf;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::config_paths;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Embedded defaults with `keymap.yaml` overrides layered on top
///
/// Layers, later ones winning: the embedded keymap, `./keymap.yaml`, then
/// `keymap.yaml` in the config dir. A missing layer is skipped; a broken
/// one is logged and skipped.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let base = parse_keymap_yaml(DEFAULT_KEYMAP_YAML).unwrap_or_else(|e| {
        tracing::warn!("embedded keymap is broken ({}), using built-in bindings", e);
        default_bindings()
    });

    let overrides = [Some(PathBuf::from("keymap.yaml")), config_paths::keymap_file()];
    overrides
        .into_iter()
        .flatten()
        .filter(|path| path.is_file())
        .fold(base, |bindings, path| match load_keymap_file(&path) {
            Ok(layer) => {
                tracing::info!(path = %path.display(), count = layer.len(), "merging keymap");
                merge_bindings(bindings, layer)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping keymap: {}", e);
                bindings
            }
        })
}

/// Merge user bindings into base bindings
///
/// - Same keystroke and conditions: the user binding replaces the base one
/// - `Unbound`: removes every base binding on that keystroke
/// - Otherwise the user binding is appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Built-in bindings, mirroring the embedded keymap.yaml
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let shift = Modifiers::SHIFT;
    let none = Modifiers::NONE;

    vec![
        // Preview
        bind(KeyCode::Space, none, Command::ConfirmPreview),
        bind(KeyCode::Tab, none, Command::CommitPreview)
            .when(vec![Condition::TrailingInput, Condition::HasPreview]),
        bind(KeyCode::Up, none, Command::PreviousPreview),
        bind(KeyCode::Down, none, Command::NextPreview),
        // Navigation
        bind(KeyCode::Left, none, Command::MoveCursorLeft),
        bind(KeyCode::Right, none, Command::MoveCursorRight),
        bind(KeyCode::Home, none, Command::MoveCursorStart),
        bind(KeyCode::End, none, Command::MoveCursorEnd),
        // Selection
        bind(KeyCode::Home, shift, Command::SelectAllTerms),
        bind(KeyCode::Char('a'), cmd, Command::SelectAllTerms),
        bind(KeyCode::Escape, none, Command::DeselectTerms),
        // Editing
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
        bind(KeyCode::Enter, none, Command::SaveTerm).when_single(Condition::TermSlot),
        bind(KeyCode::Enter, none, Command::Submit).when_single(Condition::TrailingInput),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
