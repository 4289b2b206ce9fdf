//! Keyboard input handling
//!
//! Resolves a keystroke to messages: bound keys go through the keymap,
//! everything else that produces a character is typed into the focused slot.

use crate::keymap::{KeyAction, KeyCode, KeyContext, Keymap, Keystroke};
use crate::messages::Msg;
use crate::model::FilterModel;

/// Messages for a keystroke, empty when the key does nothing
pub fn handle_key(model: &FilterModel, keymap: &Keymap, keystroke: Keystroke) -> Vec<Msg> {
    let context = KeyContext::from_model(model);

    match keymap.handle_keystroke(keystroke, &context) {
        KeyAction::Execute(command) => {
            tracing::trace!(command = command.display_name(), key = %keystroke, "key bound");
            command.to_msgs(model.focus)
        }
        KeyAction::NoMatch => typed_char(keystroke)
            .map(|ch| vec![Msg::insert_char(ch)])
            .unwrap_or_default(),
    }
}

/// The character a keystroke types, if any
///
/// Keys held with Ctrl or Meta never type.
fn typed_char(keystroke: Keystroke) -> Option<char> {
    if keystroke.mods.ctrl() || keystroke.mods.meta() {
        return None;
    }

    match keystroke.key {
        KeyCode::Char(ch) if keystroke.mods.shift() => ch.to_uppercase().next(),
        KeyCode::Char(ch) => Some(ch),
        KeyCode::Space => Some(' '),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::keymap::{default_bindings, Modifiers};
    use crate::messages::{Direction, InputMsg};

    fn model() -> FilterModel {
        FilterModel::filter(EditorConfig::default())
    }

    #[test]
    fn test_unbound_char_is_typed() {
        let keymap = Keymap::with_bindings(default_bindings());
        let msgs = handle_key(&model(), &keymap, Keystroke::char('h'));
        assert_eq!(msgs, vec![Msg::insert_char('h')]);
    }

    #[test]
    fn test_shift_uppercases() {
        let keymap = Keymap::with_bindings(default_bindings());
        let stroke = Keystroke::new(KeyCode::Char('h'), Modifiers::SHIFT);
        assert_eq!(
            handle_key(&model(), &keymap, stroke),
            vec![Msg::insert_char('H')]
        );
    }

    #[test]
    fn test_ctrl_chars_are_swallowed() {
        let keymap = Keymap::new();
        let stroke = Keystroke::new(KeyCode::Char('z'), Modifiers::CTRL);
        assert!(handle_key(&model(), &keymap, stroke).is_empty());
    }

    #[test]
    fn test_bound_key_uses_keymap() {
        let keymap = Keymap::with_bindings(default_bindings());
        assert_eq!(
            handle_key(&model(), &keymap, Keystroke::key(KeyCode::Left)),
            vec![Msg::move_cursor(Direction::Left)]
        );
        assert_eq!(
            handle_key(&model(), &keymap, Keystroke::key(KeyCode::Space)),
            vec![Msg::Input(InputMsg::ConfirmPreview)]
        );
    }
}
