//! Key bindings for editor slots
//!
//! A keystroke in a focused slot resolves in three steps:
//!
//! ```text
//! Keystroke + KeyContext(focused slot) → Keymap → Command → Vec<Msg>
//! ```
//!
//! Unbound keys come back as [`KeyAction::NoMatch`] and are typed into the
//! slot as text. Bindings may carry `when` conditions on the slot state
//! (trailing input or term slot, preview shown, text empty); the
//! conditional binding wins when its conditions hold.
//!
//! Defaults ship as `keymap.yaml` compiled into the binary. A `keymap.yaml`
//! in the config dir overrides them, and `command: Unbound` removes one:
//!
//! ```ignore
//! let keymap = Keymap::with_bindings(load_default_keymap());
//! let action = keymap.handle_keystroke(Keystroke::key(KeyCode::Tab), &ctx);
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
