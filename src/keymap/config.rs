//! Keymap files
//!
//! A keymap file is a YAML list of bindings:
//!
//! ```yaml
//! bindings:
//!   - key: "tab"
//!     command: CommitPreview
//!     when: ["trailing_input", "has_preview"]
//!   - key: "cmd+a"
//!     command: SelectAllTerms
//!     platform: macos
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

#[derive(Debug, Deserialize)]
struct KeymapFile {
    bindings: Vec<BindingEntry>,
}

#[derive(Debug, Deserialize)]
struct BindingEntry {
    key: String,
    command: String,
    /// Only load on this OS (`macos`, `windows`, `linux`)
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    when: Vec<String>,
}

impl BindingEntry {
    fn applies_here(&self) -> bool {
        self.platform
            .as_deref()
            .map_or(true, |platform| platform == std::env::consts::OS)
    }

    fn into_binding(self) -> Result<Keybinding, KeymapError> {
        let keystroke = parse_key_string(&self.key)?;
        let command = self
            .command
            .parse::<Command>()
            .map_err(|_| KeymapError::InvalidCommand(self.command.clone()))?;

        let binding = Keybinding::new(keystroke, command);
        if self.when.is_empty() {
            return Ok(binding);
        }
        let conditions = self
            .when
            .iter()
            .map(|name| {
                Condition::from_name(name).ok_or_else(|| KeymapError::InvalidCondition(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(binding.when(conditions))
    }
}

/// Load keybindings from a keymap file on disk
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;
    parse_keymap_yaml(&content)
}

/// Parse keybindings from keymap YAML, skipping entries for other platforms
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let file: KeymapFile =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    file.bindings
        .into_iter()
        .filter(BindingEntry::applies_here)
        .map(BindingEntry::into_binding)
        .collect()
}

/// Alternative spellings accepted for named keys
const KEY_ALIASES: [(&str, KeyCode); 8] = [
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Escape),
    ("back", KeyCode::Backspace),
    ("del", KeyCode::Delete),
    ("arrowup", KeyCode::Up),
    ("arrowdown", KeyCode::Down),
    ("arrowleft", KeyCode::Left),
    ("arrowright", KeyCode::Right),
];

fn modifier(name: &str) -> Option<Modifiers> {
    match name {
        "cmd" => Some(Modifiers::cmd()),
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "option" | "opt" => Some(Modifiers::ALT),
        "meta" | "super" | "win" => Some(Modifiers::META),
        _ => None,
    }
}

fn key_code(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    KeyCode::from_name(name).or_else(|| {
        KEY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, code)| *code)
    })
}

/// Parse `mods+key` syntax such as `cmd+a`, `shift+home` or `<`
///
/// The last `+`-separated part is the key; a lone `+` names the plus key.
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let lowered = key_str.to_lowercase();
    let (mod_part, key_part) = match lowered.rsplit_once('+') {
        Some((mods, "")) if mods.is_empty() => ("", "+"),
        Some((mods, "")) => match mods.strip_suffix('+') {
            Some(rest) => (rest, "+"),
            None => return Err(KeymapError::InvalidKey(key_str.to_string())),
        },
        Some((mods, key)) => (mods, key),
        None => ("", lowered.as_str()),
    };

    let mut mods = Modifiers::NONE;
    for name in mod_part.split('+').filter(|s| !s.is_empty()) {
        mods = mods
            | modifier(name).ok_or_else(|| {
                KeymapError::InvalidKey(format!("{} is not a modifier in {}", name, key_str))
            })?;
    }

    let key = key_code(key_part)
        .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key in {}", key_str)))?;
    Ok(Keystroke::new(key, mods))
}

/// Errors from reading or parsing a keymap
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "cannot read keymap: {}", e),
            KeymapError::ParseError(e) => write!(f, "malformed keymap: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "unknown command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "unknown condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}
