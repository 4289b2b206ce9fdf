//! Keystrokes as the keymap sees them
//!
//! A keystroke prints in the same `mods+key` syntax that keymap files and
//! keystroke scripts use (`shift+home`, `enter`, `a`), so
//! [`parse_key_string`](super::parse_key_string) reads back what it prints.

use std::fmt;

/// Held modifier keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    /// Cmd on macOS, Win elsewhere
    pub const META: Modifiers = Modifiers(0b1000);

    /// Order and names used when printing
    const NAMES: [(Modifiers, &'static str); 4] = [
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::ALT, "alt"),
        (Modifiers::SHIFT, "shift"),
        (Modifiers::META, "meta"),
    ];

    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.contains(Modifiers::CTRL)
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.contains(Modifiers::ALT)
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.contains(Modifiers::META)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The platform command modifier: Cmd on macOS, Ctrl elsewhere
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }

    /// Whether the platform command modifier is held
    pub fn has_cmd(self) -> bool {
        self.contains(Modifiers::cmd())
    }

    fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(m, _)| self.contains(*m))
            .map(|(_, name)| name)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// Keys a slot reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to lowercase)
    Char(char),

    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
}

impl KeyCode {
    /// Named keys with their canonical names
    pub const NAMED: [(KeyCode, &'static str); 12] = [
        (KeyCode::Enter, "enter"),
        (KeyCode::Escape, "escape"),
        (KeyCode::Tab, "tab"),
        (KeyCode::Backspace, "backspace"),
        (KeyCode::Delete, "delete"),
        (KeyCode::Space, "space"),
        (KeyCode::Up, "up"),
        (KeyCode::Down, "down"),
        (KeyCode::Left, "left"),
        (KeyCode::Right, "right"),
        (KeyCode::Home, "home"),
        (KeyCode::End, "end"),
    ];

    /// Canonical name of a named key, `None` for characters
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(code, _)| *code == self)
            .map(|(_, name)| *name)
    }

    /// Look up a named key by its canonical name
    pub fn from_name(name: &str) -> Option<KeyCode> {
        Self::NAMED
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| *code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.name()) {
            (KeyCode::Char(c), _) => write!(f, "{}", c),
            (_, Some(name)) => f.write_str(name),
            (_, None) => write!(f, "{:?}", self),
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// A key without modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// A character key without modifiers
    pub fn char(c: char) -> Self {
        Self {
            key: KeyCode::Char(c.to_ascii_lowercase()),
            mods: Modifiers::NONE,
        }
    }

    /// Title-cased form for hints, e.g. `Shift+Home`
    pub fn display_string(&self) -> String {
        let key = match self.key {
            KeyCode::Char(c) => c.to_uppercase().to_string(),
            other => title_case(&other.to_string()),
        };
        self.mods
            .names()
            .map(title_case)
            .chain(std::iter::once(key))
            .collect::<Vec<_>>()
            .join("+")
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.mods.names() {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}
