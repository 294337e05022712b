//! Vim key notation: parse `<leader>gg`, `<C-w>h`, `z<CR>` into key sequences
//! and print them back.
//!
//! Unknown `<...>` groups without modifiers are taken literally, the way Vim
//! does (`<foo>` is five keys). A group with modifiers but an unknown key name
//! is an error.

use super::types::{KeyCode, KeySequence, Keystroke, Modifiers};

/// The leader Vim uses when `mapleader` is not set
pub const DEFAULT_LEADER: char = '\\';

/// Errors that can occur when parsing key notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// A modified key group (`<C-...>`) names no known key
    UnknownKey(String),
    /// Expected exactly one keystroke
    NotSingleKey { text: String, count: usize },
}

impl std::fmt::Display for NotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotationError::UnknownKey(k) => write!(f, "Unknown key: {}", k),
            NotationError::NotSingleKey { text, count } => {
                write!(f, "Expected a single key in {:?}, found {}", text, count)
            }
        }
    }
}

impl std::error::Error for NotationError {}

/// Key notation parser with `<leader>` substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNotation {
    leader: KeySequence,
}

impl Default for KeyNotation {
    fn default() -> Self {
        Self {
            leader: KeySequence::from(vec![Keystroke::char(DEFAULT_LEADER)]),
        }
    }
}

impl KeyNotation {
    pub fn new(leader: KeySequence) -> Self {
        Self { leader }
    }

    /// Build from a raw `mapleader` value; each character is one key
    pub fn with_leader_str(mapleader: &str) -> Self {
        if mapleader.is_empty() {
            return Self::default();
        }
        Self::new(mapleader.chars().map(Keystroke::char).collect())
    }

    pub fn leader(&self) -> &KeySequence {
        &self.leader
    }

    /// Parse a notation string into a key sequence
    pub fn parse(&self, text: &str) -> Result<KeySequence, NotationError> {
        let mut keys = KeySequence::new();
        let mut rest = text;

        while let Some(c) = rest.chars().next() {
            if c == '<' {
                if let Some(close) = rest[1..].find('>') {
                    let inner = &rest[1..1 + close];
                    if inner.eq_ignore_ascii_case("leader") {
                        for keystroke in &self.leader {
                            keys.push(*keystroke);
                        }
                        rest = &rest[close + 2..];
                        continue;
                    }
                    if let Some(keystroke) = parse_bracketed(inner)? {
                        keys.push(keystroke);
                        rest = &rest[close + 2..];
                        continue;
                    }
                }
            }

            keys.push(Keystroke::char(c));
            rest = &rest[c.len_utf8()..];
        }

        Ok(keys)
    }

    /// Parse a notation string that must denote exactly one keystroke
    pub fn parse_single(&self, text: &str) -> Result<Keystroke, NotationError> {
        let keys = self.parse(text)?;
        match &*keys {
            [keystroke] => Ok(*keystroke),
            other => Err(NotationError::NotSingleKey {
                text: text.to_string(),
                count: other.len(),
            }),
        }
    }
}

/// Parse with the default leader
pub fn parse_keys(text: &str) -> Result<KeySequence, NotationError> {
    KeyNotation::default().parse(text)
}

/// Print a sequence so that [`parse_keys`] reads it back unchanged
///
/// Differs from the `Display` form only for a bare `<`, which is written as
/// `<lt>` so it cannot open a key group.
pub fn format_keys(keys: &[Keystroke]) -> String {
    keys.iter()
        .map(|k| {
            if *k == Keystroke::char('<') {
                "<lt>".to_string()
            } else {
                k.canonical()
            }
        })
        .collect()
}

/// Parse the inside of a `<...>` group
///
/// Returns `Ok(None)` when the group is not key notation at all.
fn parse_bracketed(inner: &str) -> Result<Option<Keystroke>, NotationError> {
    let mut mods = Modifiers::NONE;
    let mut name = inner;

    loop {
        let mut chars = name.chars();
        let (Some(m), Some('-')) = (chars.next(), chars.next()) else {
            break;
        };
        // `<C-->` style: the dash itself is the key
        if name.len() == 2 {
            break;
        }
        let modifier = match m.to_ascii_lowercase() {
            'c' => Modifiers::CTRL,
            'a' | 'm' => Modifiers::ALT,
            's' => Modifiers::SHIFT,
            _ => break,
        };
        mods = mods | modifier;
        name = &name[2..];
    }

    let mut chars = name.chars();
    let key = match (chars.next(), chars.next()) {
        // `<a>` is three literal keys, `<C-a>` is one
        (Some(c), None) if !mods.is_empty() => Some(KeyCode::Char(c)),
        (Some(_), None) => None,
        _ => parse_key_name(name),
    };

    match key {
        Some(key) => Ok(Some(Keystroke::new(key, mods))),
        None if mods.is_empty() => Ok(None),
        None => Err(NotationError::UnknownKey(format!("<{}>", inner))),
    }
}

/// Parse a multi-character key name from inside a `<...>` group
fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "bs" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "space" => KeyCode::Space,

        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,

        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "insert" | "ins" => KeyCode::Insert,

        "lt" => KeyCode::Char('<'),
        "gt" => KeyCode::Char('>'),
        "bslash" => KeyCode::Char('\\'),
        "bar" => KeyCode::Char('|'),

        "plug" => KeyCode::Plug,
        "action" => KeyCode::Action,

        _ => {
            let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(key)
}
