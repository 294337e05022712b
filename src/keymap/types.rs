//! Core types for the keymap system: Keystroke, Modifiers, KeyCode, KeySequence
//!
//! Every keystroke has a canonical textual form in Vim key notation
//! (`w`, `<Space>`, `<Bslash>`, `<C-w>`, `<C-S-a>`, `<S-Tab>`). Constructors
//! normalize their input so that two keystrokes compare equal exactly when
//! their canonical strings are equal.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b001);
    pub const SHIFT: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b001;
        }
        if shift {
            bits |= 0b010;
        }
        if alt {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove all modifiers in `other`
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Vim notation prefix, always in `C-A-S-` order
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl() {
            f.write_str("C-")?;
        }
        if self.alt() {
            f.write_str("A-")?;
        }
        if self.shift() {
            f.write_str("S-")?;
        }
        Ok(())
    }
}

/// A key code representing a physical or logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A printable character, case preserved (`a` and `A` are different keys)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    /// `<Plug>` placeholder used by the host to hand keys off to extensions
    Plug,
    /// `<Action>` placeholder used by the host for IDE action dispatch
    Action,
}

impl KeyCode {
    /// Vim name of a named key, `None` for characters
    pub fn name(self) -> Option<String> {
        let name = match self {
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "CR",
            KeyCode::Escape => "Esc",
            KeyCode::Tab => "Tab",
            KeyCode::Backspace => "BS",
            KeyCode::Delete => "Del",
            KeyCode::Space => "Space",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Insert => "Insert",
            KeyCode::F(n) => return Some(format!("F{}", n)),
            KeyCode::Plug => "Plug",
            KeyCode::Action => "Action",
        };
        Some(name.to_string())
    }

    /// Reserved placeholder keys never surface as selectable continuations
    #[inline]
    pub const fn is_reserved(self) -> bool {
        matches!(self, KeyCode::Plug | KeyCode::Action)
    }
}

/// A single keystroke: a key with modifiers
///
/// Fields are private so every value goes through [`Keystroke::new`], which
/// keeps the representation canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keystroke {
    key: KeyCode,
    mods: Modifiers,
}

impl Keystroke {
    /// Create a normalized keystroke
    ///
    /// - a space character becomes [`KeyCode::Space`]
    /// - letters combined with Ctrl or Alt are lower-cased (`<C-A>` == `<C-a>`)
    /// - Shift on a bare letter is folded into the letter (`<S-a>` == `A`)
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        let (key, mods) = match key {
            KeyCode::Char(' ') => (KeyCode::Space, mods),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if mods.ctrl() || mods.alt() {
                    (KeyCode::Char(c.to_ascii_lowercase()), mods)
                } else if mods.shift() {
                    (
                        KeyCode::Char(c.to_ascii_uppercase()),
                        mods.without(Modifiers::SHIFT),
                    )
                } else {
                    (KeyCode::Char(c), mods)
                }
            }
            other => (other, mods),
        };
        Self { key, mods }
    }

    /// Create a keystroke with no modifiers
    pub fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Create a keystroke for a typed character
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::NONE)
    }

    /// Create a keystroke with a character and modifiers
    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c), mods)
    }

    #[inline]
    pub fn code(&self) -> KeyCode {
        self.key
    }

    #[inline]
    pub fn mods(&self) -> Modifiers {
        self.mods
    }

    /// Check if this is a reserved placeholder key (`<Plug>`, `<Action>`)
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.key.is_reserved()
    }

    /// Canonical Vim notation for this keystroke
    pub fn canonical(&self) -> String {
        if self.mods.is_empty() {
            return match self.key {
                KeyCode::Char('\\') => "<Bslash>".to_string(),
                KeyCode::Char(c) => c.to_string(),
                other => format!("<{}>", other.name().unwrap_or_default()),
            };
        }

        let key = match self.key {
            KeyCode::Char(c) => bracketed_char_name(c),
            other => other.name().unwrap_or_default(),
        };
        format!("<{}{}>", self.mods, key)
    }
}

/// Characters that would confuse the `<...>` grammar get their Vim names
fn bracketed_char_name(c: char) -> String {
    match c {
        '<' => "lt".to_string(),
        '>' => "gt".to_string(),
        '\\' => "Bslash".to_string(),
        '|' => "Bar".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Ordered list of keystrokes: keys typed so far, or the keys of a binding
///
/// Equality and hashing are structural over normalized keystrokes, so a
/// single `<Tab>` keystroke never collides with the five characters
/// `<`, `T`, `a`, `b`, `>` even though both print as `<Tab>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySequence(Vec<Keystroke>);

impl KeySequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, keystroke: Keystroke) {
        self.0.push(keystroke);
    }

    /// Copy of this sequence with `keystroke` appended
    pub fn with(&self, keystroke: Keystroke) -> Self {
        let mut keys = Vec::with_capacity(self.0.len() + 1);
        keys.extend_from_slice(&self.0);
        keys.push(keystroke);
        Self(keys)
    }

    /// All keys but the last one, `None` for an empty sequence
    pub fn parent(&self) -> Option<KeySequence> {
        self.0
            .split_last()
            .map(|(_, init)| KeySequence(init.to_vec()))
    }

    pub fn into_inner(self) -> Vec<Keystroke> {
        self.0
    }
}

impl Deref for KeySequence {
    type Target = [Keystroke];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<[Keystroke]> for KeySequence {
    fn borrow(&self) -> &[Keystroke] {
        &self.0
    }
}

impl From<Vec<Keystroke>> for KeySequence {
    fn from(keys: Vec<Keystroke>) -> Self {
        Self(keys)
    }
}

impl From<&[Keystroke]> for KeySequence {
    fn from(keys: &[Keystroke]) -> Self {
        Self(keys.to_vec())
    }
}

impl FromIterator<Keystroke> for KeySequence {
    fn from_iter<I: IntoIterator<Item = Keystroke>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a Keystroke;
    type IntoIter = std::slice::Iter<'a, Keystroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Canonical strings of all keys, concatenated
impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for keystroke in &self.0 {
            f.write_str(&keystroke.canonical())?;
        }
        Ok(())
    }
}
