//! Key representation for input translation
//!
//! A minimal, host-agnostic key event: a [`KeyCode`] plus the modifier keys
//! held while it was pressed. The controller's default key map (see
//! [`crate::controller`]) only distinguishes `ctrl`; `alt`/`shift` are
//! carried so a host can build a richer map on top without redefining the
//! type.

/// Modifier keys held alongside a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    #[must_use]
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// True if neither `ctrl` nor `alt` is held (the default key map only
    /// cares about these two; `shift` alone never changes its behavior).
    #[must_use]
    pub fn is_plain(&self) -> bool {
        !self.ctrl && !self.alt
    }
}

/// A key code, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, or a control character carried verbatim
    /// (e.g. `'\r'`, `'\x7f'`) for hosts that deliver raw bytes.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
}

/// A single key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl Key {
    #[must_use]
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    #[must_use]
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    #[must_use]
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, Modifiers::ctrl())
    }

    /// Convenience constructor for a plain printable character.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
