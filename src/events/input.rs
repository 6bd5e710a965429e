//! Key input and configurable bindings.
//!
//! Bindings are written as `"q"`, `"Ctrl+r"` or `"PageDown"` in the config
//! file. [`Binding::parse`] turns one into a structured value that
//! [`InputEvent::matches`] compares against.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Unknown,
}

impl Key {
    /// Named keys as they are spelled in bindings, lowercased.
    const NAMED: [(&'static str, Key); 14] = [
        ("enter", Key::Enter),
        ("esc", Key::Escape),
        ("escape", Key::Escape),
        ("backspace", Key::Backspace),
        ("tab", Key::Tab),
        ("backtab", Key::BackTab),
        ("up", Key::Up),
        ("down", Key::Down),
        ("left", Key::Left),
        ("right", Key::Right),
        ("home", Key::Home),
        ("end", Key::End),
        ("pageup", Key::PageUp),
        ("pagedown", Key::PageDown),
    ];

    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if let Some((_, key)) = Self::NAMED.iter().find(|(n, _)| *n == lower) {
            return Some(*key);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }

    fn is_symbol(self) -> bool {
        matches!(self, Key::Char(c) if !c.is_alphabetic())
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A parsed key binding such as `Ctrl+r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl Binding {
    /// Parse a binding string. Returns `None` for an empty or unknown key name.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = Modifiers::default();
        let mut key = None;
        // A trailing "+" is the plus key itself, not a separator.
        let (head, plus) = match spec.strip_suffix("++") {
            Some(head) => (head, true),
            None => (spec, spec == "+"),
        };
        if plus {
            key = Some(Key::Char('+'));
        }
        for part in head.split('+').filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => key = Some(Key::from_name(part)?),
            }
        }
        key.map(|key| Self { key, modifiers })
    }
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    pub fn char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.ctrl
    }

    /// Whether this press triggers `binding`. Unparseable bindings never match.
    ///
    /// Letters compare case-insensitively and Shift must agree with the
    /// binding. Symbols such as `?` ignore Shift because layouts differ in
    /// whether it is needed.
    pub fn matches(&self, binding: &str) -> bool {
        Binding::parse(binding).is_some_and(|b| self.triggers(b))
    }

    fn triggers(&self, binding: Binding) -> bool {
        let (want, got) = (binding.modifiers, self.modifiers);
        if want.ctrl != got.ctrl || want.alt != got.alt {
            return false;
        }
        if !binding.key.is_symbol() && want.shift != got.shift {
            return false;
        }
        match (binding.key, self.key) {
            (Key::Char(a), Key::Char(b)) => a == b.to_ascii_lowercase(),
            (a, b) => a == b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(code: KeyCode, mods: KeyModifiers) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, mods))
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(
            Binding::parse("Ctrl+R"),
            Some(Binding {
                key: Key::Char('r'),
                modifiers: Modifiers { ctrl: true, ..Default::default() },
            })
        );
        assert_eq!(Binding::parse("PageDown").map(|b| b.key), Some(Key::PageDown));
        assert_eq!(Binding::parse("+").map(|b| b.key), Some(Key::Char('+')));
        assert_eq!(Binding::parse("Ctrl++").map(|b| b.modifiers.ctrl), Some(true));
        assert_eq!(Binding::parse("Hyper"), None);
        assert_eq!(Binding::parse(""), None);
    }

    #[test]
    fn test_plain_char_binding() {
        assert!(press(KeyCode::Char('q'), KeyModifiers::NONE).matches("q"));
        assert!(!press(KeyCode::Char('q'), KeyModifiers::CONTROL).matches("q"));
        assert!(press(KeyCode::Char('r'), KeyModifiers::CONTROL).matches("Ctrl+r"));
    }

    #[test]
    fn test_symbol_ignores_shift() {
        assert!(press(KeyCode::Char('?'), KeyModifiers::SHIFT).matches("?"));
        assert!(press(KeyCode::Char('?'), KeyModifiers::NONE).matches("?"));
        assert!(!press(KeyCode::Char('J'), KeyModifiers::SHIFT).matches("j"));
        assert!(press(KeyCode::Char('J'), KeyModifiers::SHIFT).matches("Shift+j"));
    }

    #[test]
    fn test_named_keys() {
        assert!(press(KeyCode::Enter, KeyModifiers::NONE).matches("Enter"));
        assert!(press(KeyCode::Esc, KeyModifiers::NONE).matches("Esc"));
        assert!(!press(KeyCode::Null, KeyModifiers::NONE).matches("Enter"));
        assert!(!press(KeyCode::Enter, KeyModifiers::NONE).matches("Hyper"));
    }
}
