//! Key events the picker understands, independent of the terminal backend.

use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyModifiers as CrosstermKeyModifiers,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(key: CrosstermKeyEvent) -> Self {
        KeyEvent {
            code: map_key_code(key.code),
            modifiers: map_key_modifiers(key.modifiers),
        }
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::PageUp => KeyCode::PageUp,
        CrosstermKeyCode::PageDown => KeyCode::PageDown,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out.0 |= KeyModifiers::SHIFT.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out.0 |= KeyModifiers::CONTROL.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out.0 |= KeyModifiers::ALT.0;
    }
    out
}

/// Reads key names as written in replay scripts: `down`, `enter`,
/// `ctrl+w`, `alt+up`, `shift+tab`, or a single character.
impl FromStr for KeyEvent {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = name.split('+').collect();
        // A trailing empty part means the key itself is '+'.
        let key = match parts.pop() {
            Some("") if name.ends_with('+') => {
                parts.pop();
                "+"
            }
            Some(key) => key,
            None => return Err(format!("empty key name {name:?}")),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers = modifiers.union(match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(format!("unknown modifier {other:?} in {name:?}")),
            });
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(ch), None) => KeyCode::Char(ch),
            _ => match key.to_ascii_lowercase().as_str() {
                "enter" | "return" => KeyCode::Enter,
                "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
                "tab" => KeyCode::Tab,
                "backtab" => KeyCode::BackTab,
                "esc" | "escape" => KeyCode::Esc,
                "backspace" => KeyCode::Backspace,
                "delete" | "del" => KeyCode::Delete,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "pageup" => KeyCode::PageUp,
                "pagedown" => KeyCode::PageDown,
                "space" => KeyCode::Char(' '),
                _ => return Err(format!("unknown key {name:?}")),
            },
        };
        Ok(KeyEvent::new(code, modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_crossterm_events() {
        let event = CrosstermKeyEvent::new(
            CrosstermKeyCode::Char('w'),
            CrosstermKeyModifiers::CONTROL | CrosstermKeyModifiers::SHIFT,
        );
        let mapped = KeyEvent::from(event);
        assert_eq!(mapped.code, KeyCode::Char('w'));
        assert!(mapped.modifiers.contains(KeyModifiers::CONTROL));
        assert!(mapped.modifiers.contains(KeyModifiers::SHIFT));
        assert!(!mapped.modifiers.contains(KeyModifiers::ALT));

        let insert = CrosstermKeyEvent::new(CrosstermKeyCode::Insert, CrosstermKeyModifiers::NONE);
        assert_eq!(KeyEvent::from(insert).code, KeyCode::Unknown);
    }

    #[test]
    fn parses_script_key_names() {
        assert_eq!("down".parse(), Ok(KeyEvent::plain(KeyCode::Down)));
        assert_eq!("Enter".parse(), Ok(KeyEvent::plain(KeyCode::Enter)));
        assert_eq!(
            "ctrl+w".parse(),
            Ok(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            "shift+tab".parse(),
            Ok(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
        );
        assert_eq!("+".parse(), Ok(KeyEvent::plain(KeyCode::Char('+'))));
        assert_eq!(
            "alt++".parse(),
            Ok(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::ALT))
        );
        assert!("hyper+x".parse::<KeyEvent>().is_err());
        assert!("f13".parse::<KeyEvent>().is_err());
    }
}
