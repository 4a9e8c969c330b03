use crate::runtime::command::{FocusMove, PickerCommand, TextAction};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, PickerCommand>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: PickerCommand) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    /// Bound command for `event`. Unbound printable characters become text
    /// input.
    pub fn resolve(&self, event: KeyEvent) -> Option<PickerCommand> {
        if let Some(command) = self.bindings.get(&KeyBinding::from_event(event)) {
            return Some(*command);
        }
        match event.code {
            KeyCode::Char(ch)
                if !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(PickerCommand::Text(TextAction::Insert(ch)))
            }
            _ => None,
        }
    }

    fn install_defaults(&mut self) {
        for (code, step) in [
            (KeyCode::Left, FocusMove::Left),
            (KeyCode::Right, FocusMove::Right),
            (KeyCode::Up, FocusMove::Up),
            (KeyCode::Down, FocusMove::Down),
        ] {
            self.bind(KeyBinding::key(code), PickerCommand::MoveFocus(step));
        }
        self.bind(KeyBinding::key(KeyCode::Enter), PickerCommand::Enter);
        self.bind(KeyBinding::ctrl(KeyCode::Enter), PickerCommand::Submit);
        self.bind(KeyBinding::ctrl(KeyCode::Char('s')), PickerCommand::Submit);
        self.bind(KeyBinding::key(KeyCode::Esc), PickerCommand::Close);
        self.bind(KeyBinding::ctrl(KeyCode::Char('o')), PickerCommand::Open);
        self.bind(KeyBinding::ctrl(KeyCode::Delete), PickerCommand::Clear);
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('l')),
            PickerCommand::SwitchLocale,
        );
        self.bind(KeyBinding::key(KeyCode::PageUp), PickerCommand::ShowMonth(-1));
        self.bind(KeyBinding::key(KeyCode::PageDown), PickerCommand::ShowMonth(1));
        self.bind(KeyBinding::shift(KeyCode::PageUp), PickerCommand::ShowMonth(-12));
        self.bind(KeyBinding::shift(KeyCode::PageDown), PickerCommand::ShowMonth(12));
        self.bind(
            KeyBinding::alt(KeyCode::Up),
            PickerCommand::AdjustTime { hours: 1, minutes: 0 },
        );
        self.bind(
            KeyBinding::alt(KeyCode::Down),
            PickerCommand::AdjustTime { hours: -1, minutes: 0 },
        );
        self.bind(
            KeyBinding::shift(KeyCode::Up),
            PickerCommand::AdjustTime { hours: 0, minutes: 1 },
        );
        self.bind(
            KeyBinding::shift(KeyCode::Down),
            PickerCommand::AdjustTime { hours: 0, minutes: -1 },
        );
        self.bind(KeyBinding::key(KeyCode::Tab), PickerCommand::NextInput);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            PickerCommand::PrevInput,
        );
        self.bind(
            KeyBinding::key(KeyCode::Backspace),
            PickerCommand::Text(TextAction::Backspace),
        );
        self.bind(
            KeyBinding::key(KeyCode::Delete),
            PickerCommand::Text(TextAction::Delete),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Backspace),
            PickerCommand::Text(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('w')),
            PickerCommand::Text(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('u')),
            PickerCommand::Text(TextAction::Clear),
        );
        self.bind(KeyBinding::key(KeyCode::Home), PickerCommand::Text(TextAction::Home));
        self.bind(KeyBinding::key(KeyCode::End), PickerCommand::Text(TextAction::End));
    }
}
