//! Editable text of a picker input.

use crate::runtime::TextAction;

/// One input box. `dirty` is set by typing and cleared whenever the text is
/// replaced from the selection or committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
    dirty: bool,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Replaces the text without marking it as typed.
    pub fn sync(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = char_count(&self.value);
        self.dirty = false;
    }

    pub fn insert_char(&mut self, ch: char) {
        let pos = clamp_cursor(self.cursor, &self.value);
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.insert(byte_pos, ch);
        self.cursor = pos + 1;
        self.dirty = true;
    }

    pub fn backspace(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos == 0 {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos - 1);
        self.value.remove(byte_pos);
        self.cursor = pos - 1;
        self.dirty = true;
        true
    }

    pub fn delete(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos == char_count(&self.value) {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.remove(byte_pos);
        self.cursor = pos;
        self.dirty = true;
        true
    }

    pub fn delete_word_left(&mut self) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let pos = self.cursor.min(chars.len());
        let mut start = pos;
        while start > 0 && is_separator(chars[start - 1]) {
            start -= 1;
        }
        while start > 0 && !is_separator(chars[start - 1]) {
            start -= 1;
        }
        if start == pos {
            return false;
        }
        chars.drain(start..pos);
        self.value = chars.into_iter().collect();
        self.cursor = start;
        self.dirty = true;
        true
    }

    pub fn clear(&mut self) {
        let was_empty = self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        self.dirty |= !was_empty;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = char_count(&self.value);
    }

    /// Applies an editing action; returns whether the field changed.
    pub fn apply(&mut self, action: TextAction) -> bool {
        match action {
            TextAction::Insert(ch) => {
                self.insert_char(ch);
                true
            }
            TextAction::Backspace => self.backspace(),
            TextAction::Delete => self.delete(),
            TextAction::DeleteWordLeft => self.delete_word_left(),
            TextAction::Clear => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            TextAction::Home => {
                self.move_home();
                false
            }
            TextAction::End => {
                self.move_end();
                false
            }
        }
    }
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}

fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '/' | '-' | ':' | ',')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::TextField;
    use crate::runtime::TextAction;

    fn typed(text: &str) -> TextField {
        let mut field = TextField::default();
        text.chars().for_each(|ch| field.insert_char(ch));
        field
    }

    #[test]
    fn typing_marks_dirty_and_sync_cleans() {
        let mut field = typed("1399/06/10");
        assert_eq!(field.value(), "1399/06/10");
        assert!(field.is_dirty());
        field.sync("1399/06/10 - 1399/06/15");
        assert!(!field.is_dirty());
        assert_eq!(field.cursor(), 23);
    }

    #[test]
    fn edits_at_cursor() {
        let mut field = typed("۱۳۹۹/۶");
        field.move_home();
        field.insert_char('x');
        assert_eq!(field.value(), "x۱۳۹۹/۶");
        field.move_end();
        assert!(field.backspace());
        assert_eq!(field.value(), "x۱۳۹۹/");
    }

    #[test]
    fn delete_removes_after_cursor() {
        let mut field = typed("1399/06/10");
        assert!(!field.apply(TextAction::Delete));
        field.move_home();
        assert!(field.apply(TextAction::Delete));
        assert_eq!(field.value(), "399/06/10");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn delete_word_left_stops_at_separator() {
        let mut field = typed("1399/06/10");
        assert!(field.delete_word_left());
        assert_eq!(field.value(), "1399/06/");
        assert!(field.delete_word_left());
        assert_eq!(field.value(), "1399/");
    }

    #[test]
    fn clearing_empty_field_stays_clean() {
        let mut field = TextField::default();
        field.clear();
        assert!(!field.is_dirty());
        let mut field = typed("1");
        field.sync("");
        field.sync("abc");
        field.clear();
        assert!(field.is_dirty());
    }

    #[test]
    fn apply_reports_changes() {
        let mut field = TextField::default();
        assert!(field.apply(TextAction::Insert('1')));
        assert!(!field.apply(TextAction::Home));
        assert!(!field.apply(TextAction::Backspace));
        assert!(!field.apply(TextAction::End));
        assert_eq!(field.cursor(), 1);
        assert!(field.apply(TextAction::Clear));
        assert!(!field.apply(TextAction::Clear));
    }
}
