//! Search field editing (pure state transitions).
//!
//! Holds the text exactly as typed plus a cursor measured in characters, so
//! multi-byte input such as "violão" edits correctly. Editing methods return
//! whether the value changed, which is when the caller forwards it to the
//! search controller.

/// Editable single-line text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `value`, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Field contents.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    /// Insert `ch` at the cursor and advance the cursor.
    pub fn insert_char(&mut self, ch: char) -> bool {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    /// Move cursor left by one character. Saturates at 0.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right by one character. Saturates at the end.
    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    /// Move the cursor to the start.
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor past the last character.
    pub fn cursor_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Empty the buffer. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        changed
    }
}
