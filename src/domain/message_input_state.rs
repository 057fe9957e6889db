//! Line editor behind the chat input field.

use unicode_width::UnicodeWidthChar;

/// Upper bound on composed text, in characters.
const MAX_INPUT_CHARS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageInputState {
    chars: Vec<char>,
    /// Cursor as a character index into `chars`.
    cursor: usize,
}

impl MessageInputState {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal columns occupied by the text left of the cursor.
    pub fn cursor_columns(&self) -> usize {
        self.chars[..self.cursor]
            .iter()
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    /// Returns false when the field is full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.chars.len() >= MAX_INPUT_CHARS {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }
}
