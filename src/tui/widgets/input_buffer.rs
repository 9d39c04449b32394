//! Single-line text input with a char-boundary-safe cursor.
//!
//! The cursor is a byte offset that always sits on a char boundary, so
//! Devanagari and other multi-byte input edits cleanly.

#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Cursor column in chars, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
