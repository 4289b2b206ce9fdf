//! SlotInput - the editable text of one slot with its cursor.

/// Editable text of the trailing input or of a focused term slot
///
/// Single line: line breaks are dropped on insert. The cursor is a
/// character offset into the text, `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotInput {
    text: String,
    cursor: usize,
}

fn accepts(ch: char) -> bool {
    ch != '\n' && ch != '\r'
}

impl SlotInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input holding `text` with the cursor at its end
    pub fn from_text(text: &str) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text without surrounding whitespace
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.len()
    }

    /// Byte offset of the character at `offset`, or the text length past the end
    fn byte_at(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl SlotInput {
    /// Move cursor left by one character; false when already at the start
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move cursor right by one character; false when already at the end
    pub fn move_right(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl SlotInput {
    /// Insert a character at the cursor; false for line breaks
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !accepts(ch) {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        true
    }

    /// Insert text at the cursor, dropping line breaks
    pub fn insert_text(&mut self, text: &str) -> bool {
        let mut inserted = false;
        for ch in text.chars() {
            inserted |= self.insert_char(ch);
        }
        inserted
    }

    /// Delete character before cursor (Backspace)
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.text.remove(self.byte_at(self.cursor));
        true
    }

    /// Delete character after cursor (Delete key)
    pub fn delete_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.text.remove(self.byte_at(self.cursor));
        true
    }

    /// Empty the text, cursor back to 0
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Set the content, replacing everything; the cursor moves to the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().filter(|&c| accepts(c)).collect();
        self.cursor = self.len();
    }
}
