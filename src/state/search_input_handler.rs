//! Search input handling (pure state transitions).
//!
//! The cursor counts characters, not bytes, so multi-byte input edits
//! cleanly. All functions are pure - no side effects, testable without TUI.

/// Text typed into the search bar plus the cursor position within it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBuffer {
    text: String,
    /// Character index in `0..=text.chars().count()`.
    cursor: usize,
}

impl SearchBuffer {
    /// Buffer holding `text` with the cursor at its end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut buffer: SearchBuffer, ch: char) -> SearchBuffer {
    let at = buffer.byte_index(buffer.cursor);
    buffer.text.insert(at, ch);
    buffer.cursor += 1;
    buffer
}

/// Delete the character before the cursor, if any.
pub fn handle_backspace(mut buffer: SearchBuffer) -> SearchBuffer {
    if buffer.cursor == 0 {
        return buffer;
    }
    let at = buffer.byte_index(buffer.cursor - 1);
    buffer.text.remove(at);
    buffer.cursor -= 1;
    buffer
}

/// Delete the character under the cursor, if any.
pub fn handle_delete(mut buffer: SearchBuffer) -> SearchBuffer {
    if buffer.cursor >= buffer.char_len() {
        return buffer;
    }
    let at = buffer.byte_index(buffer.cursor);
    buffer.text.remove(at);
    buffer
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut buffer: SearchBuffer) -> SearchBuffer {
    buffer.cursor = buffer.cursor.saturating_sub(1);
    buffer
}

/// Move cursor right by one position. Saturates at the end of the text.
pub fn handle_cursor_right(mut buffer: SearchBuffer) -> SearchBuffer {
    buffer.cursor = (buffer.cursor + 1).min(buffer.char_len());
    buffer
}

/// Move cursor to the start.
pub fn handle_cursor_home(mut buffer: SearchBuffer) -> SearchBuffer {
    buffer.cursor = 0;
    buffer
}

/// Move cursor to the end.
pub fn handle_cursor_end(mut buffer: SearchBuffer) -> SearchBuffer {
    buffer.cursor = buffer.char_len();
    buffer
}

/// Empty the buffer.
pub fn handle_clear(_buffer: SearchBuffer) -> SearchBuffer {
    SearchBuffer::default()
}

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
