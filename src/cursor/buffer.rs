use std::ops::Range;

use ropey::Rope;

/// Immutable text backed by a rope data structure.
///
/// Offsets are code-point (char) indices. Cloning is cheap and shares the
/// underlying storage, so any number of cursors can read the same text.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Create a buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of code points in the buffer.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the buffer holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The character at `offset`, or `None` outside `[0, len)`.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// The character at `offset - 1`, or `None` at offset 0.
    pub fn char_before(&self, offset: usize) -> Option<char> {
        offset.checked_sub(1).and_then(|prev| self.char_at(prev))
    }

    /// Extract `range` as an owned string.
    ///
    /// Both bounds are clamped to the buffer, and an inverted range yields
    /// an empty string.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field(
                "rope",
                &format_args!(
                    "Rope({} chars, {} lines)",
                    self.rope.len_chars(),
                    self.rope.len_lines()
                ),
            )
            .finish()
    }
}
