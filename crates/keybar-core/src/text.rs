//! Text buffer abstraction for editor storage.
//!
//! The `TextBuffer` trait is the offset-addressable document an `EditorView`
//! exposes: char offsets plus a derivable line index. `EditorRope` is the
//! ropey-backed implementation used by the reference view.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

use crate::types::Line;

/// A text buffer that supports editing, slicing and line lookup.
///
/// All offsets are in Unicode scalar values (chars), not bytes or UTF-16.
pub trait TextBuffer {
    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Number of lines. An empty buffer has one (empty) line.
    fn len_lines(&self) -> usize;

    /// 0-based index of the line containing `char_offset`.
    ///
    /// Offsets past the end resolve to the last line.
    fn char_to_line(&self, char_offset: usize) -> usize;

    /// Char offset where 0-based line `line_idx` starts.
    fn line_to_char(&self, line_idx: usize) -> usize;

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        if !char_range.is_empty() {
            self.delete(char_range.clone());
        }
        if !text.is_empty() {
            self.insert(char_range.start, text);
        }
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get character at offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;

    // === Provided: line index ===

    /// The line containing `offset`, clamped to the document.
    fn line_at(&self, offset: usize) -> Line {
        let offset = offset.min(self.len_chars());
        self.line_by_index(self.char_to_line(offset))
    }

    /// Line by 1-based number. None when out of range.
    fn line(&self, number: usize) -> Option<Line> {
        if number == 0 || number > self.len_lines() {
            return None;
        }
        Some(self.line_by_index(number - 1))
    }

    /// Total number of lines (1-based count, same as `len_lines`).
    fn lines(&self) -> usize {
        self.len_lines()
    }

    #[doc(hidden)]
    fn line_by_index(&self, idx: usize) -> Line {
        let from = self.line_to_char(idx);
        let next = if idx + 1 < self.len_lines() {
            self.line_to_char(idx + 1)
        } else {
            self.len_chars()
        };

        // Strip the terminator: "\n" or "\r\n".
        let mut to = next;
        if to > from && self.char_at(to - 1) == Some('\n') {
            to -= 1;
            if to > from && self.char_at(to - 1) == Some('\r') {
                to -= 1;
            }
        }

        Line {
            number: idx + 1,
            from,
            to,
        }
    }
}

/// Ropey-backed text buffer for local editing.
///
/// Provides O(log n) editing operations, offset conversions and line lookup.
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    /// Create a new empty rope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from string.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }

    /// Get a reference to the underlying rope (for advanced operations).
    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    // Ropey counts a trailing line break as opening an extra empty line,
    // which matches how a view engine numbers lines.
    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn char_to_line(&self, char_offset: usize) -> usize {
        self.rope.char_to_line(char_offset.min(self.rope.len_chars()))
    }

    fn line_to_char(&self, line_idx: usize) -> usize {
        self.rope.line_to_char(line_idx.min(self.rope.len_lines()))
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.rope.remove(char_range);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for EditorRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for EditorRope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}
