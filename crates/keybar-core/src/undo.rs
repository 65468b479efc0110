//! Undo/redo history for the reference editor view.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `UndoableBuffer<T>` - wraps a TextBuffer and provides undo/redo
//!
//! The dispatcher never touches history storage directly; it only asks the
//! view to step its history. This module exists so `PlainView` has one.

use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

use crate::text::TextBuffer;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns the caret offset after the reverted edit,
    /// or None if there was nothing to undo.
    fn undo(&mut self) -> Option<usize>;

    /// Perform redo. Returns the caret offset after the reapplied edit,
    /// or None if there was nothing to redo.
    fn redo(&mut self) -> Option<usize>;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// A recorded edit operation for undo/redo.
#[derive(Debug, Clone)]
struct EditOperation {
    /// Character position where edit occurred
    pos: usize,
    /// Text that was deleted (empty for pure insertions)
    deleted: SmolStr,
    /// Text that was inserted (empty for pure deletions)
    inserted: SmolStr,
}

/// A TextBuffer wrapper that tracks edits and provides undo/redo.
///
/// All mutations go through this wrapper, which records them for undo.
#[derive(Clone)]
pub struct UndoableBuffer<T> {
    buffer: T,
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_steps: usize,
}

impl<T: TextBuffer + Default> Default for UndoableBuffer<T> {
    fn default() -> Self {
        Self::new(T::default(), 100)
    }
}

impl<T: TextBuffer> UndoableBuffer<T> {
    /// Create a new undoable buffer wrapping the given buffer.
    pub fn new(buffer: T, max_steps: usize) -> Self {
        Self {
            buffer,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    /// Get a reference to the inner buffer.
    pub fn inner(&self) -> &T {
        &self.buffer
    }

    fn record_op(&mut self, pos: usize, deleted: &str, inserted: &str) {
        if deleted.is_empty() && inserted.is_empty() {
            return;
        }
        self.redo_stack.clear();

        self.undo_stack.push(EditOperation {
            pos,
            deleted: deleted.to_smolstr(),
            inserted: inserted.to_smolstr(),
        });

        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }
}

impl<T: TextBuffer> TextBuffer for UndoableBuffer<T> {
    fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.buffer.len_lines()
    }

    fn char_to_line(&self, char_offset: usize) -> usize {
        self.buffer.char_to_line(char_offset)
    }

    fn line_to_char(&self, line_idx: usize) -> usize {
        self.buffer.line_to_char(line_idx)
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.record_op(char_offset, "", text);
        self.buffer.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let deleted = self.buffer.slice(char_range.clone()).unwrap_or_default();
        self.record_op(char_range.start, &deleted, "");
        self.buffer.delete(char_range);
    }

    // One history step per replacement, so a toolbar insert over a
    // selection undoes in a single press.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let deleted = self.buffer.slice(char_range.clone()).unwrap_or_default();
        self.record_op(char_range.start, &deleted, text);
        if !char_range.is_empty() {
            self.buffer.delete(char_range.clone());
        }
        if !text.is_empty() {
            self.buffer.insert(char_range.start, text);
        }
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        self.buffer.slice(char_range)
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        self.buffer.char_at(char_offset)
    }

    fn to_string(&self) -> String {
        self.buffer.to_string()
    }
}

impl<T: TextBuffer> UndoManager for UndoableBuffer<T> {
    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo(&mut self) -> Option<usize> {
        let op = self.undo_stack.pop()?;

        // Apply inverse: delete what was inserted, insert what was deleted
        let inserted_chars = op.inserted.chars().count();
        if inserted_chars > 0 {
            self.buffer.delete(op.pos..op.pos + inserted_chars);
        }
        if !op.deleted.is_empty() {
            self.buffer.insert(op.pos, &op.deleted);
        }

        let caret = op.pos + op.deleted.chars().count();
        self.redo_stack.push(op);
        Some(caret)
    }

    fn redo(&mut self) -> Option<usize> {
        let op = self.redo_stack.pop()?;

        let deleted_chars = op.deleted.chars().count();
        if deleted_chars > 0 {
            self.buffer.delete(op.pos..op.pos + deleted_chars);
        }
        if !op.inserted.is_empty() {
            self.buffer.insert(op.pos, &op.inserted);
        }

        let caret = op.pos + op.inserted.chars().count();
        self.undo_stack.push(op);
        Some(caret)
    }

    fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorRope;

    #[test]
    fn test_insert_undo_redo() {
        let mut buf = UndoableBuffer::new(EditorRope::from_str("hello"), 100);
        assert!(!buf.can_undo());

        buf.insert(5, " world");
        assert_eq!(buf.to_string(), "hello world");

        assert_eq!(buf.undo(), Some(5));
        assert_eq!(buf.to_string(), "hello");
        assert!(buf.can_redo());

        assert_eq!(buf.redo(), Some(11));
        assert_eq!(buf.to_string(), "hello world");
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_replace_is_one_step() {
        let mut buf = UndoableBuffer::new(EditorRope::from_str("hello world"), 100);

        buf.replace(6..11, "rust");
        assert_eq!(buf.to_string(), "hello rust");

        assert_eq!(buf.undo(), Some(11));
        assert_eq!(buf.to_string(), "hello world");
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buf = UndoableBuffer::new(EditorRope::from_str("abc"), 100);

        buf.insert(3, "d");
        assert!(buf.undo().is_some());
        assert!(buf.can_redo());

        buf.insert(3, "e");
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_max_steps() {
        let mut buf = UndoableBuffer::new(EditorRope::new(), 3);

        buf.insert(0, "a");
        buf.insert(1, "b");
        buf.insert(2, "c");
        buf.insert(3, "d"); // evicts "a"

        assert!(buf.undo().is_some());
        assert!(buf.undo().is_some());
        assert!(buf.undo().is_some());
        assert_eq!(buf.undo(), None);
        assert_eq!(buf.to_string(), "a");
    }
}
