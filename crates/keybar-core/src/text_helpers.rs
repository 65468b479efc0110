//! Text navigation helpers.
//!
//! These functions work with the `TextBuffer` trait to provide the word
//! boundary rule and vertical cursor movement used by the dispatcher.

use std::ops::Range;

use crate::text::TextBuffer;

/// Default word-character rule: alphanumerics and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find the word range touching `offset`.
///
/// The offset may sit inside a word or directly at either edge of one.
/// Returns None when neither neighbouring char is a word char.
pub fn word_range_at<B: TextBuffer + ?Sized>(buf: &B, offset: usize) -> Option<Range<usize>> {
    let len = buf.len_chars();
    let offset = offset.min(len);

    let mut start = offset;
    while start > 0 {
        match buf.char_at(start - 1) {
            Some(c) if is_word_char(c) => start -= 1,
            _ => break,
        }
    }

    let mut end = offset;
    while end < len {
        match buf.char_at(end) {
            Some(c) if is_word_char(c) => end += 1,
            _ => break,
        }
    }

    (start < end).then_some(start..end)
}

/// Offset at the same column on a line `delta` lines away from `head`.
///
/// The column clamps to the target line's length. Returns None when the
/// target line does not exist (moving up from the first line, down from
/// the last).
pub fn vertical_target<B: TextBuffer + ?Sized>(buf: &B, head: usize, delta: isize) -> Option<usize> {
    let line = buf.line_at(head);
    let target_number = line.number.checked_add_signed(delta)?;
    let target = buf.line(target_number)?;
    let column = head.min(line.to) - line.from;
    Some((target.from + column).min(target.to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorRope;

    #[test]
    fn test_word_inside_and_at_edges() {
        let rope = EditorRope::from_str("let foo_bar = 42;");
        assert_eq!(word_range_at(&rope, 5), Some(4..11));
        assert_eq!(word_range_at(&rope, 4), Some(4..11));
        assert_eq!(word_range_at(&rope, 11), Some(4..11));
        assert_eq!(word_range_at(&rope, 15), Some(14..16));
    }

    #[test]
    fn test_no_word_between_symbols() {
        let rope = EditorRope::from_str("a = (  );");
        assert_eq!(word_range_at(&rope, 3), None);
        assert_eq!(word_range_at(&rope, 6), None);
    }

    #[test]
    fn test_vertical_target_clamps_column() {
        let rope = EditorRope::from_str("abcdef\nxy\nlonger line");
        // Column 5 on line 1 -> line 2 only has 2 chars.
        assert_eq!(vertical_target(&rope, 5, 1), Some(9));
        // Column 2 on line 2 -> line 3 keeps column.
        assert_eq!(vertical_target(&rope, 9, 1), Some(12));
        assert_eq!(vertical_target(&rope, 12, -1), Some(9));
        assert_eq!(vertical_target(&rope, 3, -1), None);
        assert_eq!(vertical_target(&rope, 12, 1), None);
    }
}
