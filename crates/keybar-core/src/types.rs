//! Core editor types: selection, lines, transactions, keyboard state.
//!
//! These types are framework-agnostic and shared between the dispatcher,
//! the toolbar and any `EditorView` implementation.

use std::ops::Range;

use smol_str::SmolStr;

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `from()` and `to()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Fixed end of the selection
    pub anchor: usize,
    /// End that moves under navigation and extension
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn cursor(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Lower bound of the selection.
    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper bound of the selection.
    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (empty, cursor only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the selection length.
    pub fn len(&self) -> usize {
        self.to() - self.from()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.from()..self.to()
    }

    /// Check if the selection is backwards (head before anchor).
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    /// Clamp both ends into `[0, len]`.
    pub fn clamp(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}

/// One line of the document, excluding its terminator.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Char offset of the first character
    pub from: usize,
    /// Char offset just before the line terminator (or end of doc)
    pub to: usize,
}

impl Line {
    /// Number of chars in the line, terminator excluded.
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// A text replacement over a char range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub from: usize,
    pub to: usize,
    pub insert: SmolStr,
}

/// A single mutation request against an `EditorView`.
///
/// Mirrors what a view engine accepts in one dispatch: an optional text
/// replacement, an optional new selection, and whether the engine may
/// scroll the result into view on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub change: Option<Change>,
    pub selection: Option<Selection>,
    pub scroll_into_view: bool,
}

impl Transaction {
    /// A selection-only transaction.
    pub fn select(selection: Selection) -> Self {
        Self {
            change: None,
            selection: Some(selection),
            scroll_into_view: false,
        }
    }

    /// Replace `range` with `text` and collapse the cursor after the insert.
    pub fn replace(range: Range<usize>, text: impl Into<SmolStr>) -> Self {
        let insert: SmolStr = text.into();
        let caret = range.start + insert.chars().count();
        Self {
            change: Some(Change {
                from: range.start,
                to: range.end,
                insert,
            }),
            selection: Some(Selection::cursor(caret)),
            scroll_into_view: false,
        }
    }

    /// Allow or suppress the engine's own scroll-into-view.
    pub fn with_scroll_into_view(mut self, scroll: bool) -> Self {
        self.scroll_into_view = scroll;
        self
    }
}

/// Virtual keyboard state derived from one viewport sample.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct KeyboardState {
    pub visible: bool,
    /// Height taken by the keyboard, 0 when hidden
    pub keyboard_height: f64,
    /// Height left for content
    pub viewport_height: f64,
}

impl KeyboardState {
    /// State reported when no keyboard is detected.
    pub fn hidden(window_height: f64) -> Self {
        Self {
            visible: false,
            keyboard_height: 0.0,
            viewport_height: window_height,
        }
    }

    /// Human-readable readout for a status header.
    pub fn status_lines(&self) -> [String; 2] {
        [
            format!("Visible area: {}px", self.viewport_height.round()),
            format!("Keyboard height: {}px", self.keyboard_height.round()),
        ]
    }
}
