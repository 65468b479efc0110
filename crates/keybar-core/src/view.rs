//! Editor-view contract and reference implementation.
//!
//! `EditorView` is the narrow surface the dispatcher drives: document
//! queries, the current selection, the scroll offset of the render surface,
//! transaction dispatch, focus and history. The rendering engine behind it
//! stays opaque.
//!
//! `PlainView<T>` implements the contract over any `TextBuffer + UndoManager`,
//! for native hosts and tests.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::Range;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::text::TextBuffer;
use crate::text_helpers::word_range_at;
use crate::types::{Selection, Transaction};
use crate::undo::UndoManager;

/// The editor surface driven by the action dispatcher.
pub trait EditorView {
    /// Document type with a line index.
    type Doc: TextBuffer + ?Sized;

    /// Current document.
    fn doc(&self) -> &Self::Doc;

    /// Current main selection.
    fn selection(&self) -> Selection;

    /// Vertical scroll offset of the render surface.
    fn scroll_top(&self) -> f64;

    /// Set the vertical scroll offset of the render surface.
    fn set_scroll_top(&mut self, top: f64);

    /// Apply a transaction.
    ///
    /// Callers only pass offsets within `[0, doc_len]`.
    fn dispatch(&mut self, tx: Transaction);

    /// Move input focus to the text surface.
    fn focus(&mut self);

    /// Step history back. Returns false if there was nothing to undo.
    fn undo(&mut self) -> bool;

    /// Step history forward. Returns false if there was nothing to redo.
    fn redo(&mut self) -> bool;

    // === Provided ===

    /// Word range containing `offset`, per the view's word rule.
    fn word_at(&self, offset: usize) -> Option<Range<usize>> {
        word_range_at(self.doc(), offset)
    }

    /// Document length in chars.
    fn doc_len(&self) -> usize {
        self.doc().len_chars()
    }

    /// Slice the document.
    fn slice(&self, range: Range<usize>) -> Option<SmolStr> {
        self.doc().slice(range)
    }

    /// Text covered by the current selection (empty when collapsed).
    fn selected_text(&self) -> SmolStr {
        let sel = self.selection();
        self.slice(sel.to_range()).unwrap_or_default()
    }
}

/// Shared, attachable handle to an editor view.
///
/// The toolbar side holds a handle before the editor is mounted. Deferred
/// callbacks (scroll restore, paste) re-borrow through the handle when they
/// fire, so they see whatever view is attached at that moment.
pub struct ViewHandle<V> {
    slot: Rc<RefCell<Option<V>>>,
}

impl<V> Clone for ViewHandle<V> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<V> Default for ViewHandle<V> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<V> ViewHandle<V> {
    /// A handle with no view attached yet.
    pub fn detached() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// A handle with `view` already attached.
    pub fn new(view: V) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(view))),
        }
    }

    /// Attach a view, returning the previous one.
    pub fn attach(&self, view: V) -> Option<V> {
        self.slot.borrow_mut().replace(view)
    }

    /// Detach and return the current view.
    pub fn detach(&self) -> Option<V> {
        self.slot.borrow_mut().take()
    }

    pub fn is_attached(&self) -> bool {
        self.slot.try_borrow().map_or(true, |slot| slot.is_some())
    }

    /// Run `f` against the attached view.
    ///
    /// Returns None when detached, or when the view is mutably borrowed
    /// (an event fired synchronously from inside a dispatch).
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.slot.try_borrow().ok()?.as_ref().map(f)
    }

    /// Run `f` against the attached view mutably. Returns None when
    /// detached or already borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.slot.try_borrow_mut().ok()?.as_mut().map(f)
    }

    /// Borrow the attached view. None when detached or mutably borrowed.
    pub fn borrow(&self) -> Option<Ref<'_, V>> {
        Ref::filter_map(self.slot.try_borrow().ok()?, Option::as_ref).ok()
    }

    /// Mutably borrow the attached view. None when detached or borrowed.
    pub fn borrow_mut(&self) -> Option<RefMut<'_, V>> {
        RefMut::filter_map(self.slot.try_borrow_mut().ok()?, Option::as_mut).ok()
    }
}

/// Pixel height the reference view assumes for one line.
pub const PLAIN_LINE_HEIGHT: f64 = 20.0;

/// Simple field-based implementation of `EditorView`.
///
/// Scrolling is modelled per line: when a transaction asks to be scrolled
/// into view, the surface jumps so the head's line is at the top.
#[derive(Clone)]
pub struct PlainView<T: TextBuffer + UndoManager> {
    buffer: T,
    selection: Selection,
    scroll_top: f64,
    focused: bool,
    dispatched: usize,
}

impl<T: TextBuffer + UndoManager + Default> Default for PlainView<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: TextBuffer + UndoManager> PlainView<T> {
    /// Create a new view with the cursor at the start.
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            selection: Selection::default(),
            scroll_top: 0.0,
            focused: false,
            dispatched: 0,
        }
    }

    /// Builder: start with this selection (clamped).
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection.clamp(self.buffer.len_chars());
        self
    }

    /// Builder: start scrolled to `top`.
    pub fn with_scroll_top(mut self, top: f64) -> Self {
        self.scroll_top = top;
        self
    }

    /// Full content as a String.
    pub fn content_string(&self) -> String {
        self.buffer.to_string()
    }

    /// Whether the text surface currently holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Simulate focus moving elsewhere (e.g. a paste proxy input).
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Number of transactions applied so far.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched
    }

    /// Direct access to the buffer.
    pub fn inner(&self) -> &T {
        &self.buffer
    }
}

impl<T: TextBuffer + UndoManager> EditorView for PlainView<T> {
    type Doc = T;

    fn doc(&self) -> &T {
        &self.buffer
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = top;
    }

    fn dispatch(&mut self, tx: Transaction) {
        self.dispatched += 1;

        if let Some(change) = tx.change {
            let len = self.buffer.len_chars();
            let from = change.from.min(len);
            let to = change.to.clamp(from, len);
            self.buffer.replace(from..to, &change.insert);
        }

        if let Some(selection) = tx.selection {
            self.selection = selection.clamp(self.buffer.len_chars());
        } else {
            self.selection = self.selection.clamp(self.buffer.len_chars());
        }

        if tx.scroll_into_view {
            let line = self.buffer.line_at(self.selection.head);
            self.scroll_top = (line.number - 1) as f64 * PLAIN_LINE_HEIGHT;
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn undo(&mut self) -> bool {
        match self.buffer.undo() {
            Some(caret) => {
                self.selection = Selection::cursor(caret.min(self.buffer.len_chars()));
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.buffer.redo() {
            Some(caret) => {
                self.selection = Selection::cursor(caret.min(self.buffer.len_chars()));
                true
            }
            None => false,
        }
    }
}
