//! `<textarea>`-backed editor view.
//!
//! The textarea owns the text and its native undo stack; the view keeps a
//! rope mirror for line and word queries. DOM selection offsets are UTF-16
//! code units and are converted to char offsets at this boundary.

use gloo_events::EventListener;
use web_sys::HtmlTextAreaElement;

use keybar_core::{EditorRope, EditorView, Selection, TextBuffer, Transaction, ViewHandle};

use crate::dom::{exec_command, exec_command_with_value};

pub struct TextareaView {
    element: HtmlTextAreaElement,
    mirror: EditorRope,
}

impl TextareaView {
    pub fn new(element: HtmlTextAreaElement) -> Self {
        let mirror = EditorRope::from_str(&element.value());
        Self { element, mirror }
    }

    pub fn element(&self) -> &HtmlTextAreaElement {
        &self.element
    }

    /// Re-read the textarea's value into the mirror.
    pub fn sync_from_dom(&mut self) {
        let value = self.element.value();
        if value != self.mirror.to_string() {
            self.mirror = EditorRope::from_str(&value);
        }
    }

    /// Keep the mirror current as the user types. Dropping the listener stops it.
    pub fn track_input(handle: &ViewHandle<TextareaView>) -> Option<EventListener> {
        let element = handle.with(|v| v.element.clone())?;
        let handle = handle.clone();
        Some(EventListener::new(&element, "input", move |_| {
            handle.with_mut(|v| v.sync_from_dom());
        }))
    }

    fn to_utf16(&self, offset: usize) -> u32 {
        let rope = self.mirror.rope();
        let cu = rope.char_to_utf16_cu(offset.min(rope.len_chars()));
        u32::try_from(cu).unwrap_or(u32::MAX)
    }

    fn from_utf16(&self, cu: u32) -> usize {
        let rope = self.mirror.rope();
        let cu = (cu as usize).min(rope.len_utf16_cu());
        rope.utf16_cu_to_char(cu)
    }

    fn replace_range(&mut self, from: usize, to: usize, text: &str) {
        let (start, end) = (self.to_utf16(from), self.to_utf16(to));
        // execCommand edits whatever has focus; the paste proxy may still hold it.
        self.focus();
        if let Err(e) = self.element.set_selection_range(start, end) {
            tracing::warn!("set_selection_range failed: {:?}", e);
        }

        // execCommand keeps the edit on the textarea's native undo stack.
        let native = if text.is_empty() {
            exec_command("delete")
        } else {
            exec_command_with_value("insertText", text)
        };
        match native {
            Ok(true) => {}
            other => {
                tracing::debug!(?other, "execCommand edit unavailable, using setRangeText");
                if let Err(e) = self.element.set_range_text_with_start_and_end(text, start, end) {
                    tracing::warn!("setRangeText failed: {:?}", e);
                }
            }
        }
        self.sync_from_dom();
    }

    fn history(&mut self, command: &str) -> bool {
        let applied = match exec_command(command) {
            Ok(applied) => applied,
            Err(e) => {
                tracing::debug!("{e}");
                false
            }
        };
        self.sync_from_dom();
        applied
    }
}

impl EditorView for TextareaView {
    type Doc = EditorRope;

    fn doc(&self) -> &EditorRope {
        &self.mirror
    }

    fn selection(&self) -> Selection {
        let start = self.element.selection_start().ok().flatten().unwrap_or(0);
        let end = self.element.selection_end().ok().flatten().unwrap_or(start);
        let (start, end) = (self.from_utf16(start), self.from_utf16(end));
        let backward = self.element.selection_direction().ok().flatten().as_deref() == Some("backward");
        if backward {
            Selection::new(end, start)
        } else {
            Selection::new(start, end)
        }
    }

    fn scroll_top(&self) -> f64 {
        f64::from(self.element.scroll_top())
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.element.set_scroll_top(top.round() as i32);
    }

    fn dispatch(&mut self, tx: Transaction) {
        if let Some(change) = tx.change {
            let len = self.mirror.len_chars();
            let from = change.from.min(len);
            let to = change.to.clamp(from, len);
            self.replace_range(from, to, &change.insert);
        }

        if let Some(selection) = tx.selection {
            let selection = selection.clamp(self.mirror.len_chars());
            let (start, end) = (self.to_utf16(selection.from()), self.to_utf16(selection.to()));
            let direction = if selection.is_backwards() { "backward" } else { "forward" };
            if let Err(e) = self.element.set_selection_range_with_direction(start, end, direction) {
                tracing::warn!("set_selection_range failed: {:?}", e);
            }
        }
    }

    fn focus(&mut self) {
        if let Err(e) = self.element.focus() {
            tracing::warn!("textarea focus failed: {:?}", e);
        }
    }

    fn undo(&mut self) -> bool {
        self.history("undo")
    }

    fn redo(&mut self) -> bool {
        self.history("redo")
    }
}
