//! Action dispatcher.
//!
//! The command interface between the toolbar and the editor view:
//! `insert_text` and `execute_action`. Every mutation is requested without
//! scroll-into-view; the scroll offset captured beforehand is put back on
//! the next frame, once the view has laid out the change, and the text
//! surface is refocused.
//!
//! Nothing here returns an error. A detached view, a missing clipboard or a
//! paste that never arrives all end the same way: no mutation, focus back on
//! the editor.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use crate::actions::{Command, Token};
use crate::config::{DEFAULT_PASTE_TIMEOUT_MS, KeybarConfig};
use crate::error::ClipboardError;
use crate::execute::{Resolved, insert_transaction, resolve_command};
use crate::platform::{ClipboardPlatform, FrameScheduler, PasteCallback, PasteCapability};
use crate::types::Selection;
use crate::view::{EditorView, ViewHandle};

/// Drives an attachable `EditorView` from toolbar tokens.
pub struct ActionDispatcher<V> {
    view: ViewHandle<V>,
    clipboard: Rc<dyn ClipboardPlatform>,
    frames: Rc<dyn FrameScheduler>,
    paste_timeout: Duration,
    // Bumped per paste request; completions carrying an older value are stale.
    paste_generation: Rc<Cell<u64>>,
}

impl<V> Clone for ActionDispatcher<V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            clipboard: Rc::clone(&self.clipboard),
            frames: Rc::clone(&self.frames),
            paste_timeout: self.paste_timeout,
            paste_generation: Rc::clone(&self.paste_generation),
        }
    }
}

impl<V: EditorView + 'static> ActionDispatcher<V> {
    pub fn new(
        view: ViewHandle<V>,
        clipboard: Rc<dyn ClipboardPlatform>,
        frames: Rc<dyn FrameScheduler>,
    ) -> Self {
        Self {
            view,
            clipboard,
            frames,
            paste_timeout: Duration::from_millis(DEFAULT_PASTE_TIMEOUT_MS.into()),
            paste_generation: Rc::new(Cell::new(0)),
        }
    }

    /// Apply dispatcher settings from `config`.
    pub fn with_config(mut self, config: &KeybarConfig) -> Self {
        self.paste_timeout = config.paste_timeout();
        self
    }

    pub fn with_paste_timeout(mut self, timeout: Duration) -> Self {
        self.paste_timeout = timeout;
        self
    }

    /// The view handle this dispatcher drives.
    pub fn view(&self) -> &ViewHandle<V> {
        &self.view
    }

    /// Route one toolbar token.
    pub fn dispatch(&self, token: Token) {
        match token {
            Token::Insert(text) => self.insert_text(&text),
            Token::Command(cmd) => self.execute_action(cmd),
        }
    }

    /// Replace the selection with `text` and put the cursor after it.
    pub fn insert_text(&self, text: &str) {
        let Some(mut view) = self.view.borrow_mut() else {
            tracing::debug!("insert_text with no view available");
            return;
        };

        let scroll_top = view.scroll_top();
        let tx = insert_transaction(view.selection(), view.doc_len(), text);
        view.dispatch(tx);
        drop(view);

        self.restore_scroll(scroll_top);
        self.focus();
    }

    /// Execute one toolbar command.
    pub fn execute_action(&self, cmd: Command) {
        let Some(mut view) = self.view.borrow_mut() else {
            tracing::debug!(%cmd, "execute_action with no view available");
            return;
        };
        tracing::debug!(%cmd, "execute_action");

        let scroll_top = view.scroll_top();
        match resolve_command(&*view, cmd) {
            Resolved::Apply(tx) => view.dispatch(tx),
            Resolved::NoOp => {}
            Resolved::Effect(Command::Undo) => {
                view.undo();
            }
            Resolved::Effect(Command::Redo) => {
                view.redo();
            }
            Resolved::Effect(Command::Copy) => {
                let text = view.selected_text();
                if text.is_empty() {
                    tracing::debug!("copy with empty selection");
                } else {
                    // Legacy copy reads the selection of the focused surface.
                    view.focus();
                    self.copy(&text);
                }
            }
            Resolved::Effect(Command::Paste) => {
                let target = view.selection();
                drop(view);
                self.paste(target, scroll_top);
                return;
            }
            Resolved::Effect(other) => {
                tracing::warn!(cmd = %other, "unexpected effect command");
            }
        }
        drop(view);

        self.restore_scroll(scroll_top);
        self.focus();
    }

    /// Async clipboard write first; legacy copy when it's missing or rejected.
    fn copy(&self, text: &str) {
        let legacy = {
            let clipboard = Rc::clone(&self.clipboard);
            move || {
                if let Err(e) = clipboard.legacy_copy() {
                    tracing::warn!("legacy copy failed: {e}");
                }
            }
        };

        if !self.clipboard.supports_async_write() {
            legacy();
            return;
        }

        let on_rejected = {
            let legacy = legacy.clone();
            Box::new(move || {
                tracing::debug!("clipboard write rejected, falling back to legacy copy");
                legacy();
            })
        };
        if let Err(e) = self.clipboard.write_text(text, on_rejected) {
            tracing::debug!("clipboard write unavailable ({e}), using legacy copy");
            legacy();
        }
    }

    /// Paste into `target`, the selection at request time.
    fn paste(&self, target: Selection, scroll_top: f64) {
        let generation = self.paste_generation.get().wrapping_add(1);
        self.paste_generation.set(generation);

        let done = self.paste_completion(generation, target, scroll_top);
        match self.clipboard.paste_capability() {
            PasteCapability::Direct => self.read_direct(generation, done),
            PasteCapability::Proxy => self.clipboard.capture_paste(self.paste_timeout, done),
            PasteCapability::Unavailable => {
                tracing::debug!("no clipboard read path available");
                done(None);
            }
        }
    }

    /// Direct read; a rejected read retries through the paste proxy.
    fn read_direct(&self, generation: u64, done: PasteCallback) {
        let this = self.clone();
        let on_read = move |result: Result<String, ClipboardError>| match result {
            Ok(text) => done(Some(text)),
            Err(e) if this.paste_generation.get() == generation => {
                tracing::debug!("direct clipboard read failed ({e}), trying paste proxy");
                this.clipboard.capture_paste(this.paste_timeout, done);
            }
            Err(_) => done(None),
        };
        self.clipboard.read_text(Box::new(on_read));
    }

    fn paste_completion(
        &self,
        generation: u64,
        target: Selection,
        scroll_top: f64,
    ) -> PasteCallback {
        let this = self.clone();
        let requested_at = Instant::now();
        Box::new(move |text: Option<String>| {
            if this.paste_generation.get() != generation {
                tracing::debug!("dropping stale paste completion");
                return;
            }
            tracing::debug!(
                elapsed_ms = requested_at.elapsed().as_millis() as u64,
                received = text.is_some(),
                "paste completed"
            );

            match text.filter(|t| !t.is_empty()) {
                Some(text) => {
                    let applied = this
                        .view
                        .with_mut(|view| {
                            let tx = insert_transaction(target, view.doc_len(), &text);
                            view.dispatch(tx);
                        })
                        .is_some();
                    if applied {
                        this.restore_scroll(scroll_top);
                    }
                }
                None => tracing::debug!("paste produced no text"),
            }
            this.focus();
        })
    }

    /// Put the scroll offset back on the next frame.
    fn restore_scroll(&self, scroll_top: f64) {
        let view = self.view.clone();
        self.frames.request_frame(Box::new(move || {
            view.with_mut(|v| v.set_scroll_top(scroll_top));
        }));
    }

    fn focus(&self) {
        self.view.with_mut(|v| v.focus());
    }
}
