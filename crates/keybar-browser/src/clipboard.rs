//! Browser clipboard implementation.
//!
//! Implements `ClipboardPlatform` with three paths:
//! - the async Clipboard API (`navigator.clipboard`) for writes and direct reads,
//! - `document.execCommand("copy")` as the legacy copy,
//! - a hidden, focusable textarea that receives the native paste event when
//!   the page may not read the clipboard itself.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{ClipboardEvent, HtmlTextAreaElement};

use keybar_core::{
    ClipboardError, ClipboardPlatform, PasteCallback, PasteCapability, PlatformError, ReadCallback,
};

use crate::dom::{defer_drop, exec_command};
use crate::platform::{Platform, platform};

/// Inline style that keeps the proxy focusable but off-screen.
const PROXY_STYLE: &str =
    "position: absolute; left: -9999px; top: 0; width: 1px; height: 1px; opacity: 0";

/// A paste capture waiting for its event or its timeout.
struct PendingPaste {
    done: PasteCallback,
    listener: EventListener,
    timeout: Timeout,
}

type PasteSlot = Rc<RefCell<Option<PendingPaste>>>;

/// Resolve the pending capture, if any, and unregister its listener.
fn finish(slot: &PasteSlot, text: Option<String>) {
    let Some(pending) = slot.borrow_mut().take() else {
        return;
    };
    let PendingPaste {
        done,
        listener,
        timeout,
    } = pending;
    defer_drop((listener, timeout));
    done(text);
}

/// `navigator.clipboard`, if this context exposes it.
fn async_clipboard() -> Option<web_sys::Clipboard> {
    let navigator = web_sys::window()?.navigator();
    let value = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    value.dyn_into::<web_sys::Clipboard>().ok()
}

fn has_method(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|f| f.is_function())
        .unwrap_or(false)
}

/// Browser clipboard access for the action dispatcher.
pub struct BrowserClipboard {
    proxy: Option<HtmlTextAreaElement>,
    platform: Platform,
    pending: PasteSlot,
}

impl BrowserClipboard {
    /// Clipboard without a paste proxy (direct reads only).
    pub fn new() -> Self {
        Self {
            proxy: None,
            platform: platform().clone(),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Clipboard using `proxy` to capture native paste events.
    pub fn with_proxy(proxy: HtmlTextAreaElement) -> Self {
        Self {
            proxy: Some(proxy),
            ..Self::new()
        }
    }

    /// Create the hidden proxy textarea inside `parent` and use it.
    pub fn with_proxy_in(parent: &web_sys::Element) -> Result<Self, PlatformError> {
        Ok(Self::with_proxy(create_proxy(parent)?))
    }

    /// Override detected platform (for tests and embedding).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn proxy(&self) -> Option<&HtmlTextAreaElement> {
        self.proxy.as_ref()
    }

    /// Whether a paste capture is waiting for its event.
    pub fn is_capturing(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl Default for BrowserClipboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the off-screen textarea used as the paste proxy.
pub fn create_proxy(parent: &web_sys::Element) -> Result<HtmlTextAreaElement, PlatformError> {
    let document = parent.owner_document().ok_or("proxy parent has no document")?;
    let proxy = document
        .create_element("textarea")
        .map_err(|e| PlatformError(format!("create textarea: {e:?}")))?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| "created element is not a textarea")?;

    for (name, value) in [("style", PROXY_STYLE), ("aria-hidden", "true"), ("tabindex", "-1")] {
        proxy
            .set_attribute(name, value)
            .map_err(|e| PlatformError(format!("set {name}: {e:?}")))?;
    }
    parent
        .append_child(&proxy)
        .map_err(|e| PlatformError(format!("append proxy: {e:?}")))?;
    Ok(proxy)
}

impl ClipboardPlatform for BrowserClipboard {
    fn supports_async_write(&self) -> bool {
        async_clipboard().is_some_and(|c| has_method(&c, "writeText"))
    }

    fn write_text(&self, text: &str, on_rejected: Box<dyn FnOnce()>) -> Result<(), ClipboardError> {
        let clipboard = async_clipboard().ok_or(ClipboardError::Unavailable)?;
        let promise = clipboard.write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                tracing::debug!("clipboard writeText rejected: {:?}", e);
                on_rejected();
            }
        });
        Ok(())
    }

    fn legacy_copy(&self) -> Result<(), ClipboardError> {
        match exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::Rejected("execCommand(copy) refused".into())),
            Err(e) => Err(ClipboardError::Rejected(e.to_string())),
        }
    }

    fn paste_capability(&self) -> PasteCapability {
        let has_read_api = async_clipboard().is_some_and(|c| has_method(&c, "readText"));
        self.platform.paste_capability(self.proxy.is_some(), has_read_api)
    }

    fn read_text(&self, done: ReadCallback) {
        let Some(clipboard) = async_clipboard() else {
            done(Err(ClipboardError::Unavailable));
            return;
        };
        let promise = clipboard.read_text();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(value) => done(Ok(value.as_string().unwrap_or_default())),
                Err(e) => {
                    tracing::debug!("clipboard readText rejected: {:?}", e);
                    done(Err(ClipboardError::Rejected(format!("{e:?}"))));
                }
            }
        });
    }

    fn capture_paste(&self, timeout: Duration, done: PasteCallback) {
        // Only one proxy listener at a time.
        finish(&self.pending, None);

        let Some(proxy) = &self.proxy else {
            done(None);
            return;
        };

        proxy.set_value("");
        if let Err(e) = proxy.focus() {
            tracing::warn!("paste proxy focus failed: {:?}", e);
        }

        let slot = Rc::clone(&self.pending);
        let listener = EventListener::new_with_options(
            proxy,
            "paste",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let text = event
                    .dyn_ref::<ClipboardEvent>()
                    .and_then(|e| e.clipboard_data())
                    .and_then(|data| data.get_data("text/plain").ok());
                finish(&slot, text);
            },
        );

        let slot = Rc::clone(&self.pending);
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            tracing::debug!("paste proxy timed out");
            finish(&slot, None);
        });

        *self.pending.borrow_mut() = Some(PendingPaste {
            done,
            listener,
            timeout,
        });

        // Works where the focused proxy may receive a programmatic paste.
        // Elsewhere the user's native paste (or the timeout) resolves it.
        match exec_command("paste") {
            Ok(true) => {}
            Ok(false) => tracing::debug!("execCommand(paste) refused, waiting for native paste"),
            Err(e) => tracing::debug!("{e}"),
        }
    }
}
