//! Platform abstraction traits for the input-coordination layer.
//!
//! These traits define the interface between the dispatcher / keyboard
//! monitor and platform-specific implementations (browser DOM, native UI,
//! test doubles). All of them are single-threaded: callbacks are boxed
//! `FnOnce`/`Fn` without `Send`.

use std::rc::Rc;
use std::time::Duration;

use crate::error::ClipboardError;

/// Callback receiving pasted text, or None when nothing arrived in time.
pub type PasteCallback = Box<dyn FnOnce(Option<String>)>;

/// Callback receiving the result of a direct clipboard read.
pub type ReadCallback = Box<dyn FnOnce(Result<String, ClipboardError>)>;

/// How the platform can hand clipboard text to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteCapability {
    /// A clipboard read API the page may call directly.
    Direct,
    /// Only a native paste event, captured through a hidden focusable input.
    Proxy,
    /// No way to read the clipboard.
    Unavailable,
}

/// System clipboard access.
///
/// The dispatcher probes capabilities and picks a strategy; implementations
/// only provide the individual paths.
pub trait ClipboardPlatform {
    /// Whether an asynchronous text-write API exists.
    fn supports_async_write(&self) -> bool;

    /// Write `text` through the asynchronous API.
    ///
    /// Fire-and-forget: an `Err` means the request could not even be made.
    /// If the platform rejects it later, `on_rejected` runs instead.
    fn write_text(&self, text: &str, on_rejected: Box<dyn FnOnce()>) -> Result<(), ClipboardError>;

    /// Synchronous legacy copy of the focused surface's selection.
    fn legacy_copy(&self) -> Result<(), ClipboardError>;

    /// Which paste path is usable right now.
    fn paste_capability(&self) -> PasteCapability;

    /// Read text via the direct API. `done` runs exactly once.
    ///
    /// A denied or missing read reports an `Err`, after which the dispatcher
    /// retries through `capture_paste`.
    fn read_text(&self, done: ReadCallback);

    /// Capture the next native paste event through a proxy input.
    ///
    /// `done` runs exactly once: with the pasted text, or with None after
    /// `timeout`, or with None at once when there is no proxy. A new capture replaces any capture still pending, so only
    /// one proxy listener is ever registered.
    fn capture_paste(&self, timeout: Duration, done: PasteCallback);
}

/// Defers work to the next render frame.
pub trait FrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>);
}

/// One geometry reading from the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSample {
    /// Outer window (layout viewport) height
    pub window_height: f64,
    /// Visual viewport height, if the platform exposes one
    pub visual_height: Option<f64>,
}

/// A live event subscription. Dropping it unregisters every listener.
pub trait Subscription {}

/// Source of viewport geometry and geometry-change events.
pub trait ViewportSource {
    /// Read the current geometry. None when the platform cannot report a
    /// usable window height.
    fn sample(&self) -> Option<ViewportSample>;

    /// Register `on_change` for viewport resize, viewport scroll and window
    /// resize. Returns None if listeners cannot be registered.
    fn subscribe(&self, on_change: Rc<dyn Fn()>) -> Option<Box<dyn Subscription>>;
}
