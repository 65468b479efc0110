//! Browser DOM layer for keybar.
//!
//! This crate implements keybar-core's platform traits with web-sys. It
//! assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `viewport`: `visualViewport` observation and container styling
//! - `clipboard`: async Clipboard API, `execCommand` fallback, paste proxy
//! - `frame`: `requestAnimationFrame` scheduling for scroll restoration
//! - `gestures`: toolbar press and drag handling
//! - `textarea`: a `<textarea>`-backed `EditorView`
//! - `platform`: Browser/OS detection for choosing the paste path
//!
//! # Re-exports
//!
//! This crate re-exports `keybar-core` for convenience, so consumers
//! only need to depend on `keybar-browser`.

use std::rc::Rc;

use wasm_bindgen::JsValue;

// Re-export core crate
pub use keybar_core;
pub use keybar_core::*;

pub mod clipboard;
mod dom;
pub mod frame;
pub mod gestures;
pub mod platform;
pub mod textarea;
pub mod viewport;

pub use clipboard::BrowserClipboard;
pub use frame::RafScheduler;
pub use gestures::{StripGestures, press_listener};
pub use platform::{Platform, platform};
pub use textarea::TextareaView;
pub use viewport::{BrowserViewport, apply_geometry};

/// Read a `KeybarConfig` from a JS options object and validate it.
///
/// `undefined` and `null` give the defaults.
pub fn config_from_js(value: JsValue) -> Result<KeybarConfig, PlatformError> {
    let config = if value.is_undefined() || value.is_null() {
        KeybarConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| PlatformError(format!("invalid keybar options: {e}")))?
    };
    config
        .validate()
        .map_err(|e| PlatformError(e.to_string()))?;
    Ok(config)
}

/// Dispatcher wired to the browser clipboard and animation frames.
pub fn browser_dispatcher<V: EditorView + 'static>(
    view: ViewHandle<V>,
    clipboard: Rc<BrowserClipboard>,
    config: &KeybarConfig,
) -> ActionDispatcher<V> {
    ActionDispatcher::new(view, clipboard, Rc::new(RafScheduler)).with_config(config)
}

/// Keyboard monitor on the global window, if there is one.
pub fn window_keyboard_monitor(config: &KeybarConfig) -> Option<KeyboardMonitor> {
    let viewport = Rc::new(BrowserViewport::new()?);
    KeyboardMonitor::start(viewport, config.keyboard_threshold)
}
