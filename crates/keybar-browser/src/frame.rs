//! `requestAnimationFrame` scheduling.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use keybar_core::FrameScheduler;

/// Runs callbacks on the next animation frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window for requestAnimationFrame, running callback now");
            callback();
            return;
        };

        let closure = Closure::once(move || callback());
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            tracing::warn!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }
}
