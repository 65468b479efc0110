//! Toolbar gesture handling.
//!
//! Toolbar buttons act on `pointerdown` and suppress the default so the
//! editor keeps focus and no callout appears on the button. The strip
//! itself lets horizontal swipes scroll it but stops vertical drags from
//! scrolling the page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, TouchEvent};

use keybar_core::{DragTracker, DragVerdict};

use crate::dom::defer_drop;

/// Call `on_press` on pointerdown, without moving focus or starting a selection.
pub fn press_listener(button: &EventTarget, mut on_press: impl FnMut() + 'static) -> EventListener {
    EventListener::new_with_options(
        button,
        "pointerdown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            event.stop_propagation();
            on_press();
        },
    )
}

fn first_touch(event: &web_sys::Event) -> Option<(usize, f64, f64)> {
    let touches = event.dyn_ref::<TouchEvent>()?.touches();
    let first = touches.get(0)?;
    Some((
        touches.length() as usize,
        f64::from(first.client_x()),
        f64::from(first.client_y()),
    ))
}

/// Drag handling for the toolbar strip. Dropping it removes every listener.
pub struct StripGestures {
    _touch_start: EventListener,
    // touchmove + touchend, only while a drag is tracked
    active: Rc<RefCell<Option<[EventListener; 2]>>>,
}

impl StripGestures {
    pub fn attach(strip: &EventTarget) -> Self {
        let active: Rc<RefCell<Option<[EventListener; 2]>>> = Rc::new(RefCell::new(None));
        let tracker = Rc::new(RefCell::new(DragTracker::default()));

        let target = strip.clone();
        let slot = Rc::clone(&active);
        let touch_start = EventListener::new(strip, "touchstart", move |event| {
            let Some((count, x, y)) = first_touch(event) else {
                return;
            };
            if !tracker.borrow_mut().start(count, x, y) {
                return;
            }

            let move_tracker = Rc::clone(&tracker);
            let on_move = EventListener::new_with_options(
                &target,
                "touchmove",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some((_, x, y)) = first_touch(event) else {
                        return;
                    };
                    if move_tracker.borrow().moved(x, y) == DragVerdict::Block {
                        event.prevent_default();
                    }
                },
            );

            let end_tracker = Rc::clone(&tracker);
            let end_slot = Rc::clone(&slot);
            let on_end = EventListener::new(&target, "touchend", move |_| {
                end_tracker.borrow_mut().end();
                if let Some(listeners) = end_slot.borrow_mut().take() {
                    defer_drop(listeners);
                }
            });

            // A new drag replaces listeners left over from one that never ended.
            if let Some(stale) = slot.borrow_mut().replace([on_move, on_end]) {
                defer_drop(stale);
            }
        });

        Self {
            _touch_start: touch_start,
            active,
        }
    }

    /// Whether a drag is currently tracked.
    pub fn is_dragging(&self) -> bool {
        self.active.borrow().is_some()
    }
}
