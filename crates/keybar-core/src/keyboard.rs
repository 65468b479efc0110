//! Virtual keyboard detection.
//!
//! A virtual keyboard shrinks the visual viewport without changing the outer
//! window height. Comparing the two tells us whether a keyboard is up and how
//! much room it takes. Browser chrome (address bar hide/show) causes smaller
//! deltas, so anything at or below the threshold counts as "no keyboard".

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::{Subscription, ViewportSample, ViewportSource};
use crate::types::KeyboardState;

/// Height difference (px) above which the keyboard is considered visible.
pub const DEFAULT_KEYBOARD_THRESHOLD: f64 = 150.0;

/// Classify one viewport sample.
pub fn classify(window_height: f64, visual_height: f64, threshold: f64) -> KeyboardState {
    let height_diff = window_height - visual_height;
    if height_diff > threshold {
        KeyboardState {
            visible: true,
            keyboard_height: height_diff,
            viewport_height: visual_height,
        }
    } else {
        KeyboardState::hidden(window_height)
    }
}

/// Classify a sample, falling back to "hidden" without a visual viewport.
pub fn classify_sample(sample: ViewportSample, threshold: f64) -> KeyboardState {
    match sample.visual_height {
        Some(visual) => classify(sample.window_height, visual, threshold),
        None => KeyboardState::hidden(sample.window_height),
    }
}

type Observer = Rc<dyn Fn(KeyboardState)>;

struct MonitorInner {
    state: KeyboardState,
    observers: Vec<Observer>,
}

/// Live keyboard monitor bound to a `ViewportSource`.
///
/// Holds the source's event subscription for as long as it lives; dropping
/// the monitor unregisters every geometry listener.
pub struct KeyboardMonitor {
    inner: Rc<RefCell<MonitorInner>>,
    subscription: Option<Box<dyn Subscription>>,
}

impl KeyboardMonitor {
    /// Sample once and start observing geometry changes.
    ///
    /// Without a visual viewport this reports the hidden state for the
    /// window height and registers nothing. Returns None when the source
    /// cannot be sampled at all.
    pub fn start<S>(source: Rc<S>, threshold: f64) -> Option<Self>
    where
        S: ViewportSource + 'static,
    {
        let Some(first) = source.sample() else {
            tracing::warn!("viewport geometry unavailable, keyboard monitor not started");
            return None;
        };
        let initial = classify_sample(first, threshold);

        let inner = Rc::new(RefCell::new(MonitorInner {
            state: initial,
            observers: Vec::new(),
        }));

        if first.visual_height.is_none() {
            tracing::warn!("visual viewport unavailable, keyboard detection disabled");
            return Some(Self {
                inner,
                subscription: None,
            });
        }

        tracing::debug!(
            window_height = first.window_height,
            visual_height = ?first.visual_height,
            visible = initial.visible,
            "initial viewport sample"
        );

        let weak_inner = Rc::downgrade(&inner);
        let weak_source = Rc::downgrade(&source);
        let on_change: Rc<dyn Fn()> = Rc::new(move || {
            let (Some(inner), Some(source)) = (weak_inner.upgrade(), weak_source.upgrade()) else {
                return;
            };
            match source.sample() {
                Some(sample) => Self::apply(&inner, sample, threshold),
                None => tracing::warn!("viewport sample failed, keeping previous keyboard state"),
            }
        });

        let subscription = source.subscribe(on_change);
        if subscription.is_none() {
            tracing::warn!("could not subscribe to viewport events");
        }

        Some(Self {
            inner,
            subscription,
        })
    }

    fn apply(inner: &Rc<RefCell<MonitorInner>>, sample: ViewportSample, threshold: f64) {
        let next = classify_sample(sample, threshold);
        tracing::debug!(
            window_height = sample.window_height,
            visual_height = ?sample.visual_height,
            keyboard_height = next.keyboard_height,
            visible = next.visible,
            "viewport update"
        );

        // Observers run after the borrow ends so they may read the monitor.
        let changed = {
            let mut guard = inner.borrow_mut();
            let changed = guard.state != next;
            guard.state = next;
            changed
        };

        if changed {
            // Snapshot, so an observer may register another observer.
            let observers = inner.borrow().observers.clone();
            for observer in observers {
                observer(next);
            }
        }
    }

    /// Current keyboard state.
    pub fn state(&self) -> KeyboardState {
        self.inner.borrow().state
    }

    /// Whether geometry events are being observed.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Call `observer` with every state change.
    pub fn on_change(&self, observer: impl Fn(KeyboardState) + 'static) {
        self.inner.borrow_mut().observers.push(Rc::new(observer));
    }

    /// Stop observing. Equivalent to dropping the monitor, but keeps the
    /// last state readable.
    pub fn stop(&mut self) {
        self.subscription = None;
    }
}
