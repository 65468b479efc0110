//! `visualViewport` observation and container styling.

use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{HtmlElement, Window};

use keybar_core::{ContainerGeometry, PlatformError, Subscription, ViewportSample, ViewportSource};

/// Viewport geometry from a browser window.
pub struct BrowserViewport {
    window: Window,
}

impl BrowserViewport {
    /// Viewport of the global window, if there is one.
    pub fn new() -> Option<Self> {
        web_sys::window().map(Self::from_window)
    }

    pub fn from_window(window: Window) -> Self {
        Self { window }
    }
}

/// Listeners registered by `BrowserViewport::subscribe`. Dropping removes them.
struct ViewportListeners {
    _listeners: [EventListener; 3],
}

impl Subscription for ViewportListeners {}

impl ViewportSource for BrowserViewport {
    fn sample(&self) -> Option<ViewportSample> {
        let window_height = match self.window.inner_height() {
            Ok(h) => h.as_f64().filter(|h| h.is_finite() && *h > 0.0),
            Err(e) => {
                tracing::warn!("window.innerHeight unreadable: {:?}", e);
                None
            }
        }?;
        Some(ViewportSample {
            window_height,
            visual_height: self
                .window
                .visual_viewport()
                .map(|v| v.height())
                .filter(|h| *h > 0.0),
        })
    }

    fn subscribe(&self, on_change: Rc<dyn Fn()>) -> Option<Box<dyn Subscription>> {
        let visual = self.window.visual_viewport()?;
        let listen = |target: &web_sys::EventTarget, event: &'static str| {
            let on_change = Rc::clone(&on_change);
            EventListener::new(target, event, move |_| on_change())
        };

        Some(Box::new(ViewportListeners {
            _listeners: [
                listen(&visual, "resize"),
                listen(&visual, "scroll"),
                listen(&self.window, "resize"),
            ],
        }))
    }
}

/// Write `geometry` onto `element`'s inline style.
///
/// Fields that are `None` are removed, so switching behaviours doesn't leave
/// stale declarations behind.
pub fn apply_geometry(element: &HtmlElement, geometry: &ContainerGeometry) -> Result<(), PlatformError> {
    let px = |v: Option<f64>| v.map(|v| format!("{v}px"));
    let declarations = [
        ("height", px(geometry.height)),
        ("max-height", px(geometry.max_height)),
        ("transform", geometry.translate_y.map(|y| format!("translateY({y}px)"))),
        ("padding-bottom", px(geometry.padding_bottom)),
        ("transition", geometry.transition.map(str::to_string)),
    ];

    let style = element.style();
    for (property, value) in declarations {
        let result = match value {
            Some(value) => style.set_property(property, &value),
            None => style.remove_property(property).map(|_| ()),
        };
        result.map_err(|e| PlatformError(format!("style {property}: {e:?}")))?;
    }
    Ok(())
}
