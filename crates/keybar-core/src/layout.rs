//! Keyboard-avoiding layout.
//!
//! Pure mapping from `KeyboardState` to the geometry of one container, so
//! content stays above the virtual keyboard.

use serde::Deserialize;

use crate::types::KeyboardState;

/// CSS transition applied when the container slides.
pub const TRANSFORM_TRANSITION: &str = "transform 0.25s ease-out";
/// CSS transition applied when bottom padding changes.
pub const PADDING_TRANSITION: &str = "padding-bottom 0.25s ease-out";

/// How the container makes room for the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvoidBehavior {
    /// Shrink the container to the visible viewport.
    #[default]
    #[serde(alias = "height")]
    Resize,
    /// Shift the container upward.
    #[serde(alias = "position")]
    Translate,
    /// Pad the bottom of the container.
    #[serde(alias = "padding")]
    Pad,
}

/// Layout adapter settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub behavior: AvoidBehavior,
    pub enabled: bool,
    /// Extra pixels already accounted for (fixed headers, etc.)
    pub vertical_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            behavior: AvoidBehavior::Resize,
            enabled: true,
            vertical_offset: 0.0,
        }
    }
}

/// Geometry for the container element. `None` fields are left to the base style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainerGeometry {
    pub height: Option<f64>,
    pub max_height: Option<f64>,
    /// Vertical translation in px; negative moves up
    pub translate_y: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub transition: Option<&'static str>,
}

impl ContainerGeometry {
    /// Render as an inline style declaration list.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(h) = self.height {
            decls.push(format!("height: {h}px"));
        }
        if let Some(h) = self.max_height {
            decls.push(format!("max-height: {h}px"));
        }
        if let Some(y) = self.translate_y {
            decls.push(format!("transform: translateY({y}px)"));
        }
        if let Some(p) = self.padding_bottom {
            decls.push(format!("padding-bottom: {p}px"));
        }
        if let Some(t) = self.transition {
            decls.push(format!("transition: {t}"));
        }
        decls.join("; ")
    }
}

/// Compute container geometry for the current keyboard state.
///
/// With `enabled = false` the caller's `base` comes back unchanged.
pub fn adjust(state: &KeyboardState, config: &LayoutConfig, base: &ContainerGeometry) -> ContainerGeometry {
    if !config.enabled {
        return base.clone();
    }

    let offset = config.vertical_offset;
    let overlap = (state.keyboard_height - offset).max(0.0);

    match config.behavior {
        AvoidBehavior::Resize => {
            let height = state.viewport_height - offset;
            ContainerGeometry {
                height: Some(height),
                max_height: Some(height),
                ..base.clone()
            }
        }
        AvoidBehavior::Translate => ContainerGeometry {
            // Written as 0 - overlap so a hidden keyboard gives 0, not -0.
            translate_y: Some(0.0 - overlap),
            transition: Some(TRANSFORM_TRANSITION),
            ..base.clone()
        },
        AvoidBehavior::Pad => ContainerGeometry {
            padding_bottom: Some(overlap),
            transition: Some(PADDING_TRANSITION),
            ..base.clone()
        },
    }
}
