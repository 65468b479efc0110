//! Keybar configuration.
//!
//! Every field has a default, so hosts can deserialize a partial object
//! (e.g. from a JS options bag) and only override what they need.

use std::time::Duration;

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::keyboard::DEFAULT_KEYBOARD_THRESHOLD;
use crate::layout::LayoutConfig;
use crate::toolbar::{DEFAULT_SYMBOLS, DEFAULT_TAB, Toolbar};

/// Default wait for a native paste event, in milliseconds.
pub const DEFAULT_PASTE_TIMEOUT_MS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeybarConfig {
    /// Height difference (px) that counts as a visible keyboard.
    pub keyboard_threshold: f64,
    /// How long to wait for a native paste event.
    pub paste_timeout_ms: u32,
    /// Text inserted by the Tab button.
    pub tab_text: SmolStr,
    /// Symbol palette, in display order.
    pub symbols: Vec<SmolStr>,
    pub layout: LayoutConfig,
}

impl Default for KeybarConfig {
    fn default() -> Self {
        Self {
            keyboard_threshold: DEFAULT_KEYBOARD_THRESHOLD,
            paste_timeout_ms: DEFAULT_PASTE_TIMEOUT_MS,
            tab_text: SmolStr::new_static(DEFAULT_TAB),
            symbols: DEFAULT_SYMBOLS.iter().map(SmolStr::new).collect(),
            layout: LayoutConfig::default(),
        }
    }
}

impl KeybarConfig {
    pub fn paste_timeout(&self) -> Duration {
        Duration::from_millis(self.paste_timeout_ms.into())
    }

    /// Check values the rest of the crate assumes are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.keyboard_threshold.is_finite() || self.keyboard_threshold < 0.0 {
            return Err(ConfigError::Threshold(self.keyboard_threshold));
        }
        if self.paste_timeout_ms == 0 {
            return Err(ConfigError::PasteTimeout);
        }
        if self.tab_text.is_empty() {
            return Err(ConfigError::EmptyTab);
        }
        for (index, symbol) in self.symbols.iter().enumerate() {
            if symbol.is_empty() {
                return Err(ConfigError::EmptySymbol { index });
            }
            if self.symbols[..index].contains(symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol.to_string()));
            }
        }
        if !self.layout.vertical_offset.is_finite() {
            return Err(ConfigError::VerticalOffset(self.layout.vertical_offset));
        }
        Ok(())
    }

    /// Build a toolbar with this palette.
    pub fn toolbar(&self) -> Toolbar {
        Toolbar::new(self.symbols.iter().cloned(), self.tab_text.clone())
    }
}
