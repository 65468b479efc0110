//! keybar-core: input coordination for touch code editors, without
//! framework dependencies.
//!
//! This crate provides:
//! - `KeyboardMonitor` - virtual keyboard detection from viewport geometry
//! - `layout::adjust` - keyboard-avoiding container geometry
//! - `ActionDispatcher` - toolbar commands applied to an `EditorView`
//! - `Toolbar` - two-mode symbol/navigation toolbar state
//!
//! Platform access (clipboard, frames, viewport events) goes through the
//! traits in `platform`; keybar-browser implements them for web-sys.

pub mod actions;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod execute;
pub mod keyboard;
pub mod layout;
pub mod platform;
pub mod text;
pub mod text_helpers;
pub mod toolbar;
pub mod types;
pub mod undo;
pub mod view;

pub use actions::{Command, Token};
pub use config::KeybarConfig;
pub use dispatcher::ActionDispatcher;
pub use error::{ClipboardError, ConfigError, PlatformError, UnknownCommand};
pub use execute::{Resolved, insert_transaction, resolve_command};
pub use keyboard::{DEFAULT_KEYBOARD_THRESHOLD, KeyboardMonitor, classify, classify_sample};
pub use layout::{AvoidBehavior, ContainerGeometry, LayoutConfig};
pub use platform::{
    ClipboardPlatform, FrameScheduler, PasteCallback, PasteCapability, ReadCallback, Subscription,
    ViewportSample, ViewportSource,
};
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
pub use toolbar::{Button, ButtonGroup, ButtonSpec, DragTracker, DragVerdict, Toolbar, ToolbarMode, ToolbarState};
pub use types::{Change, KeyboardState, Line, Selection, Transaction};
pub use undo::{UndoManager, UndoableBuffer};
pub use view::{EditorView, PlainView, ViewHandle};
