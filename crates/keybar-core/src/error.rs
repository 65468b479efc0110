//! Error types for keybar.
//!
//! None of these escape the dispatcher or the keyboard monitor; they exist
//! so platform code can describe what went wrong before it is logged and
//! dropped.

use miette::Diagnostic;
use thiserror::Error;

/// A command name outside the toolbar vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown toolbar command `{0}`")]
pub struct UnknownCommand(pub String);

/// Clipboard access failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClipboardError {
    /// The platform has no usable clipboard path.
    #[error("clipboard unavailable")]
    Unavailable,

    /// The platform refused the request (permissions, no user gesture).
    #[error("clipboard request rejected: {0}")]
    Rejected(String),
}

/// Error type for platform operations.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum ConfigError {
    #[error("keyboard threshold must be a finite, non-negative pixel value (got {0})")]
    #[diagnostic(
        code(keybar::config::threshold),
        help("browser chrome typically changes height by less than 150px")
    )]
    Threshold(f64),

    #[error("paste timeout must be greater than zero")]
    #[diagnostic(code(keybar::config::paste_timeout))]
    PasteTimeout,

    #[error("tab text must not be empty")]
    #[diagnostic(code(keybar::config::tab_text))]
    EmptyTab,

    #[error("symbol palette entry {index} is empty")]
    #[diagnostic(code(keybar::config::symbols))]
    EmptySymbol { index: usize },

    #[error("symbol `{0}` appears more than once in the palette")]
    #[diagnostic(code(keybar::config::symbols), help("each toolbar button needs a unique symbol"))]
    DuplicateSymbol(String),

    #[error("vertical offset must be finite (got {0})")]
    #[diagnostic(code(keybar::config::vertical_offset))]
    VerticalOffset(f64),
}
