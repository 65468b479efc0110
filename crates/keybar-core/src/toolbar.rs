//! On-screen input toolbar.
//!
//! Two modes share one strip: a symbol palette that inserts text and a
//! navigation pad that emits commands. A sticky "selecting" toggle turns
//! horizontal moves into selection extension.
//!
//! Rendering is left to the host: `Toolbar::buttons` lists what is visible,
//! `Toolbar::press` turns a pressed button into a `Token` for the dispatcher.

use smol_str::SmolStr;

use crate::actions::{Command, Token};

/// Default symbol palette: punctuation used across C-family languages.
pub const DEFAULT_SYMBOLS: [&str; 31] = [
    "{", "}", "(", ")", "[", "]", ";", ":", ",", ".", "=", "+", "-", "*", "/", "<", ">", "!", "?",
    "|", "&", "%", "\"", "'", "`", "#", "@", "$", "^", "_", "~",
];

/// Text inserted by the Tab button.
pub const DEFAULT_TAB: &str = "  ";

/// Which half of the toolbar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarMode {
    #[default]
    Symbols,
    Nav,
}

/// Toolbar mode plus the selecting toggle.
///
/// Only changed through `set_mode` and `toggle_selecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarState {
    mode: ToolbarMode,
    selecting: bool,
}

impl ToolbarState {
    pub fn mode(&self) -> ToolbarMode {
        self.mode
    }

    pub fn selecting(&self) -> bool {
        self.selecting
    }

    /// Switch modes. `selecting` survives the switch.
    pub fn set_mode(&mut self, mode: ToolbarMode) {
        self.mode = mode;
    }

    /// Flip the selecting flag. Only has an effect in `Nav` mode; returns
    /// whether it flipped.
    pub fn toggle_selecting(&mut self) -> bool {
        if self.mode != ToolbarMode::Nav {
            return false;
        }
        self.selecting = !self.selecting;
        true
    }
}

/// A pressable toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Mode(ToolbarMode),
    ToggleSelecting,
    Tab,
    Symbol(SmolStr),
    Nav(Command),
}

/// Visual group a button belongs to, for spacing between clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonGroup {
    Modes,
    Palette,
    Arrows,
    Edit,
    History,
}

/// A visible button with its label and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub button: Button,
    pub label: SmolStr,
    pub group: ButtonGroup,
    /// Highlighted (current mode, active selecting toggle)
    pub active: bool,
}

const NAV_LAYOUT: [(Command, &str, ButtonGroup); 10] = [
    (Command::Left, "←", ButtonGroup::Arrows),
    (Command::Down, "↓", ButtonGroup::Arrows),
    (Command::Up, "↑", ButtonGroup::Arrows),
    (Command::Right, "→", ButtonGroup::Arrows),
    (Command::SelectWord, "Word", ButtonGroup::Edit),
    (Command::SelectLine, "Line", ButtonGroup::Edit),
    (Command::Copy, "Copy", ButtonGroup::Edit),
    (Command::Paste, "Paste", ButtonGroup::Edit),
    (Command::Undo, "Undo", ButtonGroup::History),
    (Command::Redo, "Redo", ButtonGroup::History),
];

/// Toolbar controller: state plus palette.
#[derive(Debug, Clone)]
pub struct Toolbar {
    state: ToolbarState,
    symbols: Vec<SmolStr>,
    tab: SmolStr,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS.iter().map(|s| SmolStr::new(s)), DEFAULT_TAB)
    }
}

impl Toolbar {
    pub fn new(symbols: impl IntoIterator<Item = SmolStr>, tab: impl Into<SmolStr>) -> Self {
        Self {
            state: ToolbarState::default(),
            symbols: symbols.into_iter().collect(),
            tab: tab.into(),
        }
    }

    pub fn state(&self) -> &ToolbarState {
        &self.state
    }

    pub fn symbols(&self) -> &[SmolStr] {
        &self.symbols
    }

    /// Handle a button press, returning the token to dispatch, if any.
    ///
    /// Buttons that don't belong to the current mode are ignored.
    pub fn press(&mut self, button: &Button) -> Option<Token> {
        match (button, self.state.mode) {
            (Button::Mode(mode), _) => {
                self.state.set_mode(*mode);
                None
            }
            (Button::ToggleSelecting, _) => {
                self.state.toggle_selecting();
                None
            }
            (Button::Tab, ToolbarMode::Symbols) => Some(Token::Insert(self.tab.clone())),
            (Button::Symbol(s), ToolbarMode::Symbols) => Some(Token::Insert(s.clone())),
            (Button::Nav(cmd), ToolbarMode::Nav) => self.translate(*cmd).map(Token::Command),
            (button, mode) => {
                tracing::debug!(?button, ?mode, "ignoring button outside its mode");
                None
            }
        }
    }

    /// Apply the selecting rewrite to a nav command.
    fn translate(&self, cmd: Command) -> Option<Command> {
        if !(self.state.selecting && cmd.is_directional()) {
            return Some(cmd);
        }
        let extended = cmd.extending();
        if extended.is_none() {
            tracing::debug!(%cmd, "no selection-extending form, ignoring while selecting");
        }
        extended
    }

    /// Buttons visible in the current state, in display order.
    pub fn buttons(&self) -> Vec<ButtonSpec> {
        let mode = self.state.mode;
        let mut out = vec![
            ButtonSpec {
                button: Button::Mode(ToolbarMode::Symbols),
                label: SmolStr::new_static("Symbols"),
                group: ButtonGroup::Modes,
                active: mode == ToolbarMode::Symbols,
            },
            ButtonSpec {
                button: Button::Mode(ToolbarMode::Nav),
                label: SmolStr::new_static("Navigation"),
                group: ButtonGroup::Modes,
                active: mode == ToolbarMode::Nav,
            },
        ];

        match mode {
            ToolbarMode::Symbols => {
                out.push(ButtonSpec {
                    button: Button::Tab,
                    label: SmolStr::new_static("Tab"),
                    group: ButtonGroup::Palette,
                    active: false,
                });
                out.extend(self.symbols.iter().map(|s| ButtonSpec {
                    button: Button::Symbol(s.clone()),
                    label: s.clone(),
                    group: ButtonGroup::Palette,
                    active: false,
                }));
            }
            ToolbarMode::Nav => {
                let selecting = self.state.selecting;
                out.push(ButtonSpec {
                    button: Button::ToggleSelecting,
                    label: SmolStr::new_static(if selecting { "Selecting..." } else { "Select Mode" }),
                    group: ButtonGroup::Modes,
                    active: selecting,
                });
                out.extend(NAV_LAYOUT.into_iter().map(|(cmd, label, group)| ButtonSpec {
                    button: Button::Nav(cmd),
                    label: SmolStr::new_static(label),
                    group,
                    active: false,
                }));
            }
        }

        out
    }
}

/// How a drag on the toolbar strip should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragVerdict {
    /// Horizontal swipe: let the strip scroll.
    Allow,
    /// Mostly vertical: suppress so the page doesn't scroll.
    Block,
}

/// Tracks a single-finger drag over the toolbar strip.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    origin: Option<(f64, f64)>,
}

impl DragTracker {
    /// Begin tracking. Multi-touch gestures are not tracked.
    pub fn start(&mut self, touches: usize, x: f64, y: f64) -> bool {
        self.origin = (touches == 1).then_some((x, y));
        self.origin.is_some()
    }

    /// Judge a move relative to where the drag started.
    pub fn moved(&self, x: f64, y: f64) -> DragVerdict {
        let Some((x0, y0)) = self.origin else {
            return DragVerdict::Allow;
        };
        if (y - y0).abs() > (x - x0).abs() {
            DragVerdict::Block
        } else {
            DragVerdict::Allow
        }
    }

    pub fn end(&mut self) {
        self.origin = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}
