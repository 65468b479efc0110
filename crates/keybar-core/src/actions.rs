//! Toolbar command vocabulary.
//!
//! `Command` is the closed set of symbolic actions the toolbar can emit.
//! `Token` is what a single toolbar press produces: either one of those
//! commands or literal text to insert.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::UnknownCommand;

/// All commands the action dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // === Navigation ===
    Left,
    Right,
    Up,
    Down,

    // === Selection ===
    SelectLeft,
    SelectRight,
    SelectWord,
    SelectLine,

    // === Clipboard ===
    Copy,
    Paste,

    // === History ===
    Undo,
    Redo,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::SelectLeft,
        Self::SelectRight,
        Self::SelectWord,
        Self::SelectLine,
        Self::Copy,
        Self::Paste,
        Self::Undo,
        Self::Redo,
    ];

    /// Kebab-case wire name, e.g. `select-left`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::SelectLeft => "select-left",
            Self::SelectRight => "select-right",
            Self::SelectWord => "select-word",
            Self::SelectLine => "select-line",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Whether this is one of the four arrow moves.
    pub fn is_directional(&self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }

    /// The selection-extending form of a directional command.
    ///
    /// Only horizontal moves have one; vertical extension is not part of
    /// the vocabulary.
    pub fn extending(&self) -> Option<Command> {
        match self {
            Self::Left => Some(Self::SelectLeft),
            Self::Right => Some(Self::SelectRight),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// One unit of toolbar output, consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text to insert over the current selection.
    Insert(SmolStr),
    /// A symbolic command.
    Command(Command),
}

impl From<Command> for Token {
    fn from(cmd: Command) -> Self {
        Token::Command(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.as_str().parse::<Command>(), Ok(cmd));
        }
        assert_eq!(Command::SelectWord.to_string(), "select-word");
    }

    #[test]
    fn test_unknown_command() {
        let err = "select-up".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "unknown toolbar command `select-up`");
    }

    #[test]
    fn test_extending_only_horizontal() {
        assert_eq!(Command::Left.extending(), Some(Command::SelectLeft));
        assert_eq!(Command::Right.extending(), Some(Command::SelectRight));
        assert_eq!(Command::Up.extending(), None);
        assert_eq!(Command::Down.extending(), None);
        assert!(Command::Down.is_directional());
        assert!(!Command::SelectLeft.is_directional());
    }
}
