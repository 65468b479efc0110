//! Command resolution for editor views.
//!
//! Turns cursor and selection commands into the `Transaction` they should
//! dispatch, without touching the view. Clipboard and history commands have
//! side effects outside the document and are handled by the dispatcher.

use crate::actions::Command;
use crate::text::TextBuffer;
use crate::text_helpers::vertical_target;
use crate::types::{Selection, Transaction};
use crate::view::EditorView;

/// What a command needs from the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Dispatch this transaction.
    Apply(Transaction),
    /// Nothing to change (first line `up`, non-word `select-word`, ...).
    NoOp,
    /// Needs platform clipboard or view history.
    Effect(Command),
}

/// Resolve `cmd` against the view's current document and selection.
///
/// Every offset in the returned transaction lies within `[0, doc_len]`,
/// and none of them request scroll-into-view.
pub fn resolve_command<V: EditorView + ?Sized>(view: &V, cmd: Command) -> Resolved {
    let len = view.doc_len();
    let sel = view.selection().clamp(len);
    let head = sel.head;

    match cmd {
        Command::Left => collapse(head.saturating_sub(1)),
        Command::Right => collapse((head + 1).min(len)),
        Command::Up => match vertical_target(view.doc(), head, -1) {
            Some(target) => collapse(target),
            None => Resolved::NoOp,
        },
        Command::Down => match vertical_target(view.doc(), head, 1) {
            Some(target) => collapse(target),
            None => Resolved::NoOp,
        },
        Command::SelectLeft => extend(sel, head.saturating_sub(1)),
        Command::SelectRight => extend(sel, (head + 1).min(len)),
        Command::SelectWord => match view.word_at(head) {
            Some(word) => Resolved::Apply(Transaction::select(Selection::new(
                word.start.min(len),
                word.end.min(len),
            ))),
            None => Resolved::NoOp,
        },
        Command::SelectLine => {
            let line = view.doc().line_at(head);
            Resolved::Apply(Transaction::select(Selection::new(line.from, line.to)))
        }
        Command::Copy | Command::Paste | Command::Undo | Command::Redo => Resolved::Effect(cmd),
    }
}

/// Transaction replacing the selection with `text`, clamped to the document.
pub fn insert_transaction(sel: Selection, len: usize, text: &str) -> Transaction {
    let sel = sel.clamp(len);
    Transaction::replace(sel.to_range(), text)
}

fn collapse(offset: usize) -> Resolved {
    Resolved::Apply(Transaction::select(Selection::cursor(offset)))
}

fn extend(sel: Selection, head: usize) -> Resolved {
    Resolved::Apply(Transaction::select(Selection::new(sel.anchor, head)))
}
