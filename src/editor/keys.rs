//! Keystroke vocabulary.
//!
//! Maps key names (as a keyboard event reports them) and typed characters
//! to edit actions on an [`EditBuffer`].

use tracing::trace;

use super::buffer::{CommitOutcome, EditBuffer};
use crate::calculator::Operator;

/// An edit action triggered by a key or button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit or the decimal point.
    Digit(char),
    /// A binary operator, subject to operator collapsing.
    Operator(Operator),
    /// Text inserted verbatim (parentheses, `√`).
    Insert(&'static str),
    Backspace,
    Clear,
    Commit,
    Left,
    Right,
}

impl Key {
    /// Map a typed character to a key.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' | '.' => Some(Self::Digit(c)),
            '+' | '-' | '*' | '/' | '^' => Operator::from_char(c).map(Self::Operator),
            '(' => Some(Self::Insert("(")),
            ')' => Some(Self::Insert(")")),
            '√' | 'r' | 'R' => Some(Self::Insert("√")),
            '=' => Some(Self::Commit),
            'c' | 'C' => Some(Self::Clear),
            'b' | 'B' => Some(Self::Backspace),
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            _ => None,
        }
    }

    /// Map a key name to a key.
    ///
    /// Accepts the named keys `Enter`, `Backspace`, `Escape`, `ArrowLeft`
    /// and `ArrowRight`, and any single character [`Key::from_char`] knows.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(Self::Commit),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }
}

impl EditBuffer {
    /// Apply one key. Returns the outcome when the key commits.
    pub fn apply(&mut self, key: Key) -> Option<CommitOutcome> {
        trace!(?key, "key");
        match key {
            Key::Digit(d) => self.append_digit(d),
            Key::Operator(op) => self.append_operator(op),
            Key::Insert(text) => self.insert_text(text),
            Key::Backspace => self.backspace(),
            Key::Clear => self.clear(),
            Key::Commit => return self.commit(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
        }
        None
    }
}
