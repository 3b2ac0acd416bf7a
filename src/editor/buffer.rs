//! The expression buffer and its cursor.

use serde::Serialize;
use tracing::{trace, warn};

use crate::calculator::{CalcResult, Operator, calculate, preview_expression};

/// Observable state of the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The result line shows the live preview of the buffer.
    Editing,
    /// The result line shows the outcome of the last commit until the next
    /// mutation.
    ResultDisplayed,
}

/// What the UI shows after a commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    /// The expression line (the new buffer, or `"0"` if it was cleared).
    pub display_expression: String,
    /// The result line: a number, a sentinel label or the error label.
    pub display_result: String,
    /// The raw result to copy, only for finite results.
    #[serde(skip)]
    pub clipboard: Option<String>,
}

/// Mutable expression text with a cursor.
///
/// The cursor counts characters, not bytes, and always stays within
/// `0..=len`.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
    committed_result: Option<String>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            committed_result: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn mode(&self) -> Mode {
        if self.committed_result.is_some() {
            Mode::ResultDisplayed
        } else {
            Mode::Editing
        }
    }

    /// Splice `text` in at the cursor and move the cursor past it.
    pub fn insert_text(&mut self, text: &str) {
        self.committed_result = None;
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
        trace!(buffer = %self.text, cursor = self.cursor, "inserted text");
    }

    /// Insert a digit or a decimal point.
    ///
    /// A point is dropped when the number under the cursor already has one
    /// or carries an exponent, and gets a leading `0` when nothing precedes
    /// it in that number.
    pub fn append_digit(&mut self, digit: char) {
        match digit {
            '0'..='9' => self.insert_text(digit.encode_utf8(&mut [0; 4])),
            '.' => {
                let before: Vec<char> = self.before_cursor().chars().collect();
                let after: Vec<char> = self.after_cursor().chars().collect();
                let head = number_head(&before);
                let tail = number_tail(before.last().copied(), &after);
                // A point after an exponent would never tokenize
                let rejected = head
                    .iter()
                    .chain(&tail)
                    .any(|c| matches!(c, '.' | 'e' | 'E'));

                if rejected {
                    trace!(buffer = %self.text, "rejected decimal point");
                } else if head.is_empty() {
                    self.insert_text("0.");
                } else {
                    self.insert_text(".");
                }
            }
            _ => {}
        }
    }

    /// Insert an operator, collapsing it with operators already in front of
    /// the cursor.
    ///
    /// At most one sign may follow a binary operator: `-` after `+` gives
    /// `+-`, and another operator after `+-` replaces both. On an empty
    /// prefix only `-` is accepted. `√` is a prefix and is inserted as is.
    pub fn append_operator(&mut self, op: Operator) {
        if op.is_unary() {
            self.insert_text(op.symbol().encode_utf8(&mut [0; 4]));
            return;
        }

        let symbol = op.symbol();
        let mut prefix = self.before_cursor().chars().rev();
        let last = prefix.next();
        let second_last = prefix.next();

        match last {
            None => {
                if op == Operator::Subtract {
                    self.insert_char(symbol);
                }
            }
            Some(last) if is_binary_operator(last) => {
                if last == '-' && second_last.is_some_and(is_binary_operator) {
                    self.remove_before_cursor(2);
                    self.insert_char(symbol);
                } else if op == Operator::Subtract && last != '-' {
                    self.insert_char(symbol);
                } else {
                    self.remove_before_cursor(1);
                    self.insert_char(symbol);
                }
            }
            Some(_) => self.insert_char(symbol),
        }
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.committed_result = None;
        self.remove_before_cursor(1);
        trace!(buffer = %self.text, cursor = self.cursor, "backspace");
    }

    pub fn clear(&mut self) {
        self.committed_result = None;
        self.text.clear();
        self.cursor = 0;
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: usize) {
        self.committed_result = None;
        self.cursor = pos.min(self.len());
    }

    pub fn move_left(&mut self) {
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    /// The expression line: the buffer, or `"0"` when it is empty.
    pub fn expression_display(&self) -> String {
        if self.text.is_empty() {
            "0".to_string()
        } else {
            self.text.clone()
        }
    }

    /// Live preview of the buffer.
    pub fn result_preview(&self) -> String {
        preview_expression(&self.text)
    }

    /// The result line: the last commit's outcome right after a commit,
    /// otherwise the live preview.
    pub fn result_display(&self) -> String {
        match &self.committed_result {
            Some(result) => result.clone(),
            None => self.result_preview(),
        }
    }

    /// Strictly evaluate the buffer.
    ///
    /// A finite result replaces the buffer. A sentinel result clears it. On
    /// error the buffer is left as is for correction. Returns `None` when
    /// the buffer is empty.
    pub fn commit(&mut self) -> Option<CommitOutcome> {
        if self.text.is_empty() {
            return None;
        }

        let result = calculate(&self.text);
        match &result {
            CalcResult::Success { display_result, .. } => {
                self.text = display_result.clone();
                self.cursor = self.len();
            }
            CalcResult::Sentinel { .. } => {
                self.text.clear();
                self.cursor = 0;
            }
            CalcResult::Error { expression, error } => {
                warn!(%error, %expression, "commit failed");
            }
        }

        let display_result = result.display().to_string();
        self.committed_result = Some(display_result.clone());

        Some(CommitOutcome {
            display_expression: self.expression_display(),
            display_result,
            clipboard: result.clipboard().map(str::to_string),
        })
    }

    fn insert_char(&mut self, c: char) {
        self.insert_text(c.encode_utf8(&mut [0; 4]));
    }

    fn remove_before_cursor(&mut self, count: usize) {
        let count = count.min(self.cursor);
        let start = self.byte_offset(self.cursor - count);
        let end = self.byte_offset(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= count;
    }

    fn before_cursor(&self) -> &str {
        &self.text[..self.byte_offset(self.cursor)]
    }

    fn after_cursor(&self) -> &str {
        &self.text[self.byte_offset(self.cursor)..]
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

fn is_binary_operator(c: char) -> bool {
    Operator::from_char(c).is_some_and(|op| !op.is_unary())
}

/// Characters that end a numeric literal.
fn is_number_boundary(c: char) -> bool {
    Operator::from_char(c).is_some() || c == '(' || c == ')' || c.is_whitespace()
}

/// Whether `c` ends the literal, given the character before it. The sign
/// of an exponent (`5e-7`) belongs to the number.
fn ends_number(prev: Option<char>, c: char) -> bool {
    is_number_boundary(c) && !(matches!(c, '+' | '-') && matches!(prev, Some('e' | 'E')))
}

/// The part of the number under the cursor that lies before it, reversed.
fn number_head(before: &[char]) -> Vec<char> {
    let mut head = Vec::new();
    for i in (0..before.len()).rev() {
        let prev = i.checked_sub(1).map(|p| before[p]);
        if ends_number(prev, before[i]) {
            break;
        }
        head.push(before[i]);
    }
    head
}

/// The part of the number under the cursor that lies after it.
fn number_tail(mut prev: Option<char>, after: &[char]) -> Vec<char> {
    let mut tail = Vec::new();
    for &c in after {
        if ends_number(prev, c) {
            break;
        }
        tail.push(c);
        prev = Some(c);
    }
    tail
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &str) -> EditBuffer {
        let mut buffer = EditBuffer::new();
        for c in input.chars() {
            match Operator::from_char(c) {
                Some(op) => buffer.append_operator(op),
                None => buffer.append_digit(c),
            }
        }
        buffer
    }

    #[test]
    fn test_insert_advances_cursor() {
        let mut buffer = EditBuffer::new();
        buffer.insert_text("12");
        buffer.insert_text("+√");
        assert_eq!(buffer.text(), "12+√");
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut buffer = EditBuffer::with_text("√9+1");
        buffer.set_cursor(2);
        buffer.insert_text("1");
        assert_eq!(buffer.text(), "√91+1");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_backspace() {
        let mut buffer = EditBuffer::with_text("12+√");
        buffer.backspace();
        assert_eq!(buffer.text(), "12+");
        assert_eq!(buffer.cursor(), 3);
        buffer.set_cursor(1);
        buffer.backspace();
        assert_eq!(buffer.text(), "2+");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buffer = EditBuffer::new();
        buffer.backspace();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_clear() {
        let mut buffer = EditBuffer::with_text("1+2");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.expression_display(), "0");
    }

    #[test]
    fn test_cursor_clamped() {
        let mut buffer = EditBuffer::with_text("123");
        buffer.set_cursor(10);
        assert_eq!(buffer.cursor(), 3);
        buffer.move_right();
        assert_eq!(buffer.cursor(), 3);
        buffer.set_cursor(0);
        buffer.move_left();
        assert_eq!(buffer.cursor(), 0);
        buffer.move_right();
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_decimal_point_guards() {
        assert_eq!(typed(".").text(), "0.");
        assert_eq!(typed("1.5.").text(), "1.5");
        assert_eq!(typed("1.5+.").text(), "1.5+0.");
        assert_eq!(typed("-.").text(), "-0.");
        assert_eq!(typed("2.5*3.").text(), "2.5*3.");
    }

    #[test]
    fn test_decimal_point_before_existing_point() {
        let mut buffer = EditBuffer::with_text("1.5");
        buffer.set_cursor(0);
        buffer.append_digit('.');
        assert_eq!(buffer.text(), "1.5");
    }

    #[test]
    fn test_operator_on_empty_buffer() {
        assert_eq!(typed("+").text(), "");
        assert_eq!(typed("*").text(), "");
        assert_eq!(typed("-").text(), "-");
    }

    #[test]
    fn test_operator_collapsing() {
        assert_eq!(typed("2+*").text(), "2*");
        assert_eq!(typed("2+-").text(), "2+-");
        assert_eq!(typed("2+-*").text(), "2*");
        assert_eq!(typed("2--").text(), "2-");
        assert_eq!(typed("2*-3").text(), "2*-3");
        assert_eq!(typed("2^-").text(), "2^-");
    }

    #[test]
    fn test_square_root_inserted_as_prefix() {
        let mut buffer = typed("2+");
        buffer.append_operator(Operator::SquareRoot);
        buffer.append_digit('9');
        assert_eq!(buffer.text(), "2+√9");
        assert_eq!(buffer.result_preview(), "5");
    }

    #[test]
    fn test_displays() {
        let buffer = EditBuffer::new();
        assert_eq!(buffer.expression_display(), "0");
        assert_eq!(buffer.result_display(), "0");

        let buffer = typed("2+3*");
        assert_eq!(buffer.expression_display(), "2+3*");
        assert_eq!(buffer.result_preview(), "5");
    }

    #[test]
    fn test_preview_blank_on_error() {
        let buffer = EditBuffer::with_text("1.2.3");
        assert_eq!(buffer.result_preview(), "");
    }

    #[test]
    fn test_commit_replaces_buffer() {
        let mut buffer = EditBuffer::with_text("2+3*4");
        let outcome = buffer.commit().unwrap();
        assert_eq!(outcome.display_expression, "14");
        assert_eq!(outcome.display_result, "14");
        assert_eq!(outcome.clipboard.as_deref(), Some("14"));
        assert_eq!(buffer.text(), "14");
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.mode(), Mode::ResultDisplayed);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut buffer = EditBuffer::with_text("10/4");
        let first = buffer.commit().unwrap();
        let second = buffer.commit().unwrap();
        assert_eq!(first, second);
        assert_eq!(second.display_result, "2.5");

        let mut buffer = EditBuffer::with_text("10^13");
        let first = buffer.commit().unwrap();
        let second = buffer.commit().unwrap();
        assert_eq!(first.display_result, "1e13");
        assert_eq!(first, second);
    }

    #[test]
    fn test_commit_is_idempotent_at_notation_thresholds() {
        for (input, expected) in [
            ("999999999999.9", "1e12"),
            ("9.99999999999e-7", "0.000001"),
            ("0-999999999999.7", "-1e12"),
        ] {
            let mut buffer = EditBuffer::with_text(input);
            let first = buffer.commit().unwrap();
            let second = buffer.commit().unwrap();
            assert_eq!(first.display_result, expected, "input {input}");
            assert_eq!(first, second, "input {input}");
        }
    }

    #[test]
    fn test_decimal_point_rejected_after_exponent() {
        let mut buffer = EditBuffer::with_text("10^-7*5");
        buffer.commit();
        assert_eq!(buffer.text(), "5e-7");
        buffer.append_digit('.');
        assert_eq!(buffer.text(), "5e-7");
        assert_eq!(buffer.result_preview(), "5e-7");

        let mut buffer = EditBuffer::with_text("1e13");
        buffer.set_cursor(1);
        buffer.append_digit('.');
        assert_eq!(buffer.text(), "1e13");
    }

    #[test]
    fn test_decimal_point_after_exponent_in_new_number() {
        let mut buffer = EditBuffer::with_text("5e-7+");
        buffer.append_digit('.');
        assert_eq!(buffer.text(), "5e-7+0.");
    }

    #[test]
    fn test_commit_sentinel_clears_buffer() {
        let mut buffer = EditBuffer::with_text("1/0");
        let outcome = buffer.commit().unwrap();
        assert_eq!(outcome.display_expression, "0");
        assert_eq!(outcome.display_result, "∞");
        assert_eq!(outcome.clipboard, None);
        assert!(buffer.is_empty());
        assert_eq!(buffer.result_display(), "∞");

        buffer.append_digit('7');
        assert_eq!(buffer.mode(), Mode::Editing);
        assert_eq!(buffer.result_display(), "7");
    }

    #[test]
    fn test_commit_error_keeps_buffer() {
        let mut buffer = EditBuffer::with_text("2*/");
        let outcome = buffer.commit().unwrap();
        assert_eq!(outcome.display_result, "Erreur");
        assert_eq!(outcome.display_expression, "2*/");
        assert_eq!(buffer.text(), "2*/");
        assert_eq!(buffer.result_display(), "Erreur");

        buffer.backspace();
        assert_eq!(buffer.mode(), Mode::Editing);
        assert_eq!(buffer.result_display(), "2");
    }

    #[test]
    fn test_commit_on_empty_is_noop() {
        let mut buffer = EditBuffer::new();
        assert_eq!(buffer.commit(), None);
        assert_eq!(buffer.mode(), Mode::Editing);
    }

    #[test]
    fn test_continue_after_commit() {
        let mut buffer = EditBuffer::with_text("6*7");
        buffer.commit();
        buffer.append_operator(Operator::Add);
        buffer.append_digit('8');
        assert_eq!(buffer.text(), "42+8");
        assert_eq!(buffer.result_display(), "50");
    }
}
