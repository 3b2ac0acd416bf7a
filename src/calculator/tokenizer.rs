//! Tokenizer for calculator expressions.
//!
//! Scans the raw character sequence once, left to right. A `-` is fused into
//! the following number when it sits in operand position (start of input,
//! after an operator or after an opening parenthesis); otherwise it is a
//! binary operator. Characters that belong to no token are skipped.

use super::error::{CalcError, Result};

/// An arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    /// Unary prefix square root.
    SquareRoot,
}

impl Operator {
    /// Map a single character to an operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            '√' => Some(Self::SquareRoot),
            _ => None,
        }
    }

    /// The character this operator is written with.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
            Self::SquareRoot => '√',
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Self::SquareRoot)
    }
}

/// A lexical token.
///
/// Numbers keep the literal text the user typed; conversion to `f64`
/// happens at evaluation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Number(String),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

/// Split an expression into tokens.
///
/// Fails with [`CalcError::MalformedNumber`] when a numeric literal carries
/// more than one decimal point.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (literal, next) = read_number(&chars, i)?;
            tokens.push(Token::Number(literal));
            i = next;
            continue;
        }

        if c == '-' && in_operand_position(&tokens) && run_has_digit(&chars, i + 1) {
            let (literal, next) = read_number(&chars, i + 1)?;
            tokens.push(Token::Number(format!("-{literal}")));
            i = next;
            continue;
        }

        match c {
            '(' => tokens.push(Token::OpenParen),
            ')' => tokens.push(Token::CloseParen),
            _ => {
                if let Some(op) = Operator::from_char(c) {
                    tokens.push(Token::Operator(op));
                }
            }
        }
        i += 1;
    }

    Ok(tokens)
}

/// Whether the next token is expected to be an operand.
fn in_operand_position(tokens: &[Token]) -> bool {
    matches!(
        tokens.last(),
        None | Some(Token::Operator(_)) | Some(Token::OpenParen)
    )
}

/// Whether the run of digits and points starting at `start` holds a digit.
fn run_has_digit(chars: &[char], start: usize) -> bool {
    chars[start.min(chars.len())..]
        .iter()
        .take_while(|c| c.is_ascii_digit() || **c == '.')
        .any(|c| c.is_ascii_digit())
}

/// Read a numeric literal starting at `start`.
///
/// Accepts digits with at most one decimal point, optionally followed by an
/// exponent suffix (`e`, optional sign, digits). Returns the literal and the
/// index just past it.
fn read_number(chars: &[char], start: usize) -> Result<(String, usize)> {
    let mut literal = String::new();
    let mut seen_point = false;
    let mut j = start;

    while let Some(&c) = chars.get(j) {
        if c == '.' {
            if seen_point {
                literal.push(c);
                return Err(CalcError::MalformedNumber(literal));
            }
            seen_point = true;
        } else if !c.is_ascii_digit() {
            break;
        }
        literal.push(c);
        j += 1;
    }

    if let Some(end) = exponent_end(chars, j) {
        literal.extend(&chars[j..end]);
        j = end;
    }

    Ok((literal, j))
}

/// End index of a well-formed exponent suffix at `start`, if there is one.
fn exponent_end(chars: &[char], start: usize) -> Option<usize> {
    if !matches!(chars.get(start), Some('e' | 'E')) {
        return None;
    }
    let mut k = start + 1;
    if matches!(chars.get(k), Some('+' | '-')) {
        k += 1;
    }
    let digits = chars[k.min(chars.len())..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    (digits > 0).then_some(k + digits)
}
