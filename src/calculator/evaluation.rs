//! Expression evaluation.
//!
//! Runs the tokenizer, the shunting-yard parser and a postfix stack machine,
//! and exposes the two entry points used by the editor: a strict one that
//! reports errors and a tolerant preview that never does.

use tracing::debug;

use super::detection::trim_dangling_operators;
use super::error::{CalcError, Result};
use super::format::{ERROR_LABEL, format_result};
use super::parser::to_postfix;
use super::tokenizer::{Operator, Token, tokenize};

/// Result of strictly evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Evaluation produced a finite number.
    Success {
        /// The evaluated expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Canonical display text.
        display_result: String,
    },
    /// Evaluation produced NaN or an infinity.
    Sentinel {
        /// The evaluated expression.
        expression: String,
        /// The non-finite value.
        value: f64,
        /// One of the sentinel labels.
        label: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The evaluated expression.
        expression: String,
        /// What went wrong.
        error: CalcError,
    },
}

impl CalcResult {
    /// Get the display string (result, sentinel label or error label).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Sentinel { label, .. } => label,
            Self::Error { .. } => ERROR_LABEL,
        }
    }

    /// Get the clipboard string (only for finite results).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Success { display_result, .. } => Some(display_result),
            _ => None,
        }
    }
}

/// Strictly evaluate `input` and classify the outcome.
pub fn calculate(input: &str) -> CalcResult {
    let expression = input.to_string();

    match evaluate_expression(input) {
        Ok(value) if value.is_finite() => CalcResult::Success {
            display_result: format_result(value),
            expression,
            value,
        },
        Ok(value) => CalcResult::Sentinel {
            label: format_result(value),
            expression,
            value,
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}

/// Evaluate an expression to a number.
///
/// An empty expression evaluates to `0`. Whitespace alone leaves nothing on
/// the stack and is malformed.
pub fn evaluate_expression(input: &str) -> Result<f64> {
    if input.is_empty() {
        return Ok(0.0);
    }

    let tokens = tokenize(input)?;
    debug!(?tokens, "tokenized expression");
    let postfix = to_postfix(tokens);
    debug!(?postfix, "postfix order");

    evaluate_postfix(&postfix)
}

/// Live preview for a partially typed expression.
///
/// Dangling operators at either end are ignored. Returns `"0"` for an empty
/// input and an empty string when the expression cannot be evaluated.
pub fn preview_expression(input: &str) -> String {
    if input.is_empty() {
        return "0".to_string();
    }

    let trimmed = trim_dangling_operators(input);
    match evaluate_expression(trimmed) {
        Ok(value) => format_result(value),
        Err(err) => {
            debug!(%err, input, "preview unavailable");
            String::new()
        }
    }
}

/// Run a postfix token sequence on a value stack.
pub fn evaluate_postfix(postfix: &[Token]) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(literal) => {
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::MalformedNumber(literal.clone()))?;
                stack.push(value);
            }
            Token::Operator(op) if op.is_unary() => {
                let operand = pop_operand(&mut stack, *op)?;
                stack.push(operand.sqrt());
            }
            Token::Operator(op) => {
                let right = pop_operand(&mut stack, *op)?;
                let left = pop_operand(&mut stack, *op)?;
                stack.push(apply_binary(*op, left, right));
            }
            Token::OpenParen | Token::CloseParen => {
                return Err(CalcError::MalformedExpression(
                    "parenthesis in postfix sequence".to_string(),
                ));
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        other => Err(CalcError::MalformedExpression(format!(
            "{} values left on the stack",
            other.len()
        ))),
    }
}

fn pop_operand(stack: &mut Vec<f64>, op: Operator) -> Result<f64> {
    stack.pop().ok_or_else(|| {
        CalcError::MalformedExpression(format!("missing operand for '{}'", op.symbol()))
    })
}

/// Apply a binary operator.
///
/// Any non-finite operand yields NaN instead of IEEE infinity arithmetic,
/// so `∞ - ∞` and `∞ + 1` are both indeterminate.
fn apply_binary(op: Operator, left: f64, right: f64) -> f64 {
    if !left.is_finite() || !right.is_finite() {
        return f64::NAN;
    }

    match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => divide(left, right),
        Operator::Power => left.powf(right),
        Operator::SquareRoot => f64::NAN,
    }
}

/// Division with a near-zero divisor mapped to a sentinel.
fn divide(dividend: f64, divisor: f64) -> f64 {
    if divisor.abs() < f64::EPSILON {
        if dividend.abs() < f64::EPSILON {
            f64::NAN
        } else if dividend > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        dividend / divisor
    }
}
