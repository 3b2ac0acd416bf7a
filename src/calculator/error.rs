//! Error kinds raised by the expression engine.

use thiserror::Error;

/// Failure while tokenizing or evaluating an expression.
///
/// The payload is diagnostic detail for logs only; user-facing surfaces
/// show a fixed label instead (see [`crate::calculator::ERROR_LABEL`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A numeric literal could not be read (e.g. a second decimal point).
    #[error("malformed number: {0}")]
    MalformedNumber(String),
    /// The postfix stack underflowed or did not reduce to a single value.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
