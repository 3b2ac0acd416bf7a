//! Dangling-operator detection for the live preview.
//!
//! While the user is typing, the expression often ends in an operator
//! (`2+`) or starts with one that has no left operand (`*3`). The preview
//! pass ignores those rather than reporting an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Binary operators with no left operand. A leading `-` is a sign and
    /// is kept.
    static ref LEADING_OPERATORS: Regex = Regex::new(r"^[\s+*/^]+").unwrap();

    /// Operators and openers still waiting for their right operand.
    static ref TRAILING_OPERATORS: Regex = Regex::new(r"[\s+\-*/^√(]+$").unwrap();
}

/// Strip dangling operators from both ends of the expression.
pub fn trim_dangling_operators(input: &str) -> &str {
    let start = LEADING_OPERATORS.find(input).map_or(0, |m| m.end());
    let rest = &input[start..];
    let end = TRAILING_OPERATORS.find(rest).map_or(rest.len(), |m| m.start());
    &rest[..end]
}
