//! Calculator expression engine.
//!
//! This module provides functionality to:
//! - Tokenize and parse arithmetic expressions into postfix order
//! - Evaluate them strictly (commit) or tolerantly (live preview)
//! - Format results for display
//! - Copy results to the clipboard

mod clipboard;
mod detection;
mod error;
mod evaluation;
mod format;
mod parser;
mod tokenizer;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use detection::trim_dangling_operators;
pub use error::{CalcError, Result};
pub use evaluation::{
    CalcResult, calculate, evaluate_expression, evaluate_postfix, preview_expression,
};
pub use format::{
    ERROR_LABEL, INDETERMINATE_LABEL, NEGATIVE_INFINITY_LABEL, POSITIVE_INFINITY_LABEL,
    format_result, is_sentinel,
};
pub use parser::to_postfix;
pub use tokenizer::{Operator, Token, tokenize};
