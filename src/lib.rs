//! An interactive calculator.
//!
//! The [`calculator`] module holds the expression engine (tokenizer,
//! shunting-yard parser, postfix evaluator and result formatter). The
//! [`editor`] module keeps an expression buffer well-formed as it is typed
//! and drives the engine for live previews and commits.

pub mod calculator;
pub mod config;
pub mod editor;
pub mod repl;
