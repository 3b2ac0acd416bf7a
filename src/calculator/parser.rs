//! Shunting-yard conversion from infix tokens to postfix order.

use super::tokenizer::{Operator, Token};

impl Operator {
    /// Binding strength, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
            Self::Power => 3,
            Self::SquareRoot => 4,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Self::Power | Self::SquareRoot)
    }
}

/// Reorder `tokens` into reverse-Polish order.
///
/// Unbalanced parentheses are tolerated: a `)` without a matching `(`
/// drains the operator stack, and a `(` that is never closed is dropped
/// when the stack is flushed at the end.
pub fn to_postfix(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::OpenParen => stack.push(token),
            Token::CloseParen => {
                while let Some(top) = stack.pop() {
                    if top == Token::OpenParen {
                        break;
                    }
                    output.push(top);
                }
            }
            Token::Operator(incoming) => {
                while let Some(Token::Operator(top)) = stack.last() {
                    let top = *top;
                    let yields = top.precedence() > incoming.precedence()
                        || (top.precedence() == incoming.precedence()
                            && !incoming.is_right_associative());
                    if !yields {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top != Token::OpenParen {
            output.push(top);
        }
    }

    output
}
