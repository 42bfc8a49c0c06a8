//! bigcalc - an interactive calculator over arbitrary-precision integers
//!
//! # Overview
//!
//! bigcalc evaluates infix integer expressions with `+ - * / ^` and
//! parentheses, keeps named variables for the length of a session, and
//! understands a few `/`-prefixed meta-commands.
//!
//! ```text
//! > a = 2 ^ 70
//! > a + 1
//! 1180591620717411303425
//! > 7 / -2
//! -3
//! > /exit
//! Bye!
//! ```
//!
//! # Evaluation pipeline
//!
//! 1. [`normalize`] drops whitespace and collapses sign runs (`--` is `+`).
//! 2. Innermost parenthesized groups are evaluated and replaced by their
//!    value until the text is flat ([`Evaluator::flatten`]).
//! 3. The flat text is tokenized, converted to postfix ([`to_postfix`]), and
//!    folded on an operand stack ([`Evaluator::eval_postfix`]).
//!
//! The evaluator only reads variables through the [`Variables`] trait;
//! storing them is the job of the [`Session`].
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use bigcalc::evaluate;
//!
//! let mut vars = HashMap::new();
//! vars.insert("a".to_string(), "5".to_string());
//! assert_eq!(evaluate("a * (3 + 4)", &vars).unwrap(), "35");
//! ```

pub mod eval;
pub mod lexer;
pub mod parser;
pub mod session;
pub mod stack;
pub mod state;

// Re-export commonly used items
pub use eval::{evaluate, EvalError, Evaluator, Flattened, Variables};
pub use lexer::{normalize, tokenize, Operator, Token, Tokens};
pub use parser::{to_postfix, Parser, Postfix};
pub use session::{classify, Command, Input, Response, Session, SessionError};
pub use stack::Stack;
pub use state::VariableTable;

/// Convenience function to run a single line in a fresh session
pub fn eval(input: &str) -> Result<Response, SessionError> {
    Session::new().execute(input)
}
