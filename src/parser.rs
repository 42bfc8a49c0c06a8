//! Parser for bigcalc
//!
//! Converts an infix token stream into postfix (operator-last) order.
//!
//! Operators are held on a stack whose priorities strictly increase from
//! bottom to top. An incoming operator is pushed when it binds tighter than
//! the current top; otherwise the *whole* stack is flushed to the output
//! before it is pushed. This differs from textbook shunting-yard, which only
//! pops while the top binds at least as tight:
//!
//! ```text
//! 1+2*3/4    ->  1 2 3 * + 4 /     (flush everything on '/')
//! ```

use crate::lexer::{Operator, Token};
use crate::stack::Stack;
use std::fmt;

/// A token sequence in postfix order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix {
    pub tokens: Vec<Token>,
}

impl Postfix {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl IntoIterator for Postfix {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Parser state
pub struct Parser {
    operators: Stack<Operator>,
    output: Vec<Token>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            operators: Stack::new(),
            output: Vec::new(),
        }
    }

    /// Feed one token
    pub fn push(&mut self, token: Token) {
        match token {
            Token::Operator(op) => self.push_operator(op),
            operand => self.output.push(operand),
        }
    }

    fn push_operator(&mut self, op: Operator) {
        let binds_tighter = self
            .operators
            .peek()
            .map_or(true, |top| op.priority() > top.priority());

        if !binds_tighter {
            self.flush();
        }
        self.operators.push(op);
    }

    fn flush(&mut self) {
        self.output
            .extend(self.operators.drain().map(Token::Operator));
    }

    /// Flush remaining operators and return the postfix sequence
    pub fn finish(mut self) -> Postfix {
        self.flush();
        Postfix {
            tokens: self.output,
        }
    }
}

/// Convert infix tokens to postfix order
pub fn to_postfix<I>(tokens: I) -> Postfix
where
    I: IntoIterator<Item = Token>,
{
    let mut parser = Parser::new();
    for token in tokens {
        parser.push(token);
    }
    parser.finish()
}
