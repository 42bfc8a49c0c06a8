//! Evaluator for bigcalc - parenthesis flattening and postfix evaluation
//!
//! Evaluation of one expression runs in three stages:
//! - the raw text is normalized (see [`crate::lexer::normalize`])
//! - innermost parenthesized groups are evaluated and replaced by their
//!   decimal value, pass after pass, until no parentheses remain
//! - the flat text is converted to postfix and folded with an operand stack
//!
//! Variables are read through the [`Variables`] lookup; the evaluator never
//! mutates them.

mod bigint;
mod flatten;
mod postfix;

pub use flatten::Flattened;

use crate::lexer::{normalize, tokenize};
use crate::parser::to_postfix;
use crate::stack::Stack;
use log::debug;
use num_bigint::BigInt;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),
    #[error("Invalid exponent: {0}")]
    InvalidExponent(BigInt),
}

/// Read-only variable lookup: name -> decimal integer string
pub trait Variables {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> Variables for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Variables for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Evaluates expressions against a borrowed variable lookup
pub struct Evaluator<'v, V: Variables + ?Sized> {
    /// Variable lookup
    pub(crate) vars: &'v V,
    /// Operand stack for the current postfix pass
    pub(crate) stack: Stack<BigInt>,
}

impl<'v, V: Variables + ?Sized> Evaluator<'v, V> {
    pub fn new(vars: &'v V) -> Self {
        Evaluator {
            vars,
            stack: Stack::new(),
        }
    }

    /// Evaluate a raw expression to a decimal string
    pub fn evaluate(&mut self, raw: &str) -> Result<String, EvalError> {
        let normalized = normalize(raw);
        debug!("normalized {:?} -> {:?}", raw, normalized);

        let flattened = self.flatten(&normalized)?;
        let value = self.eval_flat(&flattened.text)?;
        Ok(value.to_string())
    }

    /// Evaluate parenthesis-free text
    pub(crate) fn eval_flat(&mut self, text: &str) -> Result<BigInt, EvalError> {
        let postfix = to_postfix(tokenize(text));
        debug!("postfix of {:?}: {}", text, postfix);
        self.eval_postfix(&postfix)
    }
}

/// Evaluate a raw expression against `vars`
pub fn evaluate<V: Variables + ?Sized>(raw: &str, vars: &V) -> Result<String, EvalError> {
    Evaluator::new(vars).evaluate(raw)
}
