use super::{EvalError, Evaluator, Variables};
use crate::lexer::{Operator, Token};
use crate::parser::Postfix;
use crate::stack::Stack;
use num_bigint::BigInt;

impl<'v, V: Variables + ?Sized> Evaluator<'v, V> {
    /// Fold a postfix sequence into a single value.
    ///
    /// Operands are resolved as they are pushed. An operator pops its right
    /// operand first, then its left one.
    pub fn eval_postfix(&mut self, postfix: &Postfix) -> Result<BigInt, EvalError> {
        self.stack = Stack::new();

        for token in postfix.iter() {
            match token {
                Token::Operator(op) => {
                    let b = self.pop_operand(*op)?;
                    let a = self.pop_operand(*op)?;
                    self.stack.push(op.apply(&a, &b)?);
                }
                Token::Number(n) => self.stack.push(n.clone()),
                Token::Ident(name) => {
                    let value = self.resolve(name)?;
                    self.stack.push(value);
                }
                Token::NegIdent(name) => {
                    let value = self.resolve(name)?;
                    self.stack.push(-value);
                }
            }
        }

        let stack = std::mem::take(&mut self.stack);
        let depth = stack.len();
        stack.into_single().ok_or_else(|| {
            EvalError::MalformedExpression(format!(
                "expected a single value, found {} on the stack",
                depth
            ))
        })
    }

    fn pop_operand(&mut self, op: Operator) -> Result<BigInt, EvalError> {
        self.stack.pop().ok_or_else(|| {
            EvalError::MalformedExpression(format!("'{}' is missing an operand", op))
        })
    }
}
