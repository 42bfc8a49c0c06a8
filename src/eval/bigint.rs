use super::{EvalError, Evaluator, Variables};
use crate::lexer::Operator;
use log::trace;
use num_bigint::{BigInt, BigUint, Sign};

impl Operator {
    /// Apply to operands in source order: `a op b`
    pub fn apply(self, a: &BigInt, b: &BigInt) -> Result<BigInt, EvalError> {
        let result = match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => {
                if *b == BigInt::ZERO {
                    return Err(EvalError::DivisionByZero);
                }
                // truncates toward zero
                a / b
            }
            Operator::Pow => {
                if b.sign() == Sign::Minus {
                    return Err(EvalError::InvalidExponent(b.clone()));
                }
                match u32::try_from(b) {
                    Ok(exp) => a.pow(exp),
                    // b > u32::MAX here, so only bases 0 and ±1 have a result
                    Err(_) if *a.magnitude() == BigUint::from(1u32) => {
                        if a.sign() == Sign::Minus && b % 2u32 != BigInt::ZERO {
                            BigInt::from(-1)
                        } else {
                            BigInt::from(1)
                        }
                    }
                    Err(_) if a.sign() == Sign::NoSign => BigInt::ZERO,
                    Err(_) => return Err(EvalError::InvalidExponent(b.clone())),
                }
            }
        };
        trace!("{} {} {} = {}", a, self, b, result);
        Ok(result)
    }
}

impl<'v, V: Variables + ?Sized> Evaluator<'v, V> {
    /// Resolve a variable name to its stored integer
    pub(crate) fn resolve(&self, name: &str) -> Result<BigInt, EvalError> {
        let stored = self
            .vars
            .lookup(name)
            .ok_or_else(|| EvalError::UnknownVariable(name.to_string()))?;

        stored.trim().parse::<BigInt>().map_err(|_| {
            EvalError::MalformedExpression(format!(
                "variable {} holds non-numeric value {:?}",
                name, stored
            ))
        })
    }
}
