//! Common test utilities for bigcalc integration tests

pub use bigcalc::{evaluate, EvalError, Session, SessionError};
use std::collections::HashMap;

/// Helper to evaluate an expression with no variables
pub fn eval(input: &str) -> Result<String, EvalError> {
    evaluate(input, &HashMap::<String, String>::new())
}

/// Helper to evaluate with the given variables
#[allow(dead_code)]
pub fn eval_with(input: &str, vars: &[(&str, &str)]) -> Result<String, EvalError> {
    let table: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    evaluate(input, &table)
}

/// Helper to run lines through one session and collect the printed answers
#[allow(dead_code)]
pub fn run_session(lines: &[&str]) -> Vec<String> {
    let mut session = Session::new();
    lines
        .iter()
        .filter_map(|line| match session.execute(line) {
            Ok(response) => response.render(),
            Err(e) => Some(e.to_string()),
        })
        .collect()
}
