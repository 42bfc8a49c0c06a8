//! Interactive session: classifies input lines and dispatches them
//!
//! A line is one of:
//! - blank (ignored)
//! - a meta-command prefixed with `/` (`/exit`, `/help`, `/vars`)
//! - an assignment `name = expression`
//! - a bare variable name (prints its value)
//! - an expression
//!
//! Failures are reported as [`SessionError`] and never end the session.

use crate::eval::{evaluate, EvalError};
use crate::state::VariableTable;
use log::debug;
use thiserror::Error;

pub const HELP_TEXT: &str = "\
The program calculates expressions over integers of any size.
Supported operators: + - * / ^ and parentheses.
  /      integer division, truncated toward zero
  ^      power, the exponent must not be negative
  - -    two minus signs make a plus
Variables:
  name = expression   store the value (names are letters only)
  name                print the value
Commands:
  /help   show this message
  /vars   list variables
  /exit   quit";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Invalid identifier")]
    InvalidIdentifier,
    #[error("Invalid assignment")]
    InvalidAssignment,
    #[error("Unknown variable")]
    UnknownVariable,
    #[error("Unknown command")]
    UnknownCommand,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid exponent")]
    InvalidExponent,
}

impl From<EvalError> for SessionError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::UnknownVariable(_) => SessionError::UnknownVariable,
            EvalError::DivisionByZero => SessionError::DivisionByZero,
            EvalError::InvalidExponent(_) => SessionError::InvalidExponent,
            EvalError::MalformedExpression(_) => SessionError::InvalidExpression,
        }
    }
}

/// Meta-commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Vars,
}

impl Command {
    pub const ALL: [(&'static str, Command); 3] = [
        ("/exit", Command::Exit),
        ("/help", Command::Help),
        ("/vars", Command::Vars),
    ];

    /// Look up a command by its name without the leading `/`
    pub fn from_name(name: &str) -> Option<Command> {
        Self::ALL
            .iter()
            .find(|(full, _)| full[1..] == *name)
            .map(|(_, cmd)| *cmd)
    }
}

/// Classified input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    Command(&'a str),
    Assignment { name: &'a str, value: &'a str },
    Identifier(&'a str),
    Expression(&'a str),
}

/// What the session answers to a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing to print (blank line, successful assignment)
    Silent,
    /// A computed or stored value
    Value(String),
    Help,
    /// Sorted `(name, value)` pairs
    Variables(Vec<(String, String)>),
    /// End of session
    Exit,
}

impl Response {
    /// Text to show the user, if any
    pub fn render(&self) -> Option<String> {
        match self {
            Response::Silent => None,
            Response::Value(v) => Some(v.clone()),
            Response::Help => Some(HELP_TEXT.to_string()),
            Response::Variables(vars) if vars.is_empty() => Some("No variables".to_string()),
            Response::Variables(vars) => Some(
                vars.iter()
                    .map(|(name, value)| format!("{} = {}", name, value))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Response::Exit => Some("Bye!".to_string()),
        }
    }
}

/// Letters only, at least one
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// A single word mixing letters and digits, like `a2`
fn is_mixed_word(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric())
        && s.chars().any(|c| c.is_ascii_alphabetic())
        && s.chars().any(|c| c.is_ascii_digit())
}

/// Classify a raw input line
pub fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Input::Empty
    } else if let Some(command) = trimmed.strip_prefix('/') {
        Input::Command(command.trim())
    } else if let Some((name, value)) = trimmed.split_once('=') {
        Input::Assignment {
            name: name.trim(),
            value: value.trim(),
        }
    } else if is_identifier(trimmed) {
        Input::Identifier(trimmed)
    } else {
        Input::Expression(trimmed)
    }
}

/// Check an expression before handing it to the evaluator.
///
/// Accepts only operators, parentheses, whitespace, and words that are all
/// letters or all digits. Two operands may not follow each other without an
/// operator between them, and parentheses must balance.
pub fn validate_expression(expr: &str) -> Result<(), SessionError> {
    let mut depth: usize = 0;
    // true right after a word or a closing parenthesis
    let mut after_operand = false;
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => continue,
            '(' => {
                if after_operand {
                    return Err(SessionError::InvalidExpression);
                }
                depth += 1;
                after_operand = false;
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SessionError::InvalidExpression)?;
                after_operand = true;
            }
            '+' | '-' | '*' | '/' | '^' => after_operand = false,
            c if c.is_ascii_alphanumeric() => {
                let mut word = String::from(c);
                while let Some(next) = chars.next_if(|n| n.is_ascii_alphanumeric()) {
                    word.push(next);
                }
                if after_operand || is_mixed_word(&word) {
                    return Err(SessionError::InvalidExpression);
                }
                after_operand = true;
            }
            _ => return Err(SessionError::InvalidExpression),
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(SessionError::InvalidExpression)
    }
}

/// An interactive calculator session owning its variables
#[derive(Debug, Clone, Default)]
pub struct Session {
    vars: VariableTable,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(vars: VariableTable) -> Self {
        Session { vars }
    }

    pub fn variables(&self) -> &VariableTable {
        &self.vars
    }

    /// Handle one input line
    pub fn execute(&mut self, line: &str) -> Result<Response, SessionError> {
        match classify(line) {
            Input::Empty => Ok(Response::Silent),
            Input::Command(name) => self.run_command(name),
            Input::Assignment { name, value } => self.assign(name, value),
            Input::Identifier(name) => self
                .vars
                .get(name)
                .map(|v| Response::Value(v.to_string()))
                .ok_or(SessionError::UnknownVariable),
            Input::Expression(expr) => self.calculate(expr),
        }
    }

    fn run_command(&self, name: &str) -> Result<Response, SessionError> {
        match Command::from_name(name).ok_or(SessionError::UnknownCommand)? {
            Command::Exit => Ok(Response::Exit),
            Command::Help => Ok(Response::Help),
            Command::Vars => Ok(Response::Variables(
                self.vars
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )),
        }
    }

    fn assign(&mut self, name: &str, value: &str) -> Result<Response, SessionError> {
        if !is_identifier(name) {
            return Err(SessionError::InvalidIdentifier);
        }
        if value.is_empty() || value.contains('=') {
            return Err(SessionError::InvalidAssignment);
        }

        let resolved = if is_identifier(value) {
            self.vars
                .get(value)
                .map(str::to_string)
                .ok_or(SessionError::UnknownVariable)?
        } else {
            validate_expression(value).map_err(|_| SessionError::InvalidAssignment)?;
            evaluate(value, &self.vars).map_err(|e| match e {
                EvalError::UnknownVariable(_) => SessionError::UnknownVariable,
                _ => SessionError::InvalidAssignment,
            })?
        };

        debug!("assign {} = {}", name, resolved);
        self.vars.assign(name, resolved);
        Ok(Response::Silent)
    }

    fn calculate(&self, expr: &str) -> Result<Response, SessionError> {
        if is_mixed_word(expr) {
            return Err(SessionError::InvalidIdentifier);
        }
        validate_expression(expr)?;
        let value = evaluate(expr, &self.vars)?;
        Ok(Response::Value(value))
    }
}
