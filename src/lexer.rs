//! Tokenization for bigcalc
//!
//! Raw input is normalized first (whitespace dropped, sign runs collapsed),
//! then scanned left to right into operators, identifiers, and integer
//! literals.

use nom::{
    branch::alt,
    character::complete::{alpha1, digit1, one_of},
    combinator::{map, map_opt, map_res},
    multi::fold_many1,
    sequence::pair,
    IResult,
};
use num_bigint::BigInt;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Pow, // ^
}

impl Operator {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    /// Binding priority: higher binds tighter.
    pub fn priority(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 0,
            Operator::Mul | Operator::Div => 1,
            Operator::Pow => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// One of `+ - * / ^`
    Operator(Operator),
    /// Integer literal, possibly signed
    Number(BigInt),
    /// Variable name (letters only)
    Ident(String),
    /// Variable name read with a leading minus sign, as in `2*-x`
    NegIdent(String),
}

impl Token {
    pub fn is_operand(&self) -> bool {
        !matches!(self, Token::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op),
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(name) => write!(f, "{}", name),
            Token::NegIdent(name) => write!(f, "-{}", name),
        }
    }
}

/// Canonicalize an expression: strip whitespace and collapse sign runs.
///
/// Each pass replaces runs of two or more `-` with `+`, then runs of two or
/// more `+` with `+`, then every non-overlapping `+-` / `-+` pair with `-`.
/// Passes repeat until nothing changes, so the result never contains two
/// adjacent signs.
pub fn normalize(input: &str) -> String {
    let mut current: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    loop {
        let next = collapse_mixed_pairs(&collapse_runs(&collapse_runs(&current, '-', '+'), '+', '+'));
        // Every effective substitution shortens the text, so this terminates.
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Replace every run of two or more `sign` characters with `replacement`
fn collapse_runs(input: &str, sign: char, replacement: char) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != sign {
            result.push(c);
            continue;
        }
        let mut run = 1;
        while chars.next_if_eq(&sign).is_some() {
            run += 1;
        }
        result.push(if run > 1 { replacement } else { sign });
    }
    result
}

/// Replace `+-` and `-+` pairs with `-`, scanning left to right
fn collapse_mixed_pairs(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let opposite = match c {
            '+' => '-',
            '-' => '+',
            _ => {
                result.push(c);
                continue;
            }
        };
        if chars.next_if_eq(&opposite).is_some() {
            result.push('-');
        } else {
            result.push(c);
        }
    }
    result
}

/// Parse an operator symbol
fn operator(input: &str) -> IResult<&str, Token> {
    map_opt(one_of("+-*/^"), |c| Operator::from_symbol(c).map(Token::Operator))(input)
}

/// Parse a run of letters
fn identifier(input: &str) -> IResult<&str, Token> {
    map(alpha1, |s: &str| Token::Ident(s.to_string()))(input)
}

/// Parse a run of digits
fn digits(input: &str) -> IResult<&str, BigInt> {
    map_res(digit1, |s: &str| s.parse::<BigInt>())(input)
}

fn number(input: &str) -> IResult<&str, Token> {
    map(digits, Token::Number)(input)
}

/// Parse a run of signs; true when it negates (odd count of `-`)
fn signs(input: &str) -> IResult<&str, bool> {
    fold_many1(one_of("+-"), || false, |negative, c| negative ^ (c == '-'))(input)
}

/// Parse signs glued to a run of digits: `-42`, `+7`, `--3`
fn signed_number(input: &str) -> IResult<&str, Token> {
    map(pair(signs, digits), |(negative, n)| {
        Token::Number(if negative { -n } else { n })
    })(input)
}

/// Parse signs glued to a variable name: `-x`, `+x`, `--x`
fn signed_identifier(input: &str) -> IResult<&str, Token> {
    map(pair(signs, alpha1), |(negative, name): (bool, &str)| {
        if negative {
            Token::NegIdent(name.to_string())
        } else {
            Token::Ident(name.to_string())
        }
    })(input)
}

/// Lazy token stream over a normalized expression.
///
/// Characters that start no token are skipped. Where an operand is expected
/// (start of input, or right after an operator) signs directly followed by
/// digits or letters are read as part of the operand. Runs of two signs only
/// appear once a negative group value lands after a sign, as in `0+--3`.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    expect_operand: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.rest.is_empty() {
            let parsed = if self.expect_operand {
                alt((signed_number, signed_identifier, operator, identifier, number))(self.rest)
            } else {
                alt((operator, identifier, number))(self.rest)
            };

            match parsed {
                Ok((rest, token)) => {
                    self.rest = rest;
                    self.expect_operand = !token.is_operand();
                    return Some(token);
                }
                Err(_) => {
                    let mut chars = self.rest.chars();
                    chars.next();
                    self.rest = chars.as_str();
                }
            }
        }
        None
    }
}

/// Split a normalized expression into tokens
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens {
        rest: input,
        expect_operand: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Token {
        Token::Number(BigInt::from(n))
    }

    fn ident(s: &str) -> Token {
        Token::Ident(s.to_string())
    }

    #[test]
    fn normalize_strips_whitespace() {
        assert_eq!(normalize("  1 +\t2 *  x "), "1+2*x");
    }

    #[test]
    fn normalize_collapses_sign_pairs() {
        assert_eq!(normalize("5++3"), "5+3");
        assert_eq!(normalize("5--3"), "5+3");
        assert_eq!(normalize("5+-3"), "5-3");
        assert_eq!(normalize("5-+3"), "5-3");
    }

    #[test]
    fn normalize_collapses_long_runs() {
        assert_eq!(normalize("9 +++ 2"), "9+2");
        // any run of minus signs becomes a plus
        assert_eq!(normalize("9 --- 2"), "9+2");
    }

    #[test]
    fn normalize_mixed_runs_reach_fixpoint() {
        assert_eq!(normalize("5+-+3"), "5-3");
        assert_eq!(normalize("5-+-3"), "5+3");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["1 + - + - 2", "a--b++c", "-(-(3))", "+-+-+-", "2 ^ 3 - - - 1", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn tokenize_simple_expression() {
        let tokens: Vec<Token> = tokenize("2+3*x").collect();
        assert_eq!(
            tokens,
            vec![
                num(2),
                Token::Operator(Operator::Add),
                num(3),
                Token::Operator(Operator::Mul),
                ident("x"),
            ]
        );
    }

    #[test]
    fn tokenize_long_runs() {
        let tokens: Vec<Token> = tokenize("count^123456789012345678901234567890").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], ident("count"));
        assert_eq!(
            tokens[2],
            Token::Number("123456789012345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn tokenize_signed_literal_after_operator() {
        let tokens: Vec<Token> = tokenize("0+2*-2").collect();
        assert_eq!(
            tokens,
            vec![
                num(0),
                Token::Operator(Operator::Add),
                num(2),
                Token::Operator(Operator::Mul),
                num(-2),
            ]
        );
    }

    #[test]
    fn tokenize_sign_run_before_operand() {
        let tokens: Vec<Token> = tokenize("0+--3*-+x").collect();
        assert_eq!(
            tokens,
            vec![
                num(0),
                Token::Operator(Operator::Add),
                num(3),
                Token::Operator(Operator::Mul),
                Token::NegIdent("x".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_binary_minus_after_operand() {
        let tokens: Vec<Token> = tokenize("7-2").collect();
        assert_eq!(tokens, vec![num(7), Token::Operator(Operator::Sub), num(2)]);
    }

    #[test]
    fn tokenize_signed_identifier() {
        let tokens: Vec<Token> = tokenize("-a*+b-c").collect();
        assert_eq!(
            tokens,
            vec![
                Token::NegIdent("a".to_string()),
                Token::Operator(Operator::Mul),
                ident("b"),
                Token::Operator(Operator::Sub),
                ident("c"),
            ]
        );
    }

    #[test]
    fn tokenize_skips_unknown_characters() {
        let tokens: Vec<Token> = tokenize("1 % 2").collect();
        assert_eq!(tokens, vec![num(1), num(2)]);
    }

    #[test]
    fn tokenize_is_lazy() {
        let mut tokens = tokenize("1+2");
        assert_eq!(tokens.next(), Some(num(1)));
        assert_eq!(tokens.next(), Some(Token::Operator(Operator::Add)));
        assert_eq!(tokens.next(), Some(num(2)));
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn operator_priorities() {
        assert_eq!(Operator::Add.priority(), Operator::Sub.priority());
        assert_eq!(Operator::Mul.priority(), Operator::Div.priority());
        assert!(Operator::Pow.priority() > Operator::Mul.priority());
        assert!(Operator::Mul.priority() > Operator::Add.priority());
    }
}
