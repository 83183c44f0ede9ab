//! Replies for messages that are neither payments nor expenses.
//!
//! Text made only of numbers, operators and parentheses is evaluated by a
//! small recursive-descent calculator so the bot doubles as a quick
//! calculator. It never touches anything but the numbers in the message.
//! Anything else gets the usage hint.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0, one_of},
    combinator::{cut, map},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use thiserror::Error;

use crate::models::ReplyMessage;

pub const HELP_TEXT: &str = "Send <amount>pp for a PromptPay QR (e.g. 150pp), \
or <amount><t|f|m> to log an expense (t = transportation, f = food, m = miscellaneous).";

/// Longest expression the calculator will look at
const MAX_EXPRESSION_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("result is not a finite number")]
    NotFinite,
    #[error("expression is too long")]
    TooLong,
}

/// Parsed value; arithmetic errors travel alongside the parse rather than
/// aborting it
type Value = Result<f64, EvalError>;

/// Build the single text reply for unrecognized input
pub fn create_fallback_message(text: &str) -> ReplyMessage {
    if !looks_like_arithmetic(text) {
        return ReplyMessage::text(HELP_TEXT);
    }

    match evaluate(text) {
        Ok(value) => ReplyMessage::text(format!("= {}", format_number(value))),
        Err(e) => ReplyMessage::text(format!("Cannot calculate: {}", e)),
    }
}

/// Only digits, ".", whitespace, operators and parentheses, with at least one
/// binary operator
fn looks_like_arithmetic(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.len() > MAX_EXPRESSION_LENGTH {
        return false;
    }
    let allowed = text
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || ".+-*/%()".contains(c));
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let has_operator = text.chars().any(|c| "+-*/%".contains(c));
    allowed && has_digit && has_operator
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn number(i: &str) -> IResult<&str, Value> {
    map(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        |literal: &str| {
            literal
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber(literal.to_string()))
        },
    )(i)
}

fn parens(i: &str) -> IResult<&str, Value> {
    preceded(char('('), cut(terminated(expr, char(')'))))(i)
}

// factor := ('+' | '-') factor | number | '(' expr ')'
fn factor(i: &str) -> IResult<&str, Value> {
    ws(alt((
        number,
        map(preceded(char('-'), cut(factor)), |v: Value| v.map(|n| -n)),
        preceded(char('+'), cut(factor)),
        parens,
    )))(i)
}

// term := factor (('*' | '/' | '%') factor)*
fn term(i: &str) -> IResult<&str, Value> {
    let (i, first) = factor(i)?;
    fold_many0(
        pair(one_of("*/%"), cut(factor)),
        move || first.clone(),
        |acc: Value, (op, rhs): (char, Value)| -> Value {
            let (lhs, rhs) = (acc?, rhs?);
            match op {
                '*' => Ok(lhs * rhs),
                _ if rhs == 0.0 => Err(EvalError::DivisionByZero),
                '/' => Ok(lhs / rhs),
                _ => Ok(lhs % rhs),
            }
        },
    )(i)
}

// expr := term (('+' | '-') term)*
fn expr(i: &str) -> IResult<&str, Value> {
    let (i, first) = term(i)?;
    fold_many0(
        pair(one_of("+-"), cut(term)),
        move || first.clone(),
        |acc: Value, (op, rhs): (char, Value)| -> Value {
            let (lhs, rhs) = (acc?, rhs?);
            Ok(if op == '+' { lhs + rhs } else { lhs - rhs })
        },
    )(i)
}

fn unexpected(rest: &str) -> EvalError {
    match rest.trim_start().chars().next() {
        Some(c) => EvalError::UnexpectedToken(c.to_string()),
        None => EvalError::UnexpectedEnd,
    }
}

/// Evaluate an arithmetic expression
pub fn evaluate(text: &str) -> Result<f64, EvalError> {
    if text.trim().len() > MAX_EXPRESSION_LENGTH {
        return Err(EvalError::TooLong);
    }

    let value = match expr(text) {
        Ok((rest, value)) if rest.trim().is_empty() => value?,
        Ok((rest, _)) => return Err(unexpected(rest)),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => return Err(unexpected(e.input)),
        Err(nom::Err::Incomplete(_)) => return Err(EvalError::UnexpectedEnd),
    };
    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

/// Integers print without decimals, everything else with up to 6 places
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{:.6}", value);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}
