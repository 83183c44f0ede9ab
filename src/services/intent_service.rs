//! Maps message text to a [`Command`].
//!
//! Payment requests are checked before expenses: `pp 10t` asks for a QR code,
//! it does not log ten baht of transportation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Category, Command};

lazy_static! {
    /// Optional amount followed by the `pp` trigger (`ppqr` is the long form)
    static ref PAYMENT_PATTERN: Regex = Regex::new(r"([0-9.]+)?pp(?:qr)?").unwrap();
    /// Amount run followed by a category code at the very end
    static ref EXPENSE_PATTERN: Regex = Regex::new(r"[0-9.]+([tfml])$").unwrap();
}

pub fn classify(text: &str) -> Command {
    let trimmed = text.trim();

    if let Some(command) = classify_payment(trimmed) {
        return command;
    }
    if let Some(command) = classify_expense(trimmed) {
        return command;
    }

    Command::Unrecognized {
        text: text.to_string(),
    }
}

fn classify_payment(text: &str) -> Option<Command> {
    if !PAYMENT_PATTERN.is_match(text) {
        return None;
    }

    let amount = PAYMENT_PATTERN
        .captures_iter(text)
        .find_map(|caps| caps.get(1))
        .and_then(|prefix| parse_amount(prefix.as_str()))
        .filter(|amount| *amount > 0.0);

    Some(Command::PaymentRequest { amount })
}

fn classify_expense(text: &str) -> Option<Command> {
    let caps = EXPENSE_PATTERN.captures(text)?;
    let code_match = caps.get(1)?;
    let code = code_match.as_str().chars().next()?;
    let category = Category::from_code(code)?;

    let amount = parse_amount(&text[..code_match.start()]).filter(|amount| *amount > 0.0)?;

    Some(Command::ExpenseEntry { category, amount })
}

/// Parse an amount out of free text.
///
/// Everything except digits and "." is dropped and only the first "." is kept,
/// so "12.5.3" reads as 12.53 and "lunch 2 x 40" as 240. Returns `None` when no
/// number remains.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_point = false;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' && !seen_point {
            seen_point = true;
            cleaned.push(c);
        }
    }

    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}
