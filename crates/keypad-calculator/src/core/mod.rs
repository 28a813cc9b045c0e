//! Arithmetic core: errors, operators, parser, evaluator and history
//!
//! Nothing in here knows about the buffer editing model; the editor
//! drives these pieces through [`Evaluator::evaluate_str`] and
//! [`History::record`].

pub mod evaluator;
pub mod history;
mod operations;
pub mod parser;

pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A character outside the buffer alphabet was found
    #[error("Invalid character: '{0}'")]
    InvalidCharacter(char),
    /// The expression does not parse
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// Division by zero, overflow, square root of a negative, ...
    #[error("Result is not a finite number")]
    NonFiniteResult,
}

impl CalcError {
    /// Creates an invalid expression error
    #[must_use]
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }
}

/// Characters allowed in a buffer, besides ASCII digits
pub const BUFFER_SYMBOLS: &[char] = &['.', '(', ')', '+', '-', '*', '/', '^'];

/// Returns true if `ch` may appear in a buffer
#[must_use]
pub fn is_buffer_char(ch: char) -> bool {
    ch.is_ascii_digit() || BUFFER_SYMBOLS.contains(&ch)
}

/// Default number of fractional digits kept when rounding
pub const DEFAULT_PRECISION: u32 = 12;

/// Rounds `value` to `digits` fractional decimal digits
///
/// Rounding goes through fixed-point formatting so the result matches
/// the decimal representation a user would expect (`0.1 + 0.2` -> `0.3`).
/// Negative zero is normalized to zero. Non-finite values pass through.
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let fixed = format!("{value:.prec$}", prec = digits as usize);
    let rounded = fixed.parse::<f64>().unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a value for re-insertion into the buffer
///
/// `f64`'s `Display` never emits exponent notation, so the output stays
/// inside the buffer alphabet for every finite value.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Rounds then formats, the path every literal takes into the buffer
#[must_use]
pub fn format_rounded(value: f64, digits: u32) -> String {
    format_number(round_to(value, digits))
}
