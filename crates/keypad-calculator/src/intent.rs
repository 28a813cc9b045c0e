//! Intents delivered to the editor
//!
//! An input device never touches the buffer directly: it produces an
//! [`Intent`], already classified, and the controller applies it. Keyboard
//! key names and keypad buttons both resolve to the same enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Operation;

/// A key or name that does not map to any intent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key: '{0}'")]
pub struct UnknownKey(pub String);

/// Named functions available on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    /// Append pi
    Pi,
    /// Append Euler's number
    E,
    /// Append `(`
    OpenParen,
    /// Append `)`
    CloseParen,
    /// Toggle the sign of the last number
    ///
    /// Adds a unary minus in front of the number, or removes the one already
    /// there: `5` -> `-5` -> `5` and `3-5` -> `3--5` -> `3-5`. Removing it
    /// rather than stacking another (`-5` -> `--5`) gives the same value with
    /// a shorter buffer. The other unary functions act on the unsigned number.
    Sign,
    /// x²
    Square,
    /// √x
    Sqrt,
    /// 1/x
    Reciprocal,
    /// x/100
    Percent,
    /// Append `^`
    Pow,
}

impl Function {
    /// All functions in keypad order
    pub const ALL: [Self; 10] = [
        Self::Pi,
        Self::E,
        Self::OpenParen,
        Self::CloseParen,
        Self::Sign,
        Self::Square,
        Self::Sqrt,
        Self::Reciprocal,
        Self::Percent,
        Self::Pow,
    ];

    /// Returns the function name used by `func(name)` intents
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Sign => "sign",
            Self::Square => "square",
            Self::Sqrt => "sqrt",
            Self::Reciprocal => "reciprocal",
            Self::Percent => "percent",
            Self::Pow => "pow",
        }
    }

    /// Returns the button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Sign => "±",
            Self::Square => "x²",
            Self::Sqrt => "√",
            Self::Reciprocal => "1/x",
            Self::Percent => "%",
            Self::Pow => "xʸ",
        }
    }

    /// Returns the unary transform for functions that rewrite the last number
    #[must_use]
    pub fn unary(self) -> Option<fn(f64) -> f64> {
        let transform: fn(f64) -> f64 = match self {
            Self::Square => square,
            Self::Sqrt => f64::sqrt,
            Self::Reciprocal => f64::recip,
            Self::Percent => percent,
            _ => return None,
        };
        Some(transform)
    }

    /// Returns the constant appended by `pi` and `e`
    #[must_use]
    pub const fn constant(self) -> Option<f64> {
        match self {
            Self::Pi => Some(std::f64::consts::PI),
            Self::E => Some(std::f64::consts::E),
            _ => None,
        }
    }
}

fn square(x: f64) -> f64 {
    x * x
}

fn percent(x: f64) -> f64 {
    x / 100.0
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|func| func.name() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// A discrete, already classified input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// Append a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Append an operator
    Operator(Operation),
    /// Evaluate the buffer
    Equals,
    /// Empty the buffer
    ClearAll,
    /// Zero the last number
    ClearEntry,
    /// Drop the last character
    Backspace,
    /// Apply a named function
    Func(Function),
    /// Zero the memory register
    MemoryClear,
    /// Add the buffer value to memory
    MemoryAdd,
    /// Subtract the buffer value from memory
    MemorySubtract,
    /// Append the memory value
    MemoryRecall,
    /// Re-inject the result of a history entry (0 = newest)
    RecallHistory(usize),
}

impl Intent {
    /// Maps a DOM-style keyboard key name to an intent
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(digit) = ch.to_digit(10) {
                return u8::try_from(digit).ok().map(Self::Digit);
            }
            if let Some(op) = Operation::from_symbol(ch) {
                return Some(Self::Operator(op));
            }
        }

        match key {
            "." => Some(Self::Decimal),
            "(" => Some(Self::Func(Function::OpenParen)),
            ")" => Some(Self::Func(Function::CloseParen)),
            "%" => Some(Self::Func(Function::Percent)),
            "Enter" | "=" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::ClearAll),
            "Delete" => Some(Self::ClearEntry),
            _ => None,
        }
    }

    /// Maps a keypad button name (`AC`, `CE`, `MC`, `M+`, `M-`, `MR`)
    #[must_use]
    pub fn from_button_name(name: &str) -> Option<Self> {
        match name {
            "AC" => Some(Self::ClearAll),
            "CE" => Some(Self::ClearEntry),
            "MC" => Some(Self::MemoryClear),
            "M+" => Some(Self::MemoryAdd),
            "M-" => Some(Self::MemorySubtract),
            "MR" => Some(Self::MemoryRecall),
            _ => None,
        }
    }

    /// Returns true for the intents that evaluate the buffer
    #[must_use]
    pub const fn is_equals(&self) -> bool {
        matches!(self, Self::Equals)
    }
}

/// Parses keyboard keys, button names, then function names, in that order
impl FromStr for Intent {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
            .or_else(|| Self::from_button_name(s))
            .map_or_else(|| s.parse::<Function>().map(Self::Func), Ok)
    }
}
