//! Binary arithmetic operations
//!
//! Every step of an evaluation funnels through [`Calculator::calculate`],
//! so a non-finite intermediate value stops the evaluation at the exact
//! subexpression that produced it.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operators accepted in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Power (^)
    Power,
}

impl Operation {
    /// All operators, in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the operator symbol as written in the buffer
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    /// Parses an operator from its buffer symbol
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    /// Returns true if `ch` is one of the operator symbols
    #[must_use]
    pub const fn is_operator_char(ch: char) -> bool {
        Self::from_symbol(ch).is_some()
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Stateless arithmetic with finiteness checks
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Applies `op` to two operands
    pub fn calculate(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        let raw = match op {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
            Operation::Power => a.powf(b),
        };
        Self::check_finite(raw)
    }

    /// Negates a value
    pub fn negate(value: f64) -> CalcResult<f64> {
        Self::check_finite(-value)
    }

    /// Rejects NaN and infinities
    pub fn check_finite(value: f64) -> CalcResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFiniteResult)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_symbol_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_from_symbol_rejects_others() {
        for ch in ['%', '(', ')', '.', '7', 'x'] {
            assert_eq!(Operation::from_symbol(ch), None, "{ch}");
            assert!(!Operation::is_operator_char(ch));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::Power.to_string(), "^");
        assert_eq!(Operation::Multiply.to_string(), "*");
    }

    #[test]
    fn test_calculate_basic() {
        assert_eq!(Calculator::calculate(2.0, 3.0, Operation::Add), Ok(5.0));
        assert_eq!(
            Calculator::calculate(2.0, 3.0, Operation::Subtract),
            Ok(-1.0)
        );
        assert_eq!(
            Calculator::calculate(4.0, 3.0, Operation::Multiply),
            Ok(12.0)
        );
        assert_eq!(Calculator::calculate(12.0, 4.0, Operation::Divide), Ok(3.0));
        assert_eq!(Calculator::calculate(2.0, 10.0, Operation::Power), Ok(1024.0));
    }

    #[test]
    fn test_divide_by_zero_is_non_finite() {
        assert_eq!(
            Calculator::calculate(5.0, 0.0, Operation::Divide),
            Err(CalcError::NonFiniteResult)
        );
        assert_eq!(
            Calculator::calculate(0.0, 0.0, Operation::Divide),
            Err(CalcError::NonFiniteResult)
        );
    }

    #[test]
    fn test_power_overflow_and_nan() {
        assert_eq!(
            Calculator::calculate(10.0, 1000.0, Operation::Power),
            Err(CalcError::NonFiniteResult)
        );
        assert_eq!(
            Calculator::calculate(-2.0, 0.5, Operation::Power),
            Err(CalcError::NonFiniteResult)
        );
    }

    #[test]
    fn test_negate() {
        assert_eq!(Calculator::negate(5.0), Ok(-5.0));
        assert_eq!(Calculator::negate(-5.0), Ok(5.0));
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            let r1 = Calculator::calculate(a, b, Operation::Add).unwrap();
            let r2 = Calculator::calculate(b, a, Operation::Add).unwrap();
            prop_assert_eq!(r1, r2);
        }

        #[test]
        fn prop_multiply_identity(a in -1e10f64..1e10f64) {
            prop_assert_eq!(Calculator::calculate(a, 1.0, Operation::Multiply), Ok(a));
        }

        #[test]
        fn prop_divide_by_self(a in 1e-3f64..1e10f64) {
            let r = Calculator::calculate(a, a, Operation::Divide).unwrap();
            prop_assert!((r - 1.0).abs() < 1e-12);
        }
    }
}
