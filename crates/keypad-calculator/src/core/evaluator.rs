//! AST evaluator
//!
//! Explicit walk over [`AstNode`]. A failing subexpression is reported as
//! soon as it is computed.

use crate::core::parser::{sanitize, AstNode, Parser};
use crate::core::{round_to, CalcResult, Calculator, DEFAULT_PRECISION};

/// Evaluator for AST expressions
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    precision: u32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator rounding to [`DEFAULT_PRECISION`] digits
    #[must_use]
    pub const fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }

    /// Creates an evaluator rounding results to `precision` fractional digits
    #[must_use]
    pub const fn with_precision(precision: u32) -> Self {
        Self { precision }
    }

    /// Returns the rounding precision
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Evaluates an AST node, unrounded
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Calculator::check_finite(*n),
            AstNode::Negate(inner) => Calculator::negate(self.evaluate(inner)?),
            AstNode::BinaryOp { .. } => {
                // Left-associative chains nest on the left: walk that spine
                // in a loop and recurse only into right operands.
                let mut rights = Vec::new();
                let mut leftmost = node;
                while let AstNode::BinaryOp { left, op, right } = leftmost {
                    rights.push((*op, right.as_ref()));
                    leftmost = left.as_ref();
                }

                let mut acc = self.evaluate(leftmost)?;
                for (op, right) in rights.into_iter().rev() {
                    acc = Calculator::calculate(acc, self.evaluate(right)?, op)?;
                }
                Ok(acc)
            }
        }
    }

    /// Sanitizes, parses and evaluates a buffer string, rounding the result
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let clean = sanitize(input)?;
        let ast = Parser::parse_str(&clean)?;
        let value = self.evaluate(&ast)?;
        Calculator::check_finite(round_to(value, self.precision))
    }
}
