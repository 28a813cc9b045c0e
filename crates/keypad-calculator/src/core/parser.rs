//! Tokenizer and recursive descent parser
//!
//! The tokenizer serves two callers. The parser consumes plain
//! [`Token`]s, while the buffer editor needs the source text of each
//! token so it can rewrite the trailing number in place; both come from
//! the same scan via [`Segment`].

use crate::core::{is_buffer_char, CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Operator symbol (binary, or unary for `+`/`-`)
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// A token together with the exact text it was scanned from
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    /// The scanned token
    pub token: Token,
    /// Source text of the token
    pub text: &'a str,
}

impl Segment<'_> {
    /// Returns true if this segment is a numeric literal
    #[must_use]
    pub const fn is_number(&self) -> bool {
        self.token.is_number()
    }
}

/// Tokenizer for converting expression strings to tokens
///
/// Numbers follow `\d+\.?\d*` or `\.?\d+`; every other accepted token is a
/// single operator or parenthesis character. Anything else is an error
/// rather than being skipped.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        let input = self.input;
        &input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        Ok(self.segments()?.into_iter().map(|s| s.token).collect())
    }

    /// Tokenizes the entire input, keeping the source text of each token
    pub fn segments(&mut self) -> CalcResult<Vec<Segment<'a>>> {
        let mut segments = Vec::new();
        while let Some(segment) = self.next_segment()? {
            segments.push(segment);
        }
        Ok(segments)
    }

    /// Returns the next segment, or None at end of input
    pub fn next_segment(&mut self) -> CalcResult<Option<Segment<'a>>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };
        let start = self.pos;

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => match Operation::from_symbol(ch) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => return Err(CalcError::InvalidCharacter(ch)),
            },
        };

        let input = self.input;
        Ok(Some(Segment {
            token,
            text: &input[start..self.pos],
        }))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;

        if self.current_char() == Some('.') {
            // `.5` form: the dot must be followed by a digit
            if !matches!(self.peek_char(1), Some(d) if d.is_ascii_digit()) {
                return Err(CalcError::invalid_expression(format!(
                    "Unexpected '.' at position {start}"
                )));
            }
            self.advance();
            self.skip_digits();
        } else {
            self.skip_digits();
            if self.current_char() == Some('.') {
                self.advance();
                self.skip_digits();
            }
        }

        let text = &self.input[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| CalcError::invalid_expression(format!("Invalid number: '{text}'")))?;

        Ok(Token::Number(value))
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

// Long `1+1+...` chains build left-deep trees; the default recursive drop
// would use one stack frame per operator.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl AstNode {
    fn detach_children(&mut self, into: &mut Vec<AstNode>) {
        match self {
            Self::Number(_) => {}
            Self::Negate(inner) => into.push(std::mem::replace(&mut **inner, Self::Number(0.0))),
            Self::BinaryOp { left, right, .. } => {
                into.push(std::mem::replace(&mut **left, Self::Number(0.0)));
                into.push(std::mem::replace(&mut **right, Self::Number(0.0)));
            }
        }
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('-' | '+') unary | power
/// power      ::= primary ('^' unary)?      // Right associative
/// primary    ::= NUMBER | '(' expression ')'
/// ```
///
/// Unary minus binds looser than `^`, so `-2^2` is `-(2^2)`.
///
/// Every way of nesting deeper (`(`, a prefix sign, `^`) passes through
/// `unary`, which is capped at [`Parser::MAX_DEPTH`] levels.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Deepest nesting of parentheses, prefix signs and exponents accepted
    pub const MAX_DEPTH: usize = 256;

    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::invalid_expression(format!(
                "Unexpected {} at token {}",
                describe(token),
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(&Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(&Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        if self.depth >= Self::MAX_DEPTH {
            return Err(CalcError::invalid_expression("expression nested too deeply"));
        }
        self.depth += 1;
        let node = self.parse_signed();
        self.depth -= 1;
        node
    }

    fn parse_signed(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                let inner = self.parse_unary()?;
                Ok(AstNode::negate(inner))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            // Recurse through unary so `2^-1` and `2^3^2` both parse
            let exponent = self.parse_unary()?;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::invalid_expression("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(t) => Err(CalcError::invalid_expression(format!(
                        "Expected ')' but found {}",
                        describe(&t)
                    ))),
                    None => Err(CalcError::invalid_expression("Unclosed parenthesis")),
                }
            }
            other => Err(CalcError::invalid_expression(format!(
                "Unexpected {}",
                describe(&other)
            ))),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {n}"),
        Token::Operator(op) => format!("operator '{op}'"),
        Token::LeftParen => "'('".to_string(),
        Token::RightParen => "')'".to_string(),
    }
}

/// Returns the text of every segment that was scanned from `input`
///
/// Convenience for callers that only need to validate and split.
pub fn segment_texts(input: &str) -> CalcResult<Vec<&str>> {
    Ok(Tokenizer::new(input)
        .segments()?
        .into_iter()
        .map(|s| s.text)
        .collect())
}

/// Strips whitespace and rejects characters outside the buffer alphabet
pub fn sanitize(input: &str) -> CalcResult<String> {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars().filter(|c| !c.is_whitespace()) {
        if !is_buffer_char(ch) {
            return Err(CalcError::InvalidCharacter(ch));
        }
        out.push(ch);
    }
    Ok(out)
}
