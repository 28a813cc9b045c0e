//! Expression buffer editor
//!
//! The editor owns the expression under construction, the memory
//! register and the history list. Every operation is a small rewrite of
//! the buffer; none of them raise errors. A failed evaluation clears the
//! buffer and puts the editor into the error display state until the next
//! operation.
//!
//! Tokens are never cached: each edit re-scans the buffer, so there is no
//! second representation that could drift out of sync.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::core::evaluator::Evaluator;
use crate::core::history::{History, HistoryEntry};
use crate::core::parser::{sanitize, Segment, Tokenizer};
use crate::core::{format_rounded, round_to, CalcError, CalcResult, Operation};

/// Text shown by the display surface when the editor is in the error state
pub const ERROR_TEXT: &str = "Error";

/// What the display surface shows after an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// Main display text: the buffer, or [`ERROR_TEXT`]
    pub display: String,
    /// Raw buffer echo ("expression so far")
    pub expression: String,
    /// True while the error state is active
    pub error: bool,
}

/// Result of [`Editor::evaluate`]
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    /// The buffer was empty; nothing happened
    Empty,
    /// Evaluation succeeded and was archived to history
    Value(f64),
    /// Evaluation failed; the buffer was cleared
    Failed(CalcError),
}

impl EvalOutcome {
    /// Returns true if a history entry was added
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// The expression buffer editor
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: String,
    memory: f64,
    history: History,
    evaluator: Evaluator,
    error: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates an editor with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates an editor from a configuration
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            buffer: String::new(),
            memory: 0.0,
            history: History::with_capacity(config.history_capacity),
            evaluator: Evaluator::with_precision(config.precision),
            error: false,
        }
    }

    /// Returns the current buffer text
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns the memory register
    #[must_use]
    pub const fn memory(&self) -> f64 {
        self.memory
    }

    /// Returns the history list
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Returns true while the error display state is active
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error
    }

    /// Returns the rounding precision
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.evaluator.precision()
    }

    /// Builds the frame the display surface should show
    #[must_use]
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame {
            display: if self.error {
                ERROR_TEXT.to_string()
            } else {
                self.buffer.clone()
            },
            expression: self.buffer.clone(),
            error: self.error,
        }
    }

    // ===== Buffer edits =====

    /// Appends a digit (0-9); larger values are ignored
    pub fn append_digit(&mut self, digit: u8) {
        self.begin();
        match char::from_digit(u32::from(digit), 10) {
            Some(ch) => self.buffer.push(ch),
            None => warn!(digit, "ignoring non-decimal digit"),
        }
    }

    /// Inserts a decimal point into the number at the end of the buffer
    ///
    /// Appends `0.` when the buffer does not end in a number and ignores
    /// a second point in the same number.
    pub fn append_decimal(&mut self) {
        self.begin();
        let ending = self
            .segments()
            .and_then(|segments| segments.last().filter(|s| s.is_number()).map(|s| s.text.contains('.')));
        match ending {
            None => self.buffer.push_str("0."),
            Some(false) => self.buffer.push('.'),
            Some(true) => debug!(buffer = %self.buffer, "number already has a decimal point"),
        }
    }

    /// Appends an operator, replacing a trailing one
    ///
    /// On an empty buffer only `-` (unary minus) is accepted.
    pub fn append_operator(&mut self, op: Operation) {
        self.begin();
        if self.buffer.is_empty() {
            if op == Operation::Subtract {
                self.buffer.push(op.symbol());
            }
            return;
        }
        if self.buffer.ends_with(Operation::is_operator_char) {
            self.buffer.pop();
        }
        self.buffer.push(op.symbol());
    }

    /// Appends a literal, unconditionally
    pub fn append_text(&mut self, text: &str) {
        self.begin();
        self.buffer.push_str(text);
    }

    /// Appends a constant, rounded to the editor precision
    pub fn append_constant(&mut self, value: f64) {
        let text = format_rounded(value, self.precision());
        self.append_text(&text);
    }

    /// Substitutes the last number in the buffer, or appends `text` if there is none
    pub fn replace_last_number(&mut self, text: &str) {
        self.begin();
        let rebuilt = {
            let Some(segments) = self.segments() else {
                return;
            };
            segments.iter().rposition(Segment::is_number).map(|index| {
                segments
                    .iter()
                    .enumerate()
                    .map(|(i, s)| if i == index { text } else { s.text })
                    .collect::<String>()
            })
        };
        match rebuilt {
            Some(buffer) => self.buffer = buffer,
            None => self.buffer.push_str(text),
        }
    }

    /// Applies `f` to the last number in the buffer
    ///
    /// The number is the unsigned token: on `3-5` the operand is `5`. A
    /// non-finite result shows the error state and leaves the buffer as is.
    pub fn apply_unary<F>(&mut self, f: F)
    where
        F: FnOnce(f64) -> f64,
    {
        self.begin();
        let Some((_, text)) = self.last_number() else {
            return;
        };
        let Ok(value) = text.parse::<f64>() else {
            warn!(%text, "trailing number does not parse");
            return;
        };
        let result = round_to(f(value), self.precision());
        if !result.is_finite() {
            debug!(value, "unary operation produced a non-finite result");
            self.error = true;
            return;
        }
        let replacement = format_rounded(result, self.precision());
        self.replace_last_number(&replacement);
    }

    /// Toggles a unary minus directly in front of the last number
    ///
    /// `5` -> `-5` -> `5`, `3-5` -> `3--5` -> `3-5`.
    pub fn toggle_sign(&mut self) {
        self.begin();
        if let Some(buffer) = self.sign_toggled() {
            self.buffer = buffer;
        }
    }

    /// Zeroes the last number
    ///
    /// Clears the whole buffer when there is no number or when the buffer
    /// is nothing but that one number.
    pub fn clear_entry(&mut self) {
        self.begin();
        let lone_or_missing = match self.segments() {
            Some(segments) => {
                segments.len() == 1 || !segments.iter().any(Segment::is_number)
            }
            None => true,
        };
        if lone_or_missing {
            self.buffer.clear();
            return;
        }
        self.replace_last_number("0");
        let stripped = leading_zero_pattern().replace_all(&self.buffer, "${1}${2}");
        self.buffer = stripped.into_owned();
    }

    /// Drops the last character
    pub fn backspace(&mut self) {
        self.begin();
        self.buffer.pop();
    }

    /// Empties the buffer
    pub fn clear_all(&mut self) {
        self.begin();
        self.buffer.clear();
    }

    /// Replaces the buffer with caller-supplied text
    ///
    /// Whitespace is stripped; any character outside the buffer alphabet
    /// rejects the whole input and leaves the buffer untouched.
    pub fn load(&mut self, expression: &str) -> CalcResult<()> {
        let clean = sanitize(expression)?;
        self.begin();
        self.buffer = clean;
        Ok(())
    }

    /// Replaces the buffer with the result of history entry `index` (0 = newest)
    pub fn recall_history(&mut self, index: usize) -> Option<&HistoryEntry> {
        self.begin();
        let entry = self.history.get(index)?;
        self.buffer = entry.result_text();
        Some(entry)
    }

    // ===== Evaluation =====

    /// Evaluates the buffer without touching any state
    pub fn try_evaluate(&self) -> CalcResult<f64> {
        self.evaluator.evaluate_str(&self.buffer)
    }

    /// Evaluates the buffer, archiving the result to history
    ///
    /// On success the buffer becomes the formatted result. On failure the
    /// buffer is cleared and the error state is shown.
    pub fn evaluate(&mut self) -> EvalOutcome {
        self.begin();
        if self.buffer.is_empty() {
            return EvalOutcome::Empty;
        }

        match self.try_evaluate() {
            Ok(value) => {
                debug!(expression = %self.buffer, value, "evaluated");
                self.history.record(&self.buffer, value);
                self.buffer = format_rounded(value, self.precision());
                EvalOutcome::Value(value)
            }
            Err(err) => {
                debug!(expression = %self.buffer, error = %err, "evaluation failed");
                self.buffer.clear();
                self.error = true;
                EvalOutcome::Failed(err)
            }
        }
    }

    // ===== Memory register =====

    /// Adds the buffer's value to memory (a failing buffer adds 0)
    pub fn memory_add(&mut self) {
        self.begin();
        let value = self.buffer_value_or_zero();
        self.memory = round_to(self.memory + value, self.precision());
    }

    /// Subtracts the buffer's value from memory (a failing buffer subtracts 0)
    pub fn memory_subtract(&mut self) {
        self.begin();
        let value = self.buffer_value_or_zero();
        self.memory = round_to(self.memory - value, self.precision());
    }

    /// Appends the memory value to the buffer
    pub fn memory_recall(&mut self) {
        let text = format_rounded(self.memory, self.precision());
        self.append_text(&text);
    }

    /// Zeroes the memory register
    pub fn memory_clear(&mut self) {
        self.begin();
        self.memory = 0.0;
    }

    // ===== Helpers =====

    fn begin(&mut self) {
        self.error = false;
    }

    fn buffer_value_or_zero(&self) -> f64 {
        if self.buffer.is_empty() {
            return 0.0;
        }
        self.try_evaluate().unwrap_or_else(|err| {
            warn!(buffer = %self.buffer, error = %err, "memory operation treats buffer as 0");
            0.0
        })
    }

    fn sign_toggled(&self) -> Option<String> {
        let segments = self.segments()?;
        let index = segments.iter().rposition(Segment::is_number)?;

        let has_unary_minus = index > 0
            && segments[index - 1].text == "-"
            && (index == 1
                || segments[index - 2].text == "("
                || segments[index - 2].token.is_operator());

        let mut rebuilt = String::with_capacity(self.buffer.len() + 1);
        for (i, segment) in segments.iter().enumerate() {
            if has_unary_minus && i + 1 == index {
                continue;
            }
            if !has_unary_minus && i == index {
                rebuilt.push('-');
            }
            rebuilt.push_str(segment.text);
        }
        Some(rebuilt)
    }

    /// Segments the buffer; a buffer that fails to scan is logged and treated as opaque
    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        match Tokenizer::new(&self.buffer).segments() {
            Ok(segments) => Some(segments),
            Err(err) => {
                warn!(buffer = %self.buffer, error = %err, "buffer does not tokenize");
                None
            }
        }
    }

    /// Finds the last numeric token: its segment index and text
    #[must_use]
    pub fn last_number(&self) -> Option<(usize, String)> {
        let segments = self.segments()?;
        let index = segments.iter().rposition(Segment::is_number)?;
        Some((index, segments[index].text.to_string()))
    }
}

/// `0` followed by a digit at the start of a number
fn leading_zero_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(^|[^\d.])0+(\d)").expect("leading zero pattern is valid"))
}
