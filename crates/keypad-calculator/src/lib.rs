//! Keypad Calculator - expression buffer editor
//!
//! The editor holds a single text buffer built up one key at a time. Keys
//! arrive as [`Intent`](intent::Intent)s, each of which rewrites the buffer;
//! `=` parses the buffer with a recursive descent parser, evaluates it and
//! archives the result in a bounded history list.
//!
//! # Layers
//!
//! - [`core`]: tokenizer, parser, evaluator, history and numeric formatting
//! - [`editor`]: the buffer editing operations and the memory register
//! - [`intent`] and [`keypad`]: input vocabulary and button layout
//! - [`surface`] and [`controller`]: rendering hooks and intent routing
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut controller = Controller::new(RecordingSurface::new());
//! for key in ["1", "+", "2", "Enter"] {
//!     controller.press_key(key).unwrap();
//! }
//!
//! let frame = controller.surface().last_frame().unwrap();
//! assert_eq!(frame.display, "3");
//! assert_eq!(controller.editor().history().latest().unwrap().display(), "1+2 = 3");
//!
//! // Division by zero shows "Error" and records nothing
//! for key in ["5", "/", "0", "="] {
//!     controller.press_key(key).unwrap();
//! }
//! assert_eq!(controller.surface().last_frame().unwrap().display, "Error");
//! assert_eq!(controller.editor().history().len(), 1);
//! ```

// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod core;
pub mod driver;
pub mod editor;
pub mod intent;
pub mod keypad;
pub mod surface;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EditorConfig;
    pub use crate::controller::Controller;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Calculator, Operation};
    pub use crate::driver::{CalculatorDriver, HistoryItem};
    pub use crate::editor::{DisplayFrame, Editor, EvalOutcome, ERROR_TEXT};
    pub use crate::intent::{Function, Intent, UnknownKey};
    pub use crate::keypad::{ButtonAction, ButtonDef, Keypad};
    pub use crate::surface::{DisplaySurface, HistorySurface, RecordingSurface};
}
