//! Keypad layout
//!
//! Buttons carry an element id, a label, the intent they fire and a
//! `data-action` class matching the stylesheet (`operator`, `equals` and
//! `clear` are colored; `span-2` widens a button to two columns).
//!
//! Layout:
//! ```text
//! [ MC ] [ MR ] [ M+ ] [ M- ]
//! [ π  ] [ e  ] [ (  ] [ )  ]
//! [ x² ] [ √  ] [1/x ] [ xʸ ]
//! [ AC ] [ CE ] [ %  ] [ /  ]
//! [ 7  ] [ 8  ] [ 9  ] [ *  ]
//! [ 4  ] [ 5  ] [ 6  ] [ -  ]
//! [ 1  ] [ 2  ] [ 3  ] [ +  ]
//! [     0     ] [ .  ] [ ±  ]
//! [     ⌫     ] [     =     ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Operation;
use crate::intent::{Function, Intent};

/// Styling class of a button (`data-action` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    /// Digits and the decimal point
    Digit,
    /// Binary operators
    Operator,
    /// The equals key
    Equals,
    /// Clear-all, clear-entry and backspace
    Clear,
    /// Named functions
    Func,
    /// Memory register keys
    Memory,
}

impl ButtonAction {
    /// Returns the attribute value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Digit => "digit",
            Self::Operator => "operator",
            Self::Equals => "equals",
            Self::Clear => "clear",
            Self::Func => "func",
            Self::Memory => "memory",
        }
    }

    /// Classifies an intent
    #[must_use]
    pub const fn of(intent: Intent) -> Self {
        match intent {
            Intent::Digit(_) | Intent::Decimal => Self::Digit,
            Intent::Operator(_) => Self::Operator,
            Intent::Equals => Self::Equals,
            Intent::ClearAll | Intent::ClearEntry | Intent::Backspace => Self::Clear,
            Intent::Func(_) | Intent::RecallHistory(_) => Self::Func,
            Intent::MemoryClear
            | Intent::MemoryAdd
            | Intent::MemorySubtract
            | Intent::MemoryRecall => Self::Memory,
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDef {
    /// Element id
    pub id: String,
    /// Visible label
    pub label: String,
    /// Intent fired on click
    pub intent: Intent,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
    /// Styling class
    pub data_action: ButtonAction,
}

impl ButtonDef {
    /// Creates a single-column button, deriving id and label from the intent
    #[must_use]
    pub fn new(intent: Intent, row: usize, col: usize) -> Self {
        Self {
            id: button_id(intent),
            label: button_label(intent),
            intent,
            row,
            col,
            span: 1,
            data_action: ButtonAction::of(intent),
        }
    }

    /// Widens the button
    #[must_use]
    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Returns true if the button covers grid cell `(row, col)`
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }

    /// Returns the CSS classes of the button element
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec!["keypad-btn".to_string()];
        if self.span > 1 {
            classes.push(format!("span-{}", self.span));
        }
        classes
    }
}

fn operation_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
        Operation::Power => "power",
    }
}

fn button_id(intent: Intent) -> String {
    match intent {
        Intent::Digit(d) => format!("btn-{d}"),
        Intent::Decimal => "btn-decimal".to_string(),
        Intent::Operator(op) => format!("btn-{}", operation_name(op)),
        Intent::Equals => "btn-equals".to_string(),
        Intent::ClearAll => "btn-clear-all".to_string(),
        Intent::ClearEntry => "btn-clear-entry".to_string(),
        Intent::Backspace => "btn-backspace".to_string(),
        Intent::Func(Function::OpenParen) => "btn-open-paren".to_string(),
        Intent::Func(Function::CloseParen) => "btn-close-paren".to_string(),
        Intent::Func(func) => format!("btn-{}", func.name()),
        Intent::MemoryClear => "btn-mc".to_string(),
        Intent::MemoryAdd => "btn-m-plus".to_string(),
        Intent::MemorySubtract => "btn-m-minus".to_string(),
        Intent::MemoryRecall => "btn-mr".to_string(),
        Intent::RecallHistory(i) => format!("history-{i}"),
    }
}

fn button_label(intent: Intent) -> String {
    match intent {
        Intent::Digit(d) => d.to_string(),
        Intent::Decimal => ".".to_string(),
        Intent::Operator(op) => op.symbol().to_string(),
        Intent::Equals => "=".to_string(),
        Intent::ClearAll => "AC".to_string(),
        Intent::ClearEntry => "CE".to_string(),
        Intent::Backspace => "⌫".to_string(),
        Intent::Func(func) => func.label().to_string(),
        Intent::MemoryClear => "MC".to_string(),
        Intent::MemoryAdd => "M+".to_string(),
        Intent::MemorySubtract => "M-".to_string(),
        Intent::MemoryRecall => "MR".to_string(),
        Intent::RecallHistory(i) => format!("#{i}"),
    }
}

/// Calculator keypad layout
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<ButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        use Intent::{
            ClearAll, ClearEntry, Decimal, Digit, Equals, Func, MemoryAdd, MemoryClear,
            MemoryRecall, MemorySubtract,
        };

        let op = Intent::Operator;
        let buttons = vec![
            // Row 0: memory
            ButtonDef::new(MemoryClear, 0, 0),
            ButtonDef::new(MemoryRecall, 0, 1),
            ButtonDef::new(MemoryAdd, 0, 2),
            ButtonDef::new(MemorySubtract, 0, 3),
            // Row 1: constants and parens
            ButtonDef::new(Func(Function::Pi), 1, 0),
            ButtonDef::new(Func(Function::E), 1, 1),
            ButtonDef::new(Func(Function::OpenParen), 1, 2),
            ButtonDef::new(Func(Function::CloseParen), 1, 3),
            // Row 2: unary functions
            ButtonDef::new(Func(Function::Square), 2, 0),
            ButtonDef::new(Func(Function::Sqrt), 2, 1),
            ButtonDef::new(Func(Function::Reciprocal), 2, 2),
            ButtonDef::new(Func(Function::Pow), 2, 3),
            // Row 3: AC CE % /
            ButtonDef::new(ClearAll, 3, 0),
            ButtonDef::new(ClearEntry, 3, 1),
            ButtonDef::new(Func(Function::Percent), 3, 2),
            ButtonDef::new(op(Operation::Divide), 3, 3),
            // Rows 4-6: digits and operators
            ButtonDef::new(Digit(7), 4, 0),
            ButtonDef::new(Digit(8), 4, 1),
            ButtonDef::new(Digit(9), 4, 2),
            ButtonDef::new(op(Operation::Multiply), 4, 3),
            ButtonDef::new(Digit(4), 5, 0),
            ButtonDef::new(Digit(5), 5, 1),
            ButtonDef::new(Digit(6), 5, 2),
            ButtonDef::new(op(Operation::Subtract), 5, 3),
            ButtonDef::new(Digit(1), 6, 0),
            ButtonDef::new(Digit(2), 6, 1),
            ButtonDef::new(Digit(3), 6, 2),
            ButtonDef::new(op(Operation::Add), 6, 3),
            // Row 7: 0 . ±
            ButtonDef::new(Digit(0), 7, 0).with_span(2),
            ButtonDef::new(Decimal, 7, 2),
            ButtonDef::new(Func(Function::Sign), 7, 3),
            // Row 8: backspace and equals
            ButtonDef::new(Intent::Backspace, 8, 0).with_span(2),
            ButtonDef::new(Equals, 8, 2).with_span(2),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 9,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[ButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Returns the buttons of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &ButtonDef> {
        self.buttons.iter().filter(move |b| b.row == row)
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that fires `intent`
    #[must_use]
    pub fn find_button_by_intent(&self, intent: Intent) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.intent == intent)
    }

    /// Resolves a click on element `id` to its intent
    #[must_use]
    pub fn handle_click(&self, id: &str) -> Option<Intent> {
        self.find_button_by_id(id).map(|btn| btn.intent)
    }

    /// Renders the grid as text, one line per row
    #[must_use]
    pub fn render_text(&self) -> String {
        const CELL: usize = 6;
        (0..self.rows)
            .map(|r| {
                self.row(r)
                    .map(|b| {
                        let width = CELL * b.span + (b.span - 1);
                        format!("[{:^width$}]", b.label, width = width - 2)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ===== ButtonAction tests =====

    #[test]
    fn test_button_action_of() {
        assert_eq!(ButtonAction::of(Intent::Digit(3)), ButtonAction::Digit);
        assert_eq!(ButtonAction::of(Intent::Decimal), ButtonAction::Digit);
        assert_eq!(
            ButtonAction::of(Intent::Operator(Operation::Add)),
            ButtonAction::Operator
        );
        assert_eq!(ButtonAction::of(Intent::Equals), ButtonAction::Equals);
        assert_eq!(ButtonAction::of(Intent::Backspace), ButtonAction::Clear);
        assert_eq!(
            ButtonAction::of(Intent::Func(Function::Sqrt)),
            ButtonAction::Func
        );
        assert_eq!(ButtonAction::of(Intent::MemoryAdd), ButtonAction::Memory);
    }

    #[test]
    fn test_button_action_display() {
        assert_eq!(ButtonAction::Operator.to_string(), "operator");
        assert_eq!(ButtonAction::Memory.as_str(), "memory");
    }

    // ===== ButtonDef tests =====

    #[test]
    fn test_button_def_ids() {
        assert_eq!(ButtonDef::new(Intent::Digit(5), 0, 0).id, "btn-5");
        assert_eq!(
            ButtonDef::new(Intent::Operator(Operation::Multiply), 0, 0).id,
            "btn-times"
        );
        assert_eq!(
            ButtonDef::new(Intent::Func(Function::OpenParen), 0, 0).id,
            "btn-open-paren"
        );
        assert_eq!(
            ButtonDef::new(Intent::Func(Function::Reciprocal), 0, 0).id,
            "btn-reciprocal"
        );
        assert_eq!(ButtonDef::new(Intent::MemoryAdd, 0, 0).id, "btn-m-plus");
    }

    #[test]
    fn test_button_def_span_and_classes() {
        let btn = ButtonDef::new(Intent::Digit(0), 7, 0).with_span(2);
        assert!(btn.covers(7, 0));
        assert!(btn.covers(7, 1));
        assert!(!btn.covers(7, 2));
        assert_eq!(btn.classes(), vec!["keypad-btn", "span-2"]);
        assert_eq!(ButtonDef::new(Intent::Decimal, 7, 2).classes(), vec!["keypad-btn"]);
    }

    // ===== Keypad tests =====

    #[test]
    fn test_keypad_dimensions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.dimensions(), (9, 4));
        assert_eq!(keypad.button_count(), 33);
    }

    #[test]
    fn test_keypad_grid_fully_covered_once() {
        let keypad = Keypad::new();
        let (rows, cols) = keypad.dimensions();
        for r in 0..rows {
            for c in 0..cols {
                let covering = keypad.buttons().iter().filter(|b| b.covers(r, c)).count();
                assert_eq!(covering, 1, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_keypad_unique_ids() {
        let keypad = Keypad::new();
        let ids: HashSet<_> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_keypad_has_every_input_intent() {
        let keypad = Keypad::new();
        for d in 0..=9 {
            assert!(keypad.find_button_by_intent(Intent::Digit(d)).is_some());
        }
        for op in Operation::ALL {
            assert!(keypad.find_button_by_intent(Intent::Operator(op)).is_some());
        }
        for func in Function::ALL {
            assert!(
                keypad.find_button_by_intent(Intent::Func(func)).is_some(),
                "{func}"
            );
        }
        for intent in [
            Intent::Decimal,
            Intent::Equals,
            Intent::ClearAll,
            Intent::ClearEntry,
            Intent::Backspace,
            Intent::MemoryClear,
            Intent::MemoryAdd,
            Intent::MemorySubtract,
            Intent::MemoryRecall,
        ] {
            assert!(keypad.find_button_by_intent(intent).is_some(), "{intent:?}");
        }
    }

    #[test]
    fn test_keypad_get_button_at() {
        let keypad = Keypad::new();
        assert_eq!(keypad.get_button_at(4, 0).unwrap().label, "7");
        assert_eq!(keypad.get_button_at(8, 3).unwrap().intent, Intent::Equals);
        assert!(keypad.get_button_at(9, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_keypad_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-7"), Some(Intent::Digit(7)));
        assert_eq!(
            keypad.handle_click("btn-sqrt"),
            Some(Intent::Func(Function::Sqrt))
        );
        assert_eq!(keypad.handle_click("btn-nope"), None);
    }

    #[test]
    fn test_keypad_colored_buttons() {
        let keypad = Keypad::new();
        let equals = keypad.find_button_by_id("btn-equals").unwrap();
        assert_eq!(equals.data_action, ButtonAction::Equals);
        let clear = keypad.find_button_by_id("btn-clear-all").unwrap();
        assert_eq!(clear.data_action, ButtonAction::Clear);
    }

    #[test]
    fn test_render_text() {
        let text = Keypad::new().render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains("MC"));
        assert!(lines[8].contains('='));
        assert_eq!(lines[7].chars().count(), lines[6].chars().count());
    }
}
