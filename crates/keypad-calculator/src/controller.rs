//! Controller: routes intents into an editor and renders the result
//!
//! Flow per intent:
//! ```text
//! key name / button id -> Intent -> Editor operation
//!     -> DisplaySurface::render(frame)            always
//!     -> HistorySurface::render_history(entries)  after a successful `=` or a recall
//! ```

use tracing::{debug, trace};

use crate::config::EditorConfig;
use crate::core::Operation;
use crate::editor::{Editor, EvalOutcome};
use crate::intent::{Function, Intent, UnknownKey};
use crate::keypad::Keypad;
use crate::surface::{DisplaySurface, HistorySurface};

/// Owns an editor, the keypad layout and an output surface
#[derive(Debug, Clone)]
pub struct Controller<S> {
    editor: Editor,
    keypad: Keypad,
    surface: S,
}

impl<S: Default + DisplaySurface + HistorySurface> Default for Controller<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: DisplaySurface + HistorySurface> Controller<S> {
    /// Creates a controller with a default editor
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(EditorConfig::default(), surface)
    }

    /// Creates a controller with a configured editor
    #[must_use]
    pub fn with_config(config: EditorConfig, surface: S) -> Self {
        Self {
            editor: Editor::with_config(config),
            keypad: Keypad::new(),
            surface,
        }
    }

    /// Returns the editor
    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Returns the editor mutably, bypassing rendering
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// Returns the keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the surface
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the controller, returning the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Applies an intent and renders
    ///
    /// Returns the evaluation outcome for [`Intent::Equals`], `None` otherwise.
    pub fn dispatch(&mut self, intent: Intent) -> Option<EvalOutcome> {
        let mut outcome = None;
        let mut history_changed = false;

        match intent {
            Intent::Digit(d) => self.editor.append_digit(d),
            Intent::Decimal => self.editor.append_decimal(),
            Intent::Operator(op) => self.editor.append_operator(op),
            Intent::Equals => {
                let result = self.editor.evaluate();
                history_changed = result.is_value();
                outcome = Some(result);
            }
            Intent::ClearAll => self.editor.clear_all(),
            Intent::ClearEntry => self.editor.clear_entry(),
            Intent::Backspace => self.editor.backspace(),
            Intent::Func(func) => apply_function(&mut self.editor, func),
            Intent::MemoryClear => self.editor.memory_clear(),
            Intent::MemoryAdd => self.editor.memory_add(),
            Intent::MemorySubtract => self.editor.memory_subtract(),
            Intent::MemoryRecall => self.editor.memory_recall(),
            Intent::RecallHistory(index) => {
                history_changed = self.editor.recall_history(index).is_some();
            }
        }

        debug!(?intent, buffer = %self.editor.buffer(), error = self.editor.is_error(), "dispatched");
        self.render();
        if history_changed {
            self.render_history();
        }
        outcome
    }

    /// Dispatches a key name
    ///
    /// Accepts keyboard keys (`7`, `Enter`, `Escape`), button names (`M+`,
    /// `CE`) and function names (`sqrt`, `pi`).
    pub fn press_key(&mut self, key: &str) -> Result<Option<EvalOutcome>, UnknownKey> {
        let intent: Intent = key.parse()?;
        trace!(key, ?intent, "key");
        Ok(self.dispatch(intent))
    }

    /// Dispatches a click on keypad button `id`
    pub fn click(&mut self, id: &str) -> Result<Option<EvalOutcome>, UnknownKey> {
        let intent = self
            .keypad
            .handle_click(id)
            .ok_or_else(|| UnknownKey(id.to_string()))?;
        Ok(self.dispatch(intent))
    }

    /// Selects history entry `index` (0 = newest); false if out of range
    pub fn select_history(&mut self, index: usize) -> bool {
        let before = self.editor.history().len();
        self.dispatch(Intent::RecallHistory(index));
        index < before
    }

    /// Renders the current frame
    pub fn render(&mut self) {
        let frame = self.editor.frame();
        self.surface.render(&frame);
    }

    /// Renders the full history list
    pub fn render_history(&mut self) {
        let entries = self.editor.history().snapshot();
        self.surface.render_history(&entries);
    }
}

fn apply_function(editor: &mut Editor, func: Function) {
    if let Some(value) = func.constant() {
        editor.append_constant(value);
        return;
    }
    if let Some(transform) = func.unary() {
        editor.apply_unary(transform);
        return;
    }
    match func {
        Function::OpenParen => editor.append_text("("),
        Function::CloseParen => editor.append_text(")"),
        Function::Sign => editor.toggle_sign(),
        Function::Pow => editor.append_operator(Operation::Power),
        Function::Pi
        | Function::E
        | Function::Square
        | Function::Sqrt
        | Function::Reciprocal
        | Function::Percent => {}
    }
}
