//! Editor configuration

use serde::{Deserialize, Serialize};

use crate::core::history::History;
use crate::core::DEFAULT_PRECISION;

/// Tunables for an [`Editor`](crate::editor::Editor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// Fractional digits kept when rounding results and inserted literals
    pub precision: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: History::DEFAULT_MAX_ENTRIES,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl EditorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set rounding precision
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}
