//! Output surfaces
//!
//! The editor never renders anything itself. After each intent the
//! controller hands a [`DisplayFrame`] to a [`DisplaySurface`], and after a
//! successful evaluation the full history list to a [`HistorySurface`].

use crate::core::history::HistoryEntry;
pub use crate::editor::DisplayFrame;

/// Receives the display text after every operation
pub trait DisplaySurface {
    /// Shows a frame
    fn render(&mut self, frame: &DisplayFrame);
}

/// Receives the history list, newest first
pub trait HistorySurface {
    /// Shows the full history list
    fn render_history(&mut self, entries: &[HistoryEntry]);
}

/// A surface that keeps what it is shown
///
/// Unbounded by default. [`RecordingSurface::keeping_last`] caps both
/// lists so long-running sessions stay in constant memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    frames: Vec<DisplayFrame>,
    histories: Vec<Vec<HistoryEntry>>,
    limit: Option<usize>,
}

impl RecordingSurface {
    /// Creates an empty, unbounded recording
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recording that retains only the newest `count` frames and
    /// history snapshots (at least one)
    #[must_use]
    pub fn keeping_last(count: usize) -> Self {
        Self {
            limit: Some(count.max(1)),
            ..Self::default()
        }
    }

    /// Returns the retention cap, if any
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Every frame rendered so far, oldest first
    #[must_use]
    pub fn frames(&self) -> &[DisplayFrame] {
        &self.frames
    }

    /// The most recent frame
    #[must_use]
    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.frames.last()
    }

    /// Every history snapshot rendered so far, oldest first
    #[must_use]
    pub fn histories(&self) -> &[Vec<HistoryEntry>] {
        &self.histories
    }

    /// The most recent history snapshot
    #[must_use]
    pub fn last_history(&self) -> Option<&[HistoryEntry]> {
        self.histories.last().map(Vec::as_slice)
    }

    /// Forgets everything recorded
    pub fn clear(&mut self) {
        self.frames.clear();
        self.histories.clear();
    }
}

impl DisplaySurface for RecordingSurface {
    fn render(&mut self, frame: &DisplayFrame) {
        self.frames.push(frame.clone());
        retain_newest(&mut self.frames, self.limit);
    }
}

impl HistorySurface for RecordingSurface {
    fn render_history(&mut self, entries: &[HistoryEntry]) {
        self.histories.push(entries.to_vec());
        retain_newest(&mut self.histories, self.limit);
    }
}

fn retain_newest<T>(items: &mut Vec<T>, limit: Option<usize>) {
    if let Some(limit) = limit {
        if items.len() > limit {
            items.drain(..items.len() - limit);
        }
    }
}
