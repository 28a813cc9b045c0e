//! Output formatting
//!
//! Rendering is split from writing: the `render_*` methods return strings
//! so they can be tested, and [`Reporter`] writes diagnostics to stderr.

use console::{style, Term};
use keypad_calculator::core::history::HistoryEntry;
use keypad_calculator::editor::DisplayFrame;
use keypad_calculator::keypad::{ButtonAction, Keypad};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Everything a command reports at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Final display frame
    pub frame: DisplayFrame,
    /// Frames rendered along the way (only with `--trace`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<DisplayFrame>,
    /// History, newest first
    pub history: Vec<HistoryEntry>,
    /// Memory register
    pub memory: f64,
}

/// Renders frames, history and the keypad for stdout
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    /// Whether to use colors
    pub use_color: bool,
    /// Output format
    pub format: OutputFormat,
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub const fn new(use_color: bool, format: OutputFormat) -> Self {
        Self { use_color, format }
    }

    /// Renders the main display line
    #[must_use]
    pub fn render_display(&self, frame: &DisplayFrame) -> String {
        if !self.use_color {
            return frame.display.clone();
        }
        if frame.error {
            style(&frame.display).red().bold().to_string()
        } else {
            style(&frame.display).bold().to_string()
        }
    }

    /// Renders a frame with its expression echo, for traces
    #[must_use]
    pub fn render_trace_line(&self, step: usize, frame: &DisplayFrame) -> String {
        let echo = if self.use_color {
            style(&frame.expression).dim().to_string()
        } else {
            frame.expression.clone()
        };
        format!("{step:>3}  {:<24} {echo}", self.render_display(frame))
    }

    /// Renders the history list, newest first
    #[must_use]
    pub fn render_history(&self, entries: &[HistoryEntry]) -> String {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let index = if self.use_color {
                    style(format!("#{i}")).cyan().to_string()
                } else {
                    format!("#{i}")
                };
                format!("{index} {}", entry.display())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the keypad grid, coloring buttons by action
    #[must_use]
    pub fn render_keypad(&self, keypad: &Keypad) -> String {
        let (rows, _) = keypad.dimensions();
        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let cells: Vec<String> = keypad
                .row(row)
                .map(|button| {
                    let width = 6 * button.span + (button.span - 1) - 2;
                    let cell = format!("[{:^width$}]", button.label);
                    if !self.use_color {
                        return cell;
                    }
                    match button.data_action {
                        ButtonAction::Operator | ButtonAction::Equals => {
                            style(cell).yellow().bold().to_string()
                        }
                        ButtonAction::Clear => style(cell).red().to_string(),
                        ButtonAction::Memory | ButtonAction::Func => style(cell).cyan().to_string(),
                        ButtonAction::Digit => cell,
                    }
                })
                .collect();
            lines.push(cells.join(" "));
        }
        lines.join("\n")
    }

    /// Renders a full report in the configured format
    pub fn render_report(&self, report: &Report, show_history: bool) -> CliResult<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let mut out = Vec::new();
        for (step, frame) in report.trace.iter().enumerate() {
            out.push(self.render_trace_line(step + 1, frame));
        }
        out.push(self.render_display(&report.frame));
        if show_history && !report.history.is_empty() {
            out.push(String::new());
            out.push(self.render_history(&report.history));
        }
        Ok(out.join("\n"))
    }
}

/// Writes diagnostics to stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}
