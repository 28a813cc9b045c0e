//! Command execution
//!
//! Each command drives a [`Controller`] backed by a [`RecordingSurface`] and
//! writes its output to a caller-supplied writer. The surface keeps every
//! frame only when a trace was asked for; otherwise just the latest one.

use std::io::{BufRead, Write};

use keypad_calculator::controller::Controller;
use keypad_calculator::editor::EvalOutcome;
use keypad_calculator::intent::Intent;
use keypad_calculator::keypad::Keypad;
use keypad_calculator::surface::RecordingSurface;
use tracing::{debug, info};

use crate::commands::{EvalArgs, KeysArgs, ReplArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Printer, Report, Reporter};

/// Words that end a repl session
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Drives one controller for the lifetime of a command
#[derive(Debug)]
pub struct Session {
    controller: Controller<RecordingSurface>,
    printer: Printer,
    show_history: bool,
}

impl Session {
    /// Creates a session from the CLI configuration
    ///
    /// With `record_trace` every frame is kept for [`Session::report`];
    /// without it memory stays constant however many keys are pressed.
    #[must_use]
    pub fn new(config: &CliConfig, record_trace: bool) -> Self {
        let surface = if record_trace {
            RecordingSurface::new()
        } else {
            RecordingSurface::keeping_last(1)
        };
        Self {
            controller: Controller::with_config(config.editor, surface),
            printer: Printer::new(config.color.should_color(), config.format),
            show_history: config.verbosity.is_verbose(),
        }
    }

    /// Forces the history list into text output
    #[must_use]
    pub const fn with_history(mut self, show: bool) -> Self {
        self.show_history = self.show_history || show;
        self
    }

    /// Returns the underlying controller
    #[must_use]
    pub const fn controller(&self) -> &Controller<RecordingSurface> {
        &self.controller
    }

    /// Presses every key in order, stopping at the first unknown one
    pub fn press_all<S: AsRef<str>>(&mut self, keys: &[S]) -> CliResult<()> {
        for key in keys {
            self.controller.press_key(key.as_ref())?;
        }
        Ok(())
    }

    /// Presses the whitespace-separated keys of one input line
    ///
    /// Unknown keys are reported and skipped.
    pub fn press_line(&mut self, line: &str, reporter: &Reporter) {
        for key in line.split_whitespace() {
            if let Err(err) = self.controller.press_key(key) {
                debug!(key, "unknown key skipped");
                reporter.warning(&err.to_string());
            }
        }
    }

    /// Builds the report for the current state
    #[must_use]
    pub fn report(&self, with_trace: bool) -> Report {
        let editor = self.controller.editor();
        let surface = self.controller.surface();
        Report {
            frame: editor.frame(),
            trace: if with_trace {
                surface.frames().to_vec()
            } else {
                Vec::new()
            },
            history: editor.history().snapshot(),
            memory: editor.memory(),
        }
    }

    /// Writes the report for the current state
    pub fn write_report<W: Write>(&self, out: &mut W, with_trace: bool) -> CliResult<()> {
        let text = self
            .printer
            .render_report(&self.report(with_trace), self.show_history)?;
        writeln!(out, "{text}")?;
        Ok(())
    }
}

/// Runs the `keys` command
pub fn run_keys<W: Write>(config: &CliConfig, args: &KeysArgs, out: &mut W) -> CliResult<()> {
    debug!(keys = args.keys.len(), trace = args.trace, "running keys");
    let mut session = Session::new(config, args.trace).with_history(args.history);
    session.press_all(&args.keys)?;
    session.write_report(out, args.trace)
}

/// Runs the `eval` command
///
/// A rejected or failing expression is an error, so the process exits
/// non-zero.
pub fn run_eval<W: Write>(config: &CliConfig, args: &EvalArgs, out: &mut W) -> CliResult<()> {
    debug!(expression = %args.expression, "running eval");
    let mut session = Session::new(config, false);
    session.controller.editor_mut().load(&args.expression)?;

    match session.controller.dispatch(Intent::Equals) {
        Some(EvalOutcome::Value(value)) => {
            info!(value, "evaluated");
            session.write_report(out, false)
        }
        Some(EvalOutcome::Failed(err)) => Err(CliError::Calc(err)),
        Some(EvalOutcome::Empty) | None => Err(CliError::invalid_argument("empty expression")),
    }
}

/// Runs the `repl` command
///
/// Each input line is split on whitespace and pressed key by key. Unknown
/// keys are reported and skipped. The display is printed after every line.
pub fn run_repl<R: BufRead, W: Write>(
    config: &CliConfig,
    args: &ReplArgs,
    input: R,
    out: &mut W,
    reporter: &Reporter,
) -> CliResult<()> {
    let mut session = Session::new(config, false).with_history(args.history);

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&line) {
            debug!("repl quit");
            break;
        }

        session.press_line(line, reporter);
        session.write_report(out, false)?;
    }
    Ok(())
}

/// Runs the `layout` command
pub fn run_layout<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    let keypad = Keypad::new();
    let text = match config.format {
        OutputFormat::Json => serde_json::to_string_pretty(keypad.buttons())?,
        OutputFormat::Text => {
            Printer::new(config.color.should_color(), config.format).render_keypad(&keypad)
        }
    };
    writeln!(out, "{text}")?;
    Ok(())
}
