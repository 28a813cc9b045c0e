//! Keypad calculator CLI library
//!
//! Command-line driver for the keypad calculator: press key sequences,
//! evaluate expressions, run an interactive line-based session or print the
//! keypad layout.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, FormatArg, KeysArgs, ReplArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Printer, Report, Reporter};
pub use runner::{run_eval, run_keys, run_layout, run_repl, Session};
