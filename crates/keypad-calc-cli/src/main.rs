//! keypad-calc: command-line keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc keys 1 + 2 =          # Press keys, print the display
//! keypad-calc keys --trace 9 sqrt   # Print every frame
//! keypad-calc eval "2*(3+4)"        # Evaluate an expression
//! keypad-calc repl                  # Read keys from stdin
//! keypad-calc layout                # Show the keypad
//! ```

use clap::Parser;
use keypad_calc_cli::{
    run_eval, run_keys, run_layout, run_repl, Cli, CliConfig, CliResult, Commands, Reporter,
    Verbosity,
};
use keypad_calculator::config::EditorConfig;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_tracing(config.verbosity);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Keys(args) => run_keys(&config, &args, &mut out),
        Commands::Eval(args) => run_eval(&config, &args, &mut out),
        Commands::Repl(args) => {
            let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
            if config.verbosity.is_verbose() {
                reporter.info("reading keys from stdin; type 'quit' to stop");
            }
            run_repl(&config, &args, std::io::stdin().lock(), &mut out, &reporter)
        }
        Commands::Layout => run_layout(&config, &mut out),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_format(cli.format.into())
        .with_editor(
            EditorConfig::new()
                .with_history_capacity(cli.history_capacity)
                .with_precision(cli.precision),
        )
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
