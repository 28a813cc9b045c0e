//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ColorChoice;
use crate::output::OutputFormat;

/// keypad-calc: drive the keypad calculator from the command line
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Maximum number of history entries kept
    #[arg(long, default_value_t = 12, global = true)]
    pub history_capacity: usize,

    /// Fractional digits kept when rounding
    #[arg(long, default_value_t = 12, global = true, value_parser = clap::value_parser!(u32).range(0..=15))]
    pub precision: u32,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the display
    ///
    /// Keys are keyboard names (0-9 . + - * / ^ ( ) % = Enter Backspace
    /// Escape Delete), button names (AC CE MC MR M+ M-) or function names
    /// (pi e sign square sqrt reciprocal percent pow).
    Keys(KeysArgs),

    /// Evaluate an expression and print the result
    Eval(EvalArgs),

    /// Read keys from stdin, one line at a time
    Repl(ReplArgs),

    /// Show the keypad layout
    Layout,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Keys to press, in order
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print every frame, not just the last one
    #[arg(long)]
    pub trace: bool,

    /// Print the history list after the display
    #[arg(long)]
    pub history: bool,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression to evaluate, e.g. "2*(3+4)"
    #[arg(allow_hyphen_values = true)]
    pub expression: String,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Print the history list after each line
    #[arg(long)]
    pub history: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("keypad-calc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_keys() {
        let cli = parse(&["keys", "1", "+", "2", "="]);
        let Commands::Keys(args) = cli.command else {
            panic!("expected keys command");
        };
        assert_eq!(args.keys, vec!["1", "+", "2", "="]);
        assert!(!args.trace);
    }

    #[test]
    fn test_parse_keys_leading_minus() {
        let cli = parse(&["keys", "--trace", "-", "5", "="]);
        let Commands::Keys(args) = cli.command else {
            panic!("expected keys command");
        };
        assert_eq!(args.keys, vec!["-", "5", "="]);
        assert!(args.trace);
    }

    #[test]
    fn test_parse_keys_requires_a_key() {
        assert!(Cli::try_parse_from(["keypad-calc", "keys"]).is_err());
    }

    #[test]
    fn test_parse_eval_negative_expression() {
        let cli = parse(&["eval", "-2^2"]);
        let Commands::Eval(args) = cli.command else {
            panic!("expected eval command");
        };
        assert_eq!(args.expression, "-2^2");
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse(&[
            "-vv",
            "--color",
            "never",
            "--format",
            "json",
            "--history-capacity",
            "3",
            "--precision",
            "4",
            "layout",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorArg::Never));
        assert!(matches!(cli.format, FormatArg::Json));
        assert_eq!(cli.history_capacity, 3);
        assert_eq!(cli.precision, 4);
        assert!(matches!(cli.command, Commands::Layout));
    }

    #[test]
    fn test_precision_range() {
        assert!(Cli::try_parse_from(["keypad-calc", "--precision", "99", "layout"]).is_err());
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
