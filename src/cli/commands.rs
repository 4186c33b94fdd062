//! Command definitions for the Tomighty CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimerContext;

// ============================================================================
// CLI Structure
// ============================================================================

/// Tomighty - Pomodoro timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "tomighty",
    version,
    about = "ターミナルで動くポモドーロタイマー",
    long_about = "作業と休憩のカウントダウンを実行し、\n\
                  セッション中に完了したポモドーロの数を数えます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `session`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file with interval durations
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive session reading commands from stdin
    Session,

    /// Run a single countdown in the foreground
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Kind of interval: work, short or long
    #[arg(short = 't', long = "type", default_value = "work")]
    pub context: TimerContext,

    /// Duration in minutes (1-120); the configured duration by default
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub minutes: Option<u32>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            context: TimerContext::Work,
            minutes: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["tomighty"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.config.is_none());
        }

        #[test]
        fn test_parse_global_flags() {
            let cli = Cli::parse_from(["tomighty", "session", "-v", "--config", "/tmp/t.json"]);
            assert!(matches!(cli.command, Some(Commands::Session)));
            assert!(cli.verbose);
            assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.json")));
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["tomighty", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_invalid_command() {
            let result = Cli::try_parse_from(["tomighty", "pause"]);
            assert!(result.is_err());
        }
    }

    mod run_args_tests {
        use super::*;

        fn parse_run(args: &[&str]) -> Result<RunArgs, clap::Error> {
            let argv = ["tomighty", "run"].iter().chain(args.iter());
            match Cli::try_parse_from(argv)?.command {
                Some(Commands::Run(args)) => Ok(args),
                other => panic!("Expected Run command, got {other:?}"),
            }
        }

        #[test]
        fn test_defaults() {
            assert_eq!(parse_run(&[]).unwrap(), RunArgs::default());
        }

        #[test]
        fn test_type_and_minutes() {
            let args = parse_run(&["--type", "short", "--minutes", "3"]).unwrap();
            assert_eq!(args.context, TimerContext::ShortBreak);
            assert_eq!(args.minutes, Some(3));

            let args = parse_run(&["-t", "long-break", "-m", "20"]).unwrap();
            assert_eq!(args.context, TimerContext::LongBreak);
            assert_eq!(args.minutes, Some(20));
        }

        #[test]
        fn test_minutes_out_of_range() {
            assert!(parse_run(&["--minutes", "0"]).is_err());
            assert!(parse_run(&["--minutes", "121"]).is_err());
        }

        #[test]
        fn test_unknown_type() {
            assert!(parse_run(&["--type", "lunch"]).is_err());
        }
    }
}
