//! Tomighty CLI - Pomodoro timer for the terminal
//!
//! Counts down work and break intervals and keeps track of the pomodoros
//! completed in the current session:
//! - `session`: interactive loop reading commands from stdin
//! - `run`: a single countdown in the foreground

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};

use tomighty::app::{Orchestrator, Outcome, SessionCommand};
use tomighty::cli::{Cli, Commands, Display, RunArgs};
use tomighty::types::PomodoroConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{e:#}"));
            1
        }
    };

    if let Err(e) = std::io::Write::flush(&mut std::io::stdout()) {
        tracing::warn!("failed to flush stdout: {e}");
    }
    // A pending stdin read would otherwise keep the runtime alive.
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let config = PomodoroConfig::load_or_default(cli.config.as_deref())
        .context("設定の読み込みに失敗しました")?;
    tracing::debug!(?config, "configuration ready");

    match cli.command {
        Some(Commands::Run(args)) => run_single(config, args).await,
        Some(Commands::Session) | None => run_session(config).await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Runs the interactive session until `quit`, end of input or Ctrl-C.
async fn run_session(config: PomodoroConfig) -> Result<()> {
    let (mut orchestrator, mut events) = Orchestrator::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    Display::show_session_banner();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("標準入力の読み込みに失敗しました")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<SessionCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        Display::show_error(&e.to_string());
                        continue;
                    }
                };
                match orchestrator.handle_command(command) {
                    Ok(Outcome::Quit) => break,
                    Ok(outcome) => Display::show_outcome(&outcome),
                    Err(e) => Display::show_error(&format!("{e:#}")),
                }
            }
            Some(event) = events.recv() => {
                Display::show_outcome(&orchestrator.handle_event(event));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    orchestrator.handle_command(SessionCommand::Quit)?;
    Display::show_session_summary(orchestrator.pomodoro_count());
    Ok(())
}

/// Runs one countdown and returns when it finishes or on Ctrl-C.
async fn run_single(config: PomodoroConfig, args: RunArgs) -> Result<()> {
    let (mut orchestrator, mut events) = Orchestrator::new(config);

    let started = orchestrator.handle_command(SessionCommand::Start {
        context: args.context,
        minutes: args.minutes,
    })?;
    Display::show_outcome(&started);

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                let outcome = orchestrator.handle_event(event);
                Display::show_outcome(&outcome);
                if matches!(outcome, Outcome::Finished { .. }) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                let stopped = orchestrator.handle_command(SessionCommand::Stop)?;
                Display::show_outcome(&stopped);
                break;
            }
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
