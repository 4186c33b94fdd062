//! Interactive session commands.
//!
//! One command per input line:
//!
//! ```text
//! work [minutes]    start a work countdown
//! short [minutes]   start a short break
//! long [minutes]    start a long break
//! stop              stop the countdown in progress
//! reset             reset the pomodoro count
//! status            show the current state
//! help              list the commands
//! quit              leave the session
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::types::TimerContext;

/// Largest duration accepted on the command line, in minutes.
pub const MAX_MINUTES: u32 = 120;

// ============================================================================
// CommandError
// ============================================================================

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("コマンドが入力されていません")]
    Empty,

    #[error("不明なコマンドです: {0}（helpで一覧を表示）")]
    Unknown(String),

    #[error("時間は1-120分の範囲で指定してください: {0}")]
    InvalidMinutes(String),

    #[error("余分な引数があります: {0}")]
    UnexpectedArgument(String),
}

// ============================================================================
// SessionCommand
// ============================================================================

/// A parsed session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start (or restart) a countdown
    Start {
        context: TimerContext,
        /// Duration override; the configured duration is used when `None`
        minutes: Option<u32>,
    },
    Stop,
    Reset,
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    fn start(context: TimerContext, argument: Option<&str>) -> Result<Self, CommandError> {
        let minutes = argument.map(parse_minutes).transpose()?;
        Ok(SessionCommand::Start { context, minutes })
    }
}

fn parse_minutes(s: &str) -> Result<u32, CommandError> {
    match s.parse::<u32>() {
        Ok(minutes) if (1..=MAX_MINUTES).contains(&minutes) => Ok(minutes),
        _ => Err(CommandError::InvalidMinutes(s.to_string())),
    }
}

impl FromStr for SessionCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }

        let command = match name.as_str() {
            "work" | "w" => return Self::start(TimerContext::Work, argument),
            "short" | "s" => return Self::start(TimerContext::ShortBreak, argument),
            "long" | "l" => return Self::start(TimerContext::LongBreak, argument),
            "stop" => SessionCommand::Stop,
            "reset" => SessionCommand::Reset,
            "status" => SessionCommand::Status,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };

        match argument {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
