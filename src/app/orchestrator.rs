//! Session orchestrator.
//!
//! Owns one countdown timer and one session counter and couples them: a
//! work countdown that finishes increments the pomodoro count. Which
//! interval runs next is always the user's choice.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::session::SessionCounter;
use crate::timer::{CountdownTimer, TimerEvent};
use crate::types::{PomodoroConfig, TimerContext};

use super::command::SessionCommand;

/// Sender half used as the timer listener.
pub type EventSender = mpsc::UnboundedSender<TimerEvent<SessionRun>>;

/// Receiver the event loop reads timer notifications from.
pub type EventReceiver = mpsc::UnboundedReceiver<TimerEvent<SessionRun>>;

/// The timer type driven by the orchestrator.
pub type SessionTimer = CountdownTimer<SessionRun, EventSender>;

/// Context attached to every countdown the orchestrator starts.
///
/// `id` is unique per `start`, so events queued by a replaced run can be
/// told apart from the current one even when both share a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRun {
    pub id: u64,
    pub context: TimerContext,
}

// ============================================================================
// SessionStatus
// ============================================================================

/// Snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<TimerContext>,
    pub seconds_remaining: u32,
    pub pomodoro_count: u32,
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of handling a command or a timer event, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A countdown started, possibly replacing another one
    Started {
        context: TimerContext,
        seconds_remaining: u32,
        replaced: bool,
    },
    /// The countdown in progress was stopped
    Stopped {
        context: Option<TimerContext>,
        seconds_remaining: u32,
    },
    /// `stop` was requested while idle
    NotRunning,
    /// The pomodoro count was reset
    Reset,
    Status(SessionStatus),
    /// One second elapsed
    Progress {
        context: TimerContext,
        seconds_remaining: u32,
    },
    /// A countdown reached zero
    Finished {
        context: TimerContext,
        pomodoro_count: u32,
    },
    /// A notification from a run that is no longer current
    Stale,
    Help,
    Quit,
}

// ============================================================================
// Orchestrator
// ============================================================================

pub struct Orchestrator {
    timer: SessionTimer,
    counter: SessionCounter,
    config: PomodoroConfig,
    /// Id given to the next run
    next_run_id: u64,
}

impl Orchestrator {
    /// Creates an orchestrator and the receiver its timer reports to.
    pub fn new(config: PomodoroConfig) -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let orchestrator = Self {
            timer: CountdownTimer::new(tx),
            counter: SessionCounter::new(),
            config,
            next_run_id: 0,
        };
        (orchestrator, rx)
    }

    /// Executes a user command.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown cannot be started.
    pub fn handle_command(&mut self, command: SessionCommand) -> Result<Outcome> {
        let outcome = match command {
            SessionCommand::Start { context, minutes } => {
                let minutes = minutes.unwrap_or_else(|| self.config.minutes_for(context));
                let replaced = self.timer.is_running();
                let run = SessionRun {
                    id: self.next_run_id,
                    context,
                };
                self.timer
                    .start(minutes, run)
                    .with_context(|| format!("{}タイマーを開始できません", context.label()))?;
                self.next_run_id = self.next_run_id.wrapping_add(1);
                tracing::info!(%context, minutes, replaced, run_id = run.id, "countdown started");

                Outcome::Started {
                    context,
                    seconds_remaining: self.timer.seconds_remaining(),
                    replaced,
                }
            }
            SessionCommand::Stop => {
                if self.timer.is_running() {
                    let context = self.current_context();
                    self.timer.stop();
                    tracing::info!(?context, "countdown stopped");
                    Outcome::Stopped {
                        context,
                        seconds_remaining: self.timer.seconds_remaining(),
                    }
                } else {
                    Outcome::NotRunning
                }
            }
            SessionCommand::Reset => {
                self.counter.reset_pomodoro_count();
                tracing::info!("pomodoro count reset");
                Outcome::Reset
            }
            SessionCommand::Status => Outcome::Status(self.status()),
            SessionCommand::Help => Outcome::Help,
            SessionCommand::Quit => {
                self.timer.stop();
                Outcome::Quit
            }
        };

        Ok(outcome)
    }

    /// Reacts to a timer notification.
    ///
    /// Elapsed notifications of a run that has since been stopped or
    /// replaced are reported as [`Outcome::Stale`]. A finish always counts,
    /// since that countdown did reach zero.
    pub fn handle_event(&mut self, event: TimerEvent<SessionRun>) -> Outcome {
        match event {
            TimerEvent::TimeElapsed {
                seconds_remaining,
                context: run,
            } => {
                if self.current_run().map(|current| current.id) != Some(run.id) {
                    tracing::trace!(run_id = run.id, seconds_remaining, "stale tick dropped");
                    return Outcome::Stale;
                }
                Outcome::Progress {
                    context: run.context,
                    seconds_remaining,
                }
            }
            TimerEvent::Finished { context: run } => {
                let context = run.context;
                if context.is_work() {
                    self.counter.increment_pomodoro_count();
                }
                tracing::info!(
                    %context,
                    run_id = run.id,
                    pomodoro_count = self.counter.pomodoro_count(),
                    "countdown finished"
                );
                Outcome::Finished {
                    context,
                    pomodoro_count: self.counter.pomodoro_count(),
                }
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            running: self.timer.is_running(),
            context: self.current_context(),
            seconds_remaining: self.timer.seconds_remaining(),
            pomodoro_count: self.counter.pomodoro_count(),
        }
    }

    pub fn pomodoro_count(&self) -> u32 {
        self.counter.pomodoro_count()
    }

    fn current_run(&self) -> Option<SessionRun> {
        self.timer.context().map(|run| *run)
    }

    fn current_context(&self) -> Option<TimerContext> {
        self.current_run().map(|run| run.context)
    }
}

// ============================================================================
// Tests
// ============================================================================
