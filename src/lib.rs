//! Tomighty Library
//!
//! This library provides the timing core of a Pomodoro application.
//! It includes:
//! - Countdown timer with per-second listener notifications
//! - Session counter of completed pomodoros
//! - Application types for timer contexts and interval durations
//! - An orchestrator and CLI front-end driving both from the terminal

pub mod app;
pub mod cli;
pub mod session;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use app::{Orchestrator, Outcome, SessionCommand, SessionRun, SessionStatus};
pub use session::SessionCounter;
pub use timer::{CountdownTimer, RecordingListener, TimerError, TimerEvent, TimerListener};
pub use types::{ConfigError, PomodoroConfig, TimerContext};
