//! Application shell around the timing core.
//!
//! This module contains:
//! - `command`: parsing of interactive session commands
//! - `orchestrator`: wiring of timer completion to the session counter

pub mod command;
pub mod orchestrator;

pub use command::{CommandError, SessionCommand};
pub use orchestrator::{EventReceiver, Orchestrator, Outcome, SessionRun, SessionStatus};
