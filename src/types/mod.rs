//! Application data types.
//!
//! This module defines the data structures used for:
//! - The context attached to every countdown (work or break)
//! - Interval durations with validation and file loading

mod config;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, PomodoroConfig};

// ============================================================================
// TimerContext
// ============================================================================

/// Purpose of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerContext {
    /// A pomodoro work interval
    Work,
    /// A short break between pomodoros
    ShortBreak,
    /// A long break
    LongBreak,
}

impl TimerContext {
    /// Returns the string representation of the context.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerContext::Work => "work",
            TimerContext::ShortBreak => "short_break",
            TimerContext::LongBreak => "long_break",
        }
    }

    /// Returns true if finishing this countdown completes a pomodoro.
    pub fn is_work(&self) -> bool {
        matches!(self, TimerContext::Work)
    }

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            TimerContext::Work => "作業",
            TimerContext::ShortBreak => "短い休憩",
            TimerContext::LongBreak => "長い休憩",
        }
    }
}

impl fmt::Display for TimerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" => Ok(TimerContext::Work),
            "short" | "short-break" | "short_break" => Ok(TimerContext::ShortBreak),
            "long" | "long-break" | "long_break" => Ok(TimerContext::LongBreak),
            other => Err(format!("不明なタイマー種別です: {other}")),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(TimerContext::Work.as_str(), "work");
        assert_eq!(TimerContext::ShortBreak.as_str(), "short_break");
        assert_eq!(TimerContext::LongBreak.as_str(), "long_break");
    }

    #[test]
    fn test_is_work() {
        assert!(TimerContext::Work.is_work());
        assert!(!TimerContext::ShortBreak.is_work());
        assert!(!TimerContext::LongBreak.is_work());
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("work".parse::<TimerContext>(), Ok(TimerContext::Work));
        assert_eq!("WORK".parse::<TimerContext>(), Ok(TimerContext::Work));
        assert_eq!("short".parse::<TimerContext>(), Ok(TimerContext::ShortBreak));
        assert_eq!(
            "short-break".parse::<TimerContext>(),
            Ok(TimerContext::ShortBreak)
        );
        assert_eq!("long".parse::<TimerContext>(), Ok(TimerContext::LongBreak));
        assert_eq!(
            "long_break".parse::<TimerContext>(),
            Ok(TimerContext::LongBreak)
        );
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "lunch".parse::<TimerContext>().unwrap_err();
        assert!(err.contains("lunch"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let json = serde_json::to_string(&TimerContext::ShortBreak).unwrap();
        assert_eq!(json, "\"short_break\"");

        let deserialized: TimerContext = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TimerContext::ShortBreak);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(TimerContext::LongBreak.to_string(), "long_break");
    }
}
