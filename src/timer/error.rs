//! Countdown timer error types.
//!
//! Every variant here is a programmer error on the caller's side. The
//! countdown itself has no recoverable runtime failures.

use thiserror::Error;

/// Errors returned by [`CountdownTimer::start`](super::CountdownTimer::start).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The requested duration is zero or does not fit in seconds.
    #[error("タイマーの時間が不正です: {0}分")]
    InvalidDuration(u32),

    /// `start` was called outside of a tokio runtime.
    #[error("tokioランタイムの外ではタイマーを開始できません")]
    NoRuntime,
}

impl TimerError {
    /// Returns true if the error was caused by the arguments passed to `start`.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidDuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TimerError::InvalidDuration(0);
        assert!(err.to_string().contains("0分"));
        assert!(err.to_string().contains("不正"));

        let err = TimerError::NoRuntime;
        assert!(err.to_string().contains("tokio"));
    }

    #[test]
    fn test_is_invalid_argument() {
        assert!(TimerError::InvalidDuration(0).is_invalid_argument());
        assert!(!TimerError::NoRuntime.is_invalid_argument());
    }
}
