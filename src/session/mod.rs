//! Session counter for completed pomodoros.
//!
//! The counter lives as long as the process. It is not persisted.

use serde::Serialize;

/// Number of pomodoros completed in the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionCounter {
    pomodoro_count: u32,
}

impl SessionCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more completed pomodoro.
    pub fn increment_pomodoro_count(&mut self) {
        self.pomodoro_count = self.pomodoro_count.saturating_add(1);
    }

    /// Resets the count to zero.
    pub fn reset_pomodoro_count(&mut self) {
        self.pomodoro_count = 0;
    }

    #[must_use]
    pub fn pomodoro_count(&self) -> u32 {
        self.pomodoro_count
    }
}
