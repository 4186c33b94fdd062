//! Interval durations.
//!
//! Durations are layered: built-in defaults, then an optional JSON file,
//! then command-line overrides. Missing fields in the file keep their
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TimerContext;

/// Config file name inside the `tomighty` config directory.
const CONFIG_FILE_NAME: &str = "config.json";

fn default_work_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("設定ファイルを読み込めません: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("設定ファイルの形式が不正です: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("{0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns true if the problem is in a value rather than in the file.
    #[must_use]
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

// ============================================================================
// PomodoroConfig
// ============================================================================

/// Durations of each kind of interval, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    /// Work duration in minutes (1-120)
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Short break duration in minutes (1-60)
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    /// Long break duration in minutes (1-60)
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

impl PomodoroConfig {
    #[must_use]
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Returns the configured duration for `context`.
    pub fn minutes_for(&self, context: TimerContext) -> u32 {
        match context {
            TimerContext::Work => self.work_minutes,
            TimerContext::ShortBreak => self.short_break_minutes,
            TimerContext::LongBreak => self.long_break_minutes,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=120).contains(&self.work_minutes) {
            return Err(ConfigError::Invalid(
                "作業時間は1-120分の範囲で指定してください".to_string(),
            ));
        }
        if !(1..=60).contains(&self.short_break_minutes) {
            return Err(ConfigError::Invalid(
                "短い休憩時間は1-60分の範囲で指定してください".to_string(),
            ));
        }
        if !(1..=60).contains(&self.long_break_minutes) {
            return Err(ConfigError::Invalid(
                "長い休憩時間は1-60分の範囲で指定してください".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Loads `path`, or the default config file when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults. An explicitly
    /// given path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Returns `<config dir>/tomighty/config.json`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tomighty").join(CONFIG_FILE_NAME))
    }
}

// ============================================================================
// Tests
// ============================================================================
