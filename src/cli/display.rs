//! Display utilities for the Tomighty CLI.
//!
//! This module provides formatted output for:
//! - Command and timer outcomes
//! - The live countdown line
//! - Session status and help
//! - Error messages

use std::io::Write;

use crate::app::{Outcome, SessionStatus};

/// Commands accepted by the interactive session.
const HELP_TEXT: &str = "\
コマンド一覧:
  work [分]    作業タイマーを開始
  short [分]   短い休憩タイマーを開始
  long [分]    長い休憩タイマーを開始
  stop         タイマーを停止
  reset        ポモドーロ数をリセット
  status       現在の状態を表示
  help         このヘルプを表示
  quit         終了";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows an outcome.
    ///
    /// Progress rewrites the current line; everything else ends with a newline.
    pub fn show_outcome(outcome: &Outcome) {
        let Some(text) = Self::format_outcome(outcome) else {
            return;
        };

        let mut stdout = std::io::stdout().lock();
        let result = match outcome {
            Outcome::Progress { .. } => {
                write!(stdout, "\r{text}   ").and_then(|()| stdout.flush())
            }
            _ => writeln!(stdout, "\r{text}"),
        };
        if let Err(e) = result {
            tracing::warn!("failed to write to stdout: {e}");
        }
    }

    /// Formats an outcome, or `None` if nothing should be shown.
    pub fn format_outcome(outcome: &Outcome) -> Option<String> {
        let text = match outcome {
            Outcome::Started {
                context,
                seconds_remaining,
                replaced,
            } => {
                let mut text = format!(
                    "* {}タイマーを開始しました（残り時間 {}）",
                    context.label(),
                    Self::format_clock(*seconds_remaining)
                );
                if *replaced {
                    text.push_str("\n  進行中のタイマーは破棄されました");
                }
                text
            }
            Outcome::Stopped {
                seconds_remaining, ..
            } => format!(
                "[] タイマーを停止しました（残り時間 {}）",
                Self::format_clock(*seconds_remaining)
            ),
            Outcome::NotRunning => "タイマーは実行されていません".to_string(),
            Outcome::Reset => "ポモドーロ数をリセットしました".to_string(),
            Outcome::Status(status) => Self::format_status(status),
            Outcome::Progress {
                context,
                seconds_remaining,
            } => format!(
                "{} 残り時間 {}",
                context.label(),
                Self::format_clock(*seconds_remaining)
            ),
            Outcome::Finished {
                context,
                pomodoro_count,
            } => {
                if context.is_work() {
                    format!("! 作業が完了しました（ポモドーロ: #{pomodoro_count}）")
                } else {
                    format!("! {}が終わりました", context.label())
                }
            }
            Outcome::Help => HELP_TEXT.to_string(),
            Outcome::Stale | Outcome::Quit => return None,
        };
        Some(text)
    }

    /// Formats the session status.
    pub fn format_status(status: &SessionStatus) -> String {
        let mut lines = vec![
            "Tomighty ステータス".to_string(),
            "─────────────────────────────".to_string(),
        ];

        match status.context.filter(|_| status.running) {
            Some(context) => {
                lines.push(format!("状態: {}中", context.label()));
                lines.push(format!(
                    "残り時間: {}",
                    Self::format_clock(status.seconds_remaining)
                ));
            }
            None => lines.push("状態: 停止中".to_string()),
        }
        lines.push(format!("ポモドーロ: #{}", status.pomodoro_count));

        lines.join("\n")
    }

    /// Shows the greeting of an interactive session.
    pub fn show_session_banner() {
        println!("Tomighty セッションを開始しました（helpでコマンド一覧）");
    }

    /// Shows the result of a session when it ends.
    pub fn show_session_summary(pomodoro_count: u32) {
        println!();
        println!("セッションを終了しました（完了したポモドーロ: {pomodoro_count}）");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Formats seconds as `mm:ss`.
    pub fn format_clock(total_seconds: u32) -> String {
        let (minutes, seconds) = Self::format_time(total_seconds);
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerContext;

    // ------------------------------------------------------------------------
    // Format Time Tests
    // ------------------------------------------------------------------------

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_format_time_zero() {
            assert_eq!(Display::format_time(0), (0, 0));
        }

        #[test]
        fn test_format_time_mixed() {
            assert_eq!(Display::format_time(90), (1, 30));
        }

        #[test]
        fn test_format_time_25_minutes() {
            assert_eq!(Display::format_time(25 * 60), (25, 0));
        }

        #[test]
        fn test_format_clock_padding() {
            assert_eq!(Display::format_clock(0), "00:00");
            assert_eq!(Display::format_clock(1499), "24:59");
            assert_eq!(Display::format_clock(120 * 60 + 5), "120:05");
        }
    }

    // ------------------------------------------------------------------------
    // Outcome Formatting Tests
    // ------------------------------------------------------------------------

    mod format_outcome_tests {
        use super::*;

        #[test]
        fn test_started() {
            let text = Display::format_outcome(&Outcome::Started {
                context: TimerContext::Work,
                seconds_remaining: 1500,
                replaced: false,
            })
            .unwrap();
            assert!(text.contains("作業タイマーを開始しました"));
            assert!(text.contains("25:00"));
            assert!(!text.contains("破棄"));
        }

        #[test]
        fn test_started_replacing() {
            let text = Display::format_outcome(&Outcome::Started {
                context: TimerContext::ShortBreak,
                seconds_remaining: 300,
                replaced: true,
            })
            .unwrap();
            assert!(text.contains("短い休憩"));
            assert!(text.contains("破棄"));
        }

        #[test]
        fn test_progress() {
            let text = Display::format_outcome(&Outcome::Progress {
                context: TimerContext::LongBreak,
                seconds_remaining: 61,
            })
            .unwrap();
            assert_eq!(text, "長い休憩 残り時間 01:01");
        }

        #[test]
        fn test_finished_work_shows_count() {
            let text = Display::format_outcome(&Outcome::Finished {
                context: TimerContext::Work,
                pomodoro_count: 3,
            })
            .unwrap();
            assert!(text.contains("#3"));
        }

        #[test]
        fn test_finished_break() {
            let text = Display::format_outcome(&Outcome::Finished {
                context: TimerContext::ShortBreak,
                pomodoro_count: 3,
            })
            .unwrap();
            assert!(text.contains("短い休憩が終わりました"));
            assert!(!text.contains("#3"));
        }

        #[test]
        fn test_hidden_outcomes() {
            assert!(Display::format_outcome(&Outcome::Stale).is_none());
            assert!(Display::format_outcome(&Outcome::Quit).is_none());
        }

        #[test]
        fn test_help_lists_commands() {
            let text = Display::format_outcome(&Outcome::Help).unwrap();
            for command in ["work", "short", "long", "stop", "reset", "status", "quit"] {
                assert!(text.contains(command), "help is missing {command}");
            }
        }

        #[test]
        fn test_show_outcome_does_not_panic() {
            Display::show_outcome(&Outcome::NotRunning);
            Display::show_outcome(&Outcome::Stale);
            Display::show_outcome(&Outcome::Progress {
                context: TimerContext::Work,
                seconds_remaining: 10,
            });
        }
    }

    // ------------------------------------------------------------------------
    // Status Formatting Tests
    // ------------------------------------------------------------------------

    mod format_status_tests {
        use super::*;

        #[test]
        fn test_status_running() {
            let text = Display::format_status(&SessionStatus {
                running: true,
                context: Some(TimerContext::Work),
                seconds_remaining: 600,
                pomodoro_count: 2,
            });
            assert!(text.contains("作業中"));
            assert!(text.contains("10:00"));
            assert!(text.contains("#2"));
        }

        #[test]
        fn test_status_idle() {
            let text = Display::format_status(&SessionStatus {
                running: false,
                context: None,
                seconds_remaining: 0,
                pomodoro_count: 0,
            });
            assert!(text.contains("停止中"));
            assert!(!text.contains("残り時間"));
        }
    }
}
