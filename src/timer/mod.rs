//! Countdown timer engine.
//!
//! This module provides the countdown state machine:
//! - Idle → Running on `start`, Running → Idle on `stop` or expiry
//! - One tick per second driven by `tokio::time::interval_at`
//! - Listener notifications for elapsed time and completion
//! - Synchronous cancellation of superseded and stopped runs
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tomighty::timer::{CountdownTimer, RecordingListener};
//!
//! # async fn example() -> Result<(), tomighty::timer::TimerError> {
//! let listener = Arc::new(RecordingListener::new());
//! let timer = CountdownTimer::new(listener.clone());
//!
//! timer.start(25, "work")?;
//! assert_eq!(timer.seconds_remaining(), 1500);
//!
//! timer.stop();
//! assert!(!timer.is_running());
//! # Ok(())
//! # }
//! ```

mod error;
mod listener;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

pub use error::TimerError;
pub use listener::{RecordingListener, TimerEvent, TimerListener};

/// Interval between two ticks
const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// RunState
// ============================================================================

/// Mutable state of a timer, shared with its tick task.
struct RunState<C> {
    /// Identifies the current run; ticks of older runs are ignored
    generation: u64,
    /// Seconds left in the current (or last) countdown
    remaining_seconds: u32,
    /// Context of the current run
    context: Option<Arc<C>>,
    /// Tick task of the current run, `None` while idle
    ticker: Option<JoinHandle<()>>,
    /// Thread currently delivering a notification
    dispatching_on: Option<ThreadId>,
}

struct Shared<C, L> {
    listener: L,
    state: Mutex<RunState<C>>,
    /// Held by the tick task for the whole of a notification
    dispatch: Mutex<()>,
}

enum Notification {
    Elapsed(u32),
    Finished,
}

impl<C, L> Shared<C, L> {
    fn lock_state(&self) -> MutexGuard<'_, RunState<C>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, ()> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels the current run, if any.
    ///
    /// On return no notification of the cancelled run is in flight on another
    /// thread and none will be delivered later. Returns true if a run was active.
    fn cancel(&self) -> bool {
        let (was_running, in_flight) = {
            let mut state = self.lock_state();
            state.generation = state.generation.wrapping_add(1);
            state.context = None;
            let was_running = match state.ticker.take() {
                Some(ticker) => {
                    ticker.abort();
                    true
                }
                None => false,
            };
            (was_running, state.dispatching_on)
        };

        // A listener cancelling from inside its own callback must not wait on itself.
        if in_flight.is_some_and(|id| id != thread::current().id()) {
            drop(self.lock_dispatch());
        }

        was_running
    }
}

impl<C, L> Shared<C, L>
where
    C: Send + Sync + 'static,
    L: TimerListener<C>,
{
    /// Advances the run `generation` by one second.
    ///
    /// Returns false once that run is over.
    fn tick(&self, generation: u64) -> bool {
        let _dispatch = self.lock_dispatch();

        let (notification, context) = {
            let mut state = self.lock_state();
            if state.generation != generation {
                return false;
            }
            let Some(context) = state.context.clone() else {
                return false;
            };

            state.remaining_seconds = state.remaining_seconds.saturating_sub(1);
            state.dispatching_on = Some(thread::current().id());

            if state.remaining_seconds > 0 {
                (Notification::Elapsed(state.remaining_seconds), context)
            } else {
                state.ticker = None;
                state.context = None;
                (Notification::Finished, context)
            }
        };

        let keep_ticking = match notification {
            Notification::Elapsed(seconds_remaining) => {
                tracing::trace!(seconds_remaining, generation, "tick");
                self.listener.on_time_elapsed(seconds_remaining, &context);
                true
            }
            Notification::Finished => {
                tracing::debug!(generation, "countdown finished");
                self.listener.on_timer_finished(&context);
                false
            }
        };

        self.lock_state().dispatching_on = None;
        keep_ticking
    }
}

async fn run_ticks<C, L>(shared: Arc<Shared<C, L>>, generation: u64, first_tick: Instant)
where
    C: Send + Sync + 'static,
    L: TimerListener<C>,
{
    let mut ticker = interval_at(first_tick, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if !shared.tick(generation) {
            break;
        }
    }
}

// ============================================================================
// CountdownTimer
// ============================================================================

/// A reusable one-second-resolution countdown.
///
/// `C` is an opaque context carried through to every notification of a run.
/// The timer never inspects it.
pub struct CountdownTimer<C, L> {
    shared: Arc<Shared<C, L>>,
}

impl<C, L> CountdownTimer<C, L>
where
    C: Send + Sync + 'static,
    L: TimerListener<C>,
{
    /// Creates an idle timer that reports to `listener`.
    pub fn new(listener: L) -> Self {
        Self {
            shared: Arc::new(Shared {
                listener,
                state: Mutex::new(RunState {
                    generation: 0,
                    remaining_seconds: 0,
                    context: None,
                    ticker: None,
                    dispatching_on: None,
                }),
                dispatch: Mutex::new(()),
            }),
        }
    }

    /// Starts a countdown of `minutes` carrying `context`.
    ///
    /// A countdown already in progress is cancelled first without notification.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] if `minutes` is zero or too
    /// large, leaving any in-progress countdown untouched, and
    /// [`TimerError::NoRuntime`] outside of a tokio runtime.
    pub fn start(&self, minutes: u32, context: C) -> Result<(), TimerError> {
        if minutes == 0 {
            return Err(TimerError::InvalidDuration(minutes));
        }
        let total_seconds = minutes
            .checked_mul(60)
            .ok_or(TimerError::InvalidDuration(minutes))?;
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;

        if self.shared.cancel() {
            tracing::debug!("previous countdown replaced");
        }

        let mut state = self.shared.lock_state();
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        state.remaining_seconds = total_seconds;
        state.context = Some(Arc::new(context));
        state.ticker = Some(runtime.spawn(run_ticks(
            Arc::clone(&self.shared),
            generation,
            Instant::now() + TICK_PERIOD,
        )));

        tracing::debug!(minutes, generation, "countdown started");
        Ok(())
    }

    /// Stops the current countdown without notifying the listener.
    ///
    /// Does nothing if the timer is idle.
    pub fn stop(&self) {
        if self.shared.cancel() {
            tracing::debug!(
                seconds_remaining = self.seconds_remaining(),
                "countdown stopped"
            );
        }
    }
}

impl<C, L> CountdownTimer<C, L> {
    /// Seconds left in the current countdown.
    ///
    /// Keeps the last value after a `stop` and reads 0 after expiry.
    pub fn seconds_remaining(&self) -> u32 {
        self.shared.lock_state().remaining_seconds
    }

    /// Returns true while a countdown is in progress.
    pub fn is_running(&self) -> bool {
        self.shared.lock_state().ticker.is_some()
    }

    /// Context of the countdown in progress.
    pub fn context(&self) -> Option<Arc<C>> {
        self.shared.lock_state().context.clone()
    }
}

impl<C, L> Drop for CountdownTimer<C, L> {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

// ============================================================================
// Tests
// ============================================================================
