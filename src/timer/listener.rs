//! Listener contract for countdown notifications.
//!
//! A [`CountdownTimer`](super::CountdownTimer) delivers exactly two kinds of
//! notification to its listener:
//!
//! - `on_time_elapsed` once per second while the countdown is above zero
//! - `on_timer_finished` once, when the countdown reaches zero naturally
//!
//! Two ready-made listeners are provided. An `mpsc::UnboundedSender` forwards
//! every notification as a [`TimerEvent`] so an event loop can react to it,
//! and [`RecordingListener`] keeps them in memory.

use std::sync::Mutex;

use tokio::sync::mpsc;

// ============================================================================
// TimerListener
// ============================================================================

/// Observer of a countdown.
///
/// Callbacks run on the tick task. They may call back into the timer that
/// issued them (for example to start the next interval).
pub trait TimerListener<C>: Send + Sync + 'static {
    /// Called after a tick that left `seconds_remaining > 0`.
    fn on_time_elapsed(&self, seconds_remaining: u32, context: &C);

    /// Called exactly once when the countdown reaches zero.
    ///
    /// Never called for an explicit `stop` or a superseded run.
    fn on_timer_finished(&self, context: &C);
}

// ============================================================================
// TimerEvent
// ============================================================================

/// A listener notification as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent<C> {
    /// One second elapsed
    TimeElapsed {
        /// Seconds left in the countdown
        seconds_remaining: u32,
        /// Context the countdown was started with
        context: C,
    },
    /// The countdown reached zero
    Finished {
        /// Context the countdown was started with
        context: C,
    },
}

impl<C> TimerEvent<C> {
    /// Returns the context carried by the event.
    pub fn context(&self) -> &C {
        match self {
            TimerEvent::TimeElapsed { context, .. } | TimerEvent::Finished { context } => context,
        }
    }

    /// Returns true for the completion event.
    pub fn is_finished(&self) -> bool {
        matches!(self, TimerEvent::Finished { .. })
    }
}

impl<C> TimerListener<C> for mpsc::UnboundedSender<TimerEvent<C>>
where
    C: Clone + Send + Sync + 'static,
{
    fn on_time_elapsed(&self, seconds_remaining: u32, context: &C) {
        let event = TimerEvent::TimeElapsed {
            seconds_remaining,
            context: context.clone(),
        };
        if self.send(event).is_err() {
            tracing::warn!(seconds_remaining, "timer event receiver dropped");
        }
    }

    fn on_timer_finished(&self, context: &C) {
        if self
            .send(TimerEvent::Finished {
                context: context.clone(),
            })
            .is_err()
        {
            tracing::warn!("timer event receiver dropped before finish");
        }
    }
}

// ============================================================================
// RecordingListener
// ============================================================================

/// Listener that records every notification it receives.
#[derive(Debug)]
pub struct RecordingListener<C> {
    events: Mutex<Vec<TimerEvent<C>>>,
}

impl<C> Default for RecordingListener<C> {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl<C: Clone> RecordingListener<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded notification, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TimerEvent<C>> {
        self.lock().clone()
    }

    /// Returns the `seconds_remaining` of every elapsed notification.
    #[must_use]
    pub fn elapsed_seconds(&self) -> Vec<u32> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                TimerEvent::TimeElapsed {
                    seconds_remaining, ..
                } => Some(*seconds_remaining),
                TimerEvent::Finished { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn elapsed_count(&self) -> usize {
        self.lock().iter().filter(|e| !e.is_finished()).count()
    }

    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.lock().iter().filter(|e| e.is_finished()).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TimerEvent<C>>> {
        // A panicking test listener must not hide the events recorded so far.
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<C> TimerListener<C> for RecordingListener<C>
where
    C: Clone + Send + Sync + 'static,
{
    fn on_time_elapsed(&self, seconds_remaining: u32, context: &C) {
        self.lock().push(TimerEvent::TimeElapsed {
            seconds_remaining,
            context: context.clone(),
        });
    }

    fn on_timer_finished(&self, context: &C) {
        self.lock().push(TimerEvent::Finished {
            context: context.clone(),
        });
    }
}

impl<C, L> TimerListener<C> for std::sync::Arc<L>
where
    C: Send + Sync + 'static,
    L: TimerListener<C> + ?Sized,
{
    fn on_time_elapsed(&self, seconds_remaining: u32, context: &C) {
        (**self).on_time_elapsed(seconds_remaining, context);
    }

    fn on_timer_finished(&self, context: &C) {
        (**self).on_timer_finished(context);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod timer_event_tests {
        use super::*;

        #[test]
        fn test_context_accessor() {
            let event = TimerEvent::TimeElapsed {
                seconds_remaining: 10,
                context: "work",
            };
            assert_eq!(*event.context(), "work");

            let event = TimerEvent::Finished { context: "break" };
            assert_eq!(*event.context(), "break");
        }

        #[test]
        fn test_is_finished() {
            assert!(TimerEvent::Finished { context: 1 }.is_finished());
            assert!(!TimerEvent::TimeElapsed {
                seconds_remaining: 1,
                context: 1
            }
            .is_finished());
        }
    }

    mod channel_listener_tests {
        use super::*;

        #[test]
        fn test_forwards_elapsed_and_finished() {
            let (tx, mut rx) = mpsc::unbounded_channel();

            tx.on_time_elapsed(59, &"work");
            tx.on_timer_finished(&"work");

            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::TimeElapsed {
                    seconds_remaining: 59,
                    context: "work"
                }
            );
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Finished { context: "work" }
            );
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_dropped_receiver_does_not_panic() {
            let (tx, rx) = mpsc::unbounded_channel::<TimerEvent<u8>>();
            drop(rx);

            tx.on_time_elapsed(1, &0);
            tx.on_timer_finished(&0);
        }
    }

    mod recording_listener_tests {
        use super::*;

        #[test]
        fn test_records_in_order() {
            let listener = RecordingListener::new();
            listener.on_time_elapsed(3, &'a');
            listener.on_time_elapsed(2, &'a');
            listener.on_timer_finished(&'a');

            assert_eq!(listener.elapsed_seconds(), vec![3, 2]);
            assert_eq!(listener.elapsed_count(), 2);
            assert_eq!(listener.finished_count(), 1);
            assert_eq!(
                listener.events().last(),
                Some(&TimerEvent::Finished { context: 'a' })
            );
        }

        #[test]
        fn test_clear() {
            let listener = RecordingListener::new();
            listener.on_timer_finished(&());
            listener.clear();
            assert!(listener.events().is_empty());
        }

        #[test]
        fn test_arc_forwarding() {
            let listener = std::sync::Arc::new(RecordingListener::new());
            let shared = listener.clone();
            shared.on_time_elapsed(7, &"x");
            assert_eq!(listener.elapsed_seconds(), vec![7]);
        }
    }
}
