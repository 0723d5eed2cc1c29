//! Cancellable one-shot deadline.
//!
//! Scheduling replaces any pending deadline, so a burst of schedules fires
//! once, `delay` after the last of them. Time always comes from the caller.

use std::time::{Duration, Instant};

/// Delay before a coalesced value announcement goes out.
pub const ANNOUNCE_DELAY: Duration = Duration::from_millis(200);

/// A coalescing one-shot timer driven by caller-supplied instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    delay: Duration,
    due: Option<Instant>,
}

impl Default for DeferredTask {
    fn default() -> Self {
        Self::new(ANNOUNCE_DELAY)
    }
}

impl DeferredTask {
    /// Create an idle task.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    /// Delay between scheduling and firing.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Deadline of the pending run, if any.
    #[must_use]
    pub const fn due(&self) -> Option<Instant> {
        self.due
    }

    /// Schedule a run at `now + delay`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    /// Drop the pending run.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Check whether a run is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Fire if the deadline has passed. Returns `true` at most once per
    /// schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
