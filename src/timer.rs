//! Single-shot, cancel-and-restart timer.
//!
//! Hosts drive the player from one UI thread, so timers are plain deadlines
//! that the host loop polls with the current instant instead of threads or
//! callbacks. A timer holds at most one pending deadline: restarting replaces
//! it, and it fires at most once per restart.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SingleShotTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SingleShotTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and arm a new one `delay` after `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the deadline, if one is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
