//! Poll-style debounce timer.
//!
//! The interaction model is single-threaded and cooperative, so instead of
//! a timer thread the debouncer is re-armed on each event and polled; only
//! the arming that survives a full idle window fires. Callers pass `now`
//! explicitly, which keeps tests free of real sleeps.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    armed_at: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed_at: None,
        }
    }

    /// (Re-)arms the timer: any previously pending firing is superseded.
    pub fn rearm(&mut self, now: Instant) {
        self.armed_at = Some(now);
    }

    /// True once per arming, after a full delay has elapsed undisturbed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.armed_at {
            Some(armed_at) if now.duration_since(armed_at) >= self.delay => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }
}
