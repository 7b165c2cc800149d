//! # Throttle Module
//!
//! Minimum-interval gate for the dispatched command stream.
//!
//! Moves arrive far more often than the actuators can follow. A command is
//! only let through when at least `min_interval` has elapsed since the last
//! dispatched one. Timestamps come from [`Instant`], which is monotonic.

use std::time::{Duration, Instant};

/// Rate limiter for command dispatch.
///
/// # Examples
///
/// ```
/// use ptz_joystick::throttle::Throttle;
/// use std::time::{Duration, Instant};
///
/// let mut throttle = Throttle::new(Duration::from_millis(80));
/// let t0 = Instant::now();
///
/// assert!(throttle.try_acquire(t0));
/// assert!(!throttle.try_acquire(t0 + Duration::from_millis(79)));
/// assert!(throttle.try_acquire(t0 + Duration::from_millis(80)));
/// ```
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_dispatch: Option<Instant>,
}

impl Throttle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: None,
        }
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time of the last dispatch, if any.
    #[must_use]
    pub fn last_dispatch(&self) -> Option<Instant> {
        self.last_dispatch
    }

    /// Returns true if a dispatch is allowed at `now`. Does not record it.
    ///
    /// The first dispatch is always allowed.
    #[must_use]
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last_dispatch {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        }
    }

    /// Records a dispatch at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_dispatch = Some(now);
    }

    /// Checks readiness and records the dispatch when allowed.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.is_ready(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }
}
