// src/engine/timeout.rs

//! Wall-clock deadlines, tracked independently of poll cycles.

use std::time::Duration;

use tokio::time::Instant;

/// Which deadline expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Hard,
    Soft,
}

/// Hard and soft deadlines measured from process start.
///
/// The hard deadline always ends the process successfully once reached.
/// The soft deadline fires only while no triggered run has succeeded; the
/// first success permanently disarms it. Methods take explicit instants so
/// unit tests can drive the governor with a synthetic clock.
#[derive(Debug, Clone)]
pub struct TimeoutGovernor {
    hard_deadline: Option<Instant>,
    soft_deadline: Option<Instant>,
    first_success: Option<Instant>,
}

impl TimeoutGovernor {
    pub fn new(start: Instant, hard: Option<Duration>, soft: Option<Duration>) -> Self {
        Self {
            hard_deadline: hard.map(|d| start + d),
            soft_deadline: soft.map(|d| start + d),
            first_success: None,
        }
    }

    /// Record a successful triggered run; disarms the soft deadline for
    /// the remainder of the process.
    pub fn note_success(&mut self, now: Instant) {
        if self.first_success.is_none() {
            self.first_success = Some(now);
        }
    }

    /// Which deadline, if any, has expired at `now`. Soft wins when both
    /// have expired.
    pub fn check(&self, now: Instant) -> Option<Expiry> {
        if self.soft_armed() && self.soft_deadline.is_some_and(|d| now >= d) {
            return Some(Expiry::Soft);
        }
        if self.hard_deadline.is_some_and(|d| now >= d) {
            return Some(Expiry::Hard);
        }
        None
    }

    /// Clamp the tick wait so a long poll interval cannot delay deadline
    /// detection past the nearest armed deadline.
    pub fn clamp_wait(&self, now: Instant, tick: Duration) -> Duration {
        let mut wait = tick;

        if let Some(deadline) = self.hard_deadline {
            wait = wait.min(deadline.saturating_duration_since(now));
        }
        if self.soft_armed() {
            if let Some(deadline) = self.soft_deadline {
                wait = wait.min(deadline.saturating_duration_since(now));
            }
        }

        wait
    }

    fn soft_armed(&self) -> bool {
        self.first_success.is_none()
    }
}
