//! Game state management module.
//!
//! This module holds everything that changes while a session is played: the
//! placed maze objects and the collision test against them, the mouse, the
//! cheese, and the [`session::SessionController`] that ties them together
//! on every tick. The countdown used by a session is defined here.

pub mod cheese;
pub mod collision;
pub mod mouse;
pub mod object;
pub mod session;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Which elapsed time is recorded when the countdown runs out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryElapsed {
    /// Report exactly the game length.
    #[default]
    GameLength,
    /// Report the elapsed time measured at the tick that noticed expiry.
    Actual,
}

/// Countdown driven by host-supplied timestamps.
///
/// The timer never reads the clock itself; it only knows the instants it is
/// handed through [`GameTimer::restart`] and [`GameTimer::update`]. Once
/// stopped it keeps reporting the elapsed time it was stopped with.
#[derive(Debug, Clone)]
pub struct GameTimer {
    pub duration: Duration,
    start_time: Instant,
    now: Instant,
    frozen: Option<Duration>,
}

impl GameTimer {
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            duration,
            start_time: now,
            now,
            frozen: None,
        }
    }

    /// Starts counting from zero at `now`.
    pub fn restart(&mut self, now: Instant) {
        self.start_time = now;
        self.now = now;
        self.frozen = None;
    }

    /// Advances the timer's view of the clock. Instants earlier than the
    /// last one seen are ignored so the remaining time never goes back up.
    pub fn update(&mut self, now: Instant) {
        if self.frozen.is_none() && now > self.now {
            self.now = now;
        }
    }

    /// Freezes the timer with `elapsed` as its final reading.
    pub fn stop(&mut self, elapsed: Duration) {
        self.frozen = Some(elapsed);
    }

    pub fn is_stopped(&self) -> bool {
        self.frozen.is_some()
    }

    /// Time measured since the last restart, or the frozen reading.
    pub fn elapsed(&self) -> Duration {
        self.frozen
            .unwrap_or_else(|| self.now.saturating_duration_since(self.start_time))
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    pub fn format_time(&self) -> String {
        format!("{:05.2}", self.remaining().as_secs_f64())
    }
}
