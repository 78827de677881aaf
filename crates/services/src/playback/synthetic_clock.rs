use chrono::{DateTime, Utc};
use quiz_core::time::seconds_between;

/// Estimated playback position for surfaces that never report time.
///
/// Counts wall-clock seconds since `start`, minus time spent suspended.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyntheticClock {
    started_at: Option<DateTime<Utc>>,
    suspended_at: Option<DateTime<Utc>>,
    paused_secs: f64,
}

impl SyntheticClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) counting from `now`.
    pub fn start(&mut self, now: DateTime<Utc>) {
        *self = Self {
            started_at: Some(now),
            ..Self::default()
        };
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    pub fn suspend(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_some() && self.suspended_at.is_none() {
            self.suspended_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.suspended_at.take() {
            self.paused_secs += seconds_between(since, now);
        }
    }

    /// Seconds of playback at `now`. Zero before `start`.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let until = self.suspended_at.unwrap_or(now);
        (seconds_between(started_at, until) - self.paused_secs).max(0.0)
    }
}
