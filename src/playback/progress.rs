//! Progress reporting cadence: whole polling intervals only.
//!
//! The reporter does not publish by itself; the playback thread asks it how
//! many interval boundaries have passed and emits one position update per
//! boundary. A session has exactly one reporter, and `start` replaces any
//! previous anchor, so duplicate timers cannot exist.

use std::time::{Duration, Instant};

pub struct ProgressReporter {
    interval: Duration,
    anchor: Option<Instant>,
    published: u64,
}

impl ProgressReporter {
    pub fn new(interval: Duration) -> Self {
        Self {
            // Guard against a zero interval from bad config.
            interval: interval.max(Duration::from_millis(1)),
            anchor: None,
            published: 0,
        }
    }

    /// Begin polling from `now`. Any previous anchor is discarded.
    pub fn start(&mut self, now: Instant) {
        self.anchor = Some(now);
        self.published = 0;
    }

    /// Stop polling; subsequent `due_ticks` calls return 0 until restarted.
    pub fn stop(&mut self) {
        self.anchor = None;
        self.published = 0;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Number of position updates owed since the last call: one per whole
    /// interval elapsed since the anchor, none for a partial interval.
    pub fn due_ticks(&mut self, now: Instant) -> u64 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(anchor);
        let whole = (elapsed.as_millis() / self.interval.as_millis()) as u64;
        let due = whole.saturating_sub(self.published);
        self.published = whole;
        due
    }
}
