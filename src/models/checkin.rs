use chrono::{DateTime, Utc};
use std::time::Instant;

/// A single recorded check-in. The monotonic instant drives TTL arithmetic,
/// the wall-clock time is only for display. Both are written as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkin {
    pub at: Instant,
    pub wall: DateTime<Utc>,
}

impl Checkin {
    pub fn now() -> Self {
        Self {
            at: Instant::now(),
            wall: Utc::now(),
        }
    }

    /// Whole seconds since this check-in, rounded to nearest. Never negative.
    pub fn seconds_since(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.at).as_secs_f64().round() as u64
    }
}
