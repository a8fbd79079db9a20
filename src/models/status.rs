use chrono::{DateTime, Utc};
use std::fmt;
use std::time::{Duration, Instant};

use crate::models::DeviceId;

pub const NEVER: &str = "Never";
pub const DATE_LAYOUT: &str = "%a %b %e %H:%M:%S UTC %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// No check-in since the process started. Counts as offline.
    Never,
    Online,
    Offline,
}

impl Liveness {
    pub fn is_online(self) -> bool {
        self == Liveness::Online
    }

    /// The binary state reported to callers.
    pub fn state(self) -> &'static str {
        if self.is_online() {
            "Online"
        } else {
            "Offline"
        }
    }
}

impl fmt::Display for Liveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Liveness::Never => f.write_str(NEVER),
            Liveness::Online | Liveness::Offline => f.write_str(self.state()),
        }
    }
}

/// A device is offline once `ttl` has fully elapsed; exactly `ttl` is already offline.
pub fn classify(last_seen: Option<Instant>, now: Instant, ttl: Duration) -> Liveness {
    let Some(seen) = last_seen else {
        return Liveness::Never;
    };

    if now.saturating_duration_since(seen) >= ttl {
        Liveness::Offline
    } else {
        Liveness::Online
    }
}

/// One line of the aggregate status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub device: DeviceId,
    pub last_checkin: Option<DateTime<Utc>>,
    pub seconds_since: Option<u64>,
    pub liveness: Liveness,
}

impl StatusRow {
    pub fn last_checkin_display(&self) -> String {
        self.last_checkin
            .map_or_else(|| NEVER.to_string(), |at| at.format(DATE_LAYOUT).to_string())
    }

    pub fn seconds_since_display(&self) -> String {
        self.seconds_since
            .map_or_else(|| NEVER.to_string(), |secs| secs.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TTL: Duration = Duration::from_secs(30);

    #[test]
    fn never_seen_is_never_and_not_online() {
        let liveness = classify(None, Instant::now(), TTL);
        assert_eq!(liveness, Liveness::Never);
        assert!(!liveness.is_online());
        assert_eq!(liveness.state(), "Offline");
        assert_eq!(liveness.to_string(), "Never");
    }

    #[test]
    fn ttl_boundary_is_offline() {
        let seen = Instant::now();
        assert_eq!(classify(Some(seen), seen + TTL, TTL), Liveness::Offline);
        assert_eq!(
            classify(Some(seen), seen + Duration::from_secs(29), TTL),
            Liveness::Online
        );
        assert_eq!(
            classify(Some(seen), seen + Duration::from_secs(29) + Duration::from_millis(999), TTL),
            Liveness::Online
        );
        assert_eq!(
            classify(Some(seen), seen + Duration::from_secs(31), TTL),
            Liveness::Offline
        );
    }

    #[test]
    fn fresh_checkin_is_online() {
        let seen = Instant::now();
        assert_eq!(classify(Some(seen), seen, TTL), Liveness::Online);
    }

    #[test]
    fn now_before_last_seen_counts_as_zero_elapsed() {
        let now = Instant::now();
        let seen = now + Duration::from_secs(5);
        assert_eq!(classify(Some(seen), now, TTL), Liveness::Online);
    }

    #[test]
    fn row_display_values() {
        let device = DeviceId::normalize("alpha").unwrap();
        let never = StatusRow {
            device: device.clone(),
            last_checkin: None,
            seconds_since: None,
            liveness: Liveness::Never,
        };
        assert_eq!(never.last_checkin_display(), "Never");
        assert_eq!(never.seconds_since_display(), "Never");

        let seen = StatusRow {
            device,
            last_checkin: Some(Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()),
            seconds_since: Some(12),
            liveness: Liveness::Online,
        };
        assert_eq!(seen.last_checkin_display(), "Tue Mar  5 07:08:09 UTC 2024");
        assert_eq!(seen.seconds_since_display(), "12");
    }
}
