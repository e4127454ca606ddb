//! Time helpers for cache bookkeeping.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp recorded when a cached collection was last written.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whether `written_at` lies at least `window` before `at`.
///
/// A zero window makes every timestamp expired, which is how "always
/// refetch on read" is expressed.
#[must_use]
pub fn expired(written_at: Timestamp, window: TimeDelta, at: Timestamp) -> bool {
    at.signed_duration_since(written_at) >= window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_treat_zero_window_as_expired() {
        let ts = now();
        assert!(expired(ts, TimeDelta::zero(), ts));
    }

    #[test]
    fn should_not_expire_within_window() {
        let ts = now();
        let later = ts + TimeDelta::seconds(10);
        assert!(!expired(ts, TimeDelta::seconds(30), later));
        assert!(expired(ts, TimeDelta::seconds(5), later));
    }
}
