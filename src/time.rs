//! Time abstraction for testability.
//!
//! Stub identifiers and webhook timestamp checks read the current time
//! through the [`Clock`] trait so tests can pin it.

use std::time::{Duration, SystemTime};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use beatstore_clients::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.unix_millis() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Milliseconds since the Unix epoch.
    ///
    /// Pre-epoch clocks report 0.
    fn unix_millis(&self) -> u128 {
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis())
    }

    /// Whole seconds since the Unix epoch.
    fn unix_secs(&self) -> u64 {
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a fixed instant.
///
/// Useful for reproducible stub identifiers and signature timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(SystemTime);

impl FixedClock {
    /// Creates a clock frozen at `secs` seconds after the Unix epoch.
    #[must_use]
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    /// Creates a clock frozen at `millis` milliseconds after the Unix epoch.
    #[must_use]
    pub fn from_unix_millis(millis: u64) -> Self {
        Self(SystemTime::UNIX_EPOCH + Duration::from_millis(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_returns_current_time() {
        let clock = SystemClock;
        let before = SystemTime::now();
        let result = clock.now();
        let after = SystemTime::now();

        assert!(result >= before);
        assert!(result <= after);
    }

    #[test]
    fn system_clock_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemClock>();
        assert_send_sync::<FixedClock>();
    }

    #[test]
    fn fixed_clock_reports_seconds_and_millis() {
        let clock = FixedClock::from_unix_millis(1_700_000_000_123);

        assert_eq!(clock.unix_secs(), 1_700_000_000);
        assert_eq!(clock.unix_millis(), 1_700_000_000_123);
    }

    #[test]
    fn fixed_clock_from_secs_matches_epoch_offset() {
        let clock = FixedClock::from_unix_secs(1_000_000);

        assert_eq!(
            clock.now(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000)
        );
        assert_eq!(clock.unix_millis(), 1_000_000_000);
    }

    #[test]
    fn fixed_clock_does_not_advance() {
        let clock = FixedClock::from_unix_secs(42);
        let first = clock.now();
        let second = clock.now();

        assert_eq!(first, second);
    }
}
