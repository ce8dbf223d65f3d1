/// Match start timestamps
///
/// Start times are wall-clock nanoseconds since the Unix epoch. The system
/// clock can step backwards (NTP adjustments), so registrations go through a
/// `MonotonicClock` that never hands out a value smaller than the previous
/// one. Equal values are possible; callers break those ties with the
/// registration sequence.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in nanoseconds (no caching)
#[inline]
pub fn get_precise_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Non-decreasing timestamp source
///
/// Not synchronized on its own; the owner keeps it behind its lock.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: u64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `max(now, previous stamp)`
    #[inline]
    pub fn stamp(&mut self) -> u64 {
        self.observe(get_precise_timestamp())
    }

    #[inline]
    fn observe(&mut self, now: u64) -> u64 {
        if now > self.last {
            self.last = now;
        }
        self.last
    }

    /// Last value handed out, 0 if none
    pub fn last(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_precise_timestamp_always_updates() {
        let ts1 = get_precise_timestamp();
        thread::sleep(Duration::from_micros(100));
        let ts2 = get_precise_timestamp();

        assert!(ts2 > ts1, "Precise timestamp should always be fresh");
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = MonotonicClock::new();
        let mut previous = 0;
        for _ in 0..1000 {
            let ts = clock.stamp();
            assert!(ts >= previous, "Timestamps should be monotonic");
            previous = ts;
        }
        assert_eq!(clock.last(), previous);
    }

    #[test]
    fn test_clock_ignores_backwards_steps() {
        let mut clock = MonotonicClock::new();
        assert_eq!(clock.observe(500), 500);
        assert_eq!(clock.observe(300), 500);
        assert_eq!(clock.observe(500), 500);
        assert_eq!(clock.observe(900), 900);
    }
}
