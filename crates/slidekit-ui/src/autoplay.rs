//! Interval timer for auto-advancing pages, driven by frame times.

const NANOS_PER_MS: u64 = 1_000_000;

/// Fires once per `interval_ms` of unsuspended frame time.
///
/// Time spent suspended (while the user drags) does not count toward the
/// next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoPlayTimer {
    interval_nanos: u64,
    elapsed_nanos: u64,
    last_frame_nanos: Option<u64>,
    suspended: bool,
}

impl AutoPlayTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_nanos: interval_ms.max(1).saturating_mul(NANOS_PER_MS),
            elapsed_nanos: 0,
            last_frame_nanos: None,
            suspended: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_nanos / NANOS_PER_MS
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// Restarts the interval, e.g. after a manual page change.
    pub fn restart(&mut self) {
        self.elapsed_nanos = 0;
    }

    /// Accounts for the time since the previous frame. Returns true when the
    /// interval elapsed.
    pub fn on_frame(&mut self, frame_nanos: u64) -> bool {
        let previous = self.last_frame_nanos.replace(frame_nanos);
        if self.suspended {
            return false;
        }
        let Some(previous) = previous else {
            return false;
        };
        self.elapsed_nanos += frame_nanos.saturating_sub(previous);
        if self.elapsed_nanos >= self.interval_nanos {
            // Long stalls fire once, not once per missed interval.
            self.elapsed_nanos = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = NANOS_PER_MS;

    #[test]
    fn fires_after_interval() {
        let mut timer = AutoPlayTimer::new(100);
        assert!(!timer.on_frame(0));
        assert!(!timer.on_frame(50 * MS));
        assert!(timer.on_frame(100 * MS));
        assert!(!timer.on_frame(150 * MS));
        assert!(timer.on_frame(200 * MS));
    }

    #[test]
    fn suspended_time_does_not_count() {
        let mut timer = AutoPlayTimer::new(100);
        timer.on_frame(0);
        timer.on_frame(60 * MS);
        timer.set_suspended(true);
        assert!(!timer.on_frame(500 * MS));
        timer.set_suspended(false);
        assert!(!timer.on_frame(530 * MS));
        assert!(timer.on_frame(540 * MS));
    }

    #[test]
    fn restart_resets_progress() {
        let mut timer = AutoPlayTimer::new(100);
        timer.on_frame(0);
        timer.on_frame(90 * MS);
        timer.restart();
        assert!(!timer.on_frame(120 * MS));
        assert!(timer.on_frame(190 * MS));
    }

    #[test]
    fn stall_fires_once() {
        let mut timer = AutoPlayTimer::new(100);
        timer.on_frame(0);
        assert!(timer.on_frame(1_000 * MS));
        assert!(!timer.on_frame(1_016 * MS));
    }
}
