use serde::{Deserialize, Serialize};

/// Departure pattern of a mode on an edge.
///
/// An `interval` of 0 means the mode leaves whenever the traveller is ready
/// (a private vehicle); the service window is then ignored. Otherwise a
/// departure happens every `interval` minutes, aligned on midnight, while
/// the clock is inside `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// minutes
    pub interval: f64,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Schedule {
    pub const UNSCHEDULED: Schedule = Schedule {
        interval: 0.0,
        start_hour: 0,
        end_hour: 24,
    };

    pub fn new(interval: f64, start_hour: u8, end_hour: u8) -> Self {
        Schedule {
            interval,
            start_hour,
            end_hour,
        }
    }

    pub fn is_unscheduled(&self) -> bool {
        self.interval == 0.0
    }

    pub fn window_start(&self) -> f64 {
        f64::from(self.start_hour) * 60.0
    }

    pub fn window_end(&self) -> f64 {
        f64::from(self.end_hour) * 60.0
    }

    /// Minutes to wait for the next departure when reaching the tail of the
    /// edge at `arrival` (minutes since midnight), or `None` when service has
    /// already ended.
    ///
    /// Clock values are not folded back into a single day: an arrival past
    /// midnight is compared against the same day's window.
    pub fn wait_time(&self, arrival: f64) -> Option<f64> {
        if self.is_unscheduled() {
            return Some(0.0);
        }
        if arrival < self.window_start() {
            return Some(self.window_start() - arrival);
        }
        if arrival >= self.window_end() {
            return None;
        }
        Some((self.interval - arrival % self.interval) % self.interval)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::UNSCHEDULED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn metro() -> Schedule {
        Schedule::new(5.0, 1, 23)
    }

    #[test]
    fn unscheduled_never_waits() {
        let car = Schedule::UNSCHEDULED;
        assert_eq!(car.wait_time(0.0), Some(0.0));
        assert_eq!(car.wait_time(1439.0), Some(0.0));
        assert_eq!(car.wait_time(3000.0), Some(0.0));
    }

    #[test]
    fn unscheduled_ignores_window() {
        let s = Schedule::new(0.0, 7, 8);
        assert_eq!(s.wait_time(23.0 * 60.0), Some(0.0));
    }

    #[test]
    fn waits_for_service_start() {
        assert_eq!(metro().wait_time(30.0), Some(30.0));
    }

    #[test]
    fn no_service_after_end() {
        assert_eq!(metro().wait_time(23.0 * 60.0), None);
        assert_eq!(metro().wait_time(23.0 * 60.0 + 1.0), None);
    }

    #[test]
    fn departure_boundary_has_no_wait() {
        assert_eq!(metro().wait_time(600.0), Some(0.0));
    }

    #[test]
    fn waits_until_next_departure() {
        assert_eq!(metro().wait_time(602.0), Some(3.0));
        let bus = Schedule::new(20.0, 7, 22);
        assert_eq!(bus.wait_time(9.0 * 60.0 + 1.0), Some(19.0));
    }

    proptest! {
        #[test]
        fn wait_is_shorter_than_interval(
            interval in 1u32..120,
            start_hour in 0u8..12,
            span in 1u8..12,
            offset in 0.0f64..1.0,
        ) {
            let s = Schedule::new(f64::from(interval), start_hour, start_hour + span);
            let arrival = s.window_start() + offset * (s.window_end() - s.window_start());
            prop_assume!(arrival < s.window_end());
            let wait = s.wait_time(arrival);
            prop_assert!(wait.is_some());
            let wait = wait.unwrap_or_default();
            prop_assert!(wait >= 0.0);
            prop_assert!(wait < s.interval);
        }
    }
}
