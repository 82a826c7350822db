use std::time::Instant;

/// Converts one cumulative byte counter into bytes/second between calls.
///
/// The first call only records a baseline. A counter that went backwards
/// (interface re-enumeration, device reset) yields 0 for that tick.
#[derive(Debug, Default, Clone)]
pub struct RateCounter {
    last: Option<(u64, Instant)>,
}

impl RateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: u64, now: Instant) -> f64 {
        let rate = match self.last {
            Some((previous, at)) => {
                let dt = now.saturating_duration_since(at).as_secs_f64();
                if dt > 0.0 && value >= previous {
                    (value - previous) as f64 / dt
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.last = Some((value, now));
        rate
    }
}

/// Two [`RateCounter`]s advanced together, e.g. down/up or read/write.
#[derive(Debug, Default, Clone)]
pub struct DuplexRate {
    inbound:  RateCounter,
    outbound: RateCounter,
}

impl DuplexRate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(inbound, outbound)` in bytes/second.
    pub fn update(&mut self, inbound: u64, outbound: u64, now: Instant) -> (f64, f64) {
        (
            self.inbound.update(inbound, now),
            self.outbound.update(outbound, now),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_update_seeds_and_reports_zero() {
        let mut rate = RateCounter::new();
        assert_eq!(rate.update(10_000, Instant::now()), 0.0);
    }

    #[test]
    fn bytes_per_second_over_elapsed_time() {
        let t0 = Instant::now();
        let mut rate = RateCounter::new();
        rate.update(1_000, t0);
        assert_eq!(rate.update(3_048, t0 + Duration::from_secs(2)), 1_024.0);
    }

    #[test]
    fn counter_reset_is_zero_not_negative() {
        let t0 = Instant::now();
        let mut rate = RateCounter::new();
        rate.update(50_000, t0);
        assert_eq!(rate.update(100, t0 + Duration::from_secs(1)), 0.0);
        // Baseline moves to the reset value.
        assert_eq!(rate.update(1_124, t0 + Duration::from_secs(2)), 1_024.0);
    }

    #[test]
    fn zero_elapsed_time_is_zero() {
        let t0 = Instant::now();
        let mut rate = RateCounter::new();
        rate.update(0, t0);
        assert_eq!(rate.update(500, t0), 0.0);
    }

    #[test]
    fn duplex_advances_both_sides() {
        let t0 = Instant::now();
        let mut rate = DuplexRate::new();
        assert_eq!(rate.update(0, 0, t0), (0.0, 0.0));
        let (down, up) = rate.update(4_096, 1_024, t0 + Duration::from_secs(1));
        assert_eq!(down, 4_096.0);
        assert_eq!(up, 1_024.0);
    }
}
