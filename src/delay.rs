use crate::MicrosClock;

/// Fixed cost of one `wait_micros` call in microseconds: one clock read
/// plus the call/return machinery, calibrated on a 16 MHz-class core.
pub const WAIT_OVERHEAD_US: u32 = 4;

/// Busy-wait for `duration_us`, corrected for the fixed call overhead.
///
/// Requests at or below [`WAIT_OVERHEAD_US`] return immediately: the
/// overhead alone already consumes the requested time, and an empty spin
/// loop would only overshoot. A target that wraps the counter is handled
/// by first spinning until the counter itself rolls over.
pub fn wait_micros<CLK: MicrosClock>(clock: &mut CLK, duration_us: u32) {
    if duration_us <= WAIT_OVERHEAD_US {
        return;
    }

    let start = clock.now();
    let target = start.wrapping_add(duration_us - WAIT_OVERHEAD_US);

    if target < start {
        // target is past the wraparound point
        while clock.now() >= start {}
    }
    while clock.now() < target {}
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter that advances one microsecond per read, so busy-wait
    /// loops make simulated time pass.
    struct StepClock {
        now: u32,
        reads: u32,
    }

    impl StepClock {
        fn at(now: u32) -> Self {
            Self { now, reads: 0 }
        }
    }

    impl MicrosClock for StepClock {
        fn now(&mut self) -> u32 {
            let t = self.now;
            self.now = self.now.wrapping_add(1);
            self.reads += 1;
            t
        }
    }

    #[test]
    fn short_waits_never_read_the_clock() {
        let mut clock = StepClock::at(0);
        for us in 0..=WAIT_OVERHEAD_US {
            wait_micros(&mut clock, us);
        }
        assert_eq!(clock.reads, 0);
    }

    #[test]
    fn wait_spins_until_overhead_corrected_target() {
        let mut clock = StepClock::at(100);
        wait_micros(&mut clock, 1000);
        // the final read observes the target, hence the +1
        assert_eq!(clock.now, 100 + 1000 - WAIT_OVERHEAD_US + 1);
    }

    #[test]
    fn wait_spans_counter_wraparound() {
        let mut clock = StepClock::at(u32::MAX - 10);
        wait_micros(&mut clock, 40);
        // 11 ticks to roll over, then up to target = 25
        assert_eq!(clock.now, 26);
    }

    #[test]
    fn wait_just_above_overhead_is_short() {
        let mut clock = StepClock::at(7);
        wait_micros(&mut clock, WAIT_OVERHEAD_US + 1);
        // start read plus a single spin to reach target = start + 1
        assert_eq!(clock.reads, 2);
    }
}
