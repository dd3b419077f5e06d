//! Simple periodic event scheduler.
//!
//! A [`Tick`] tracks when one periodic task should run. It does not run
//! anything itself - the controller asks each tick whether its task is due
//! on every pass. The interval sets how often the task runs; the phase
//! staggers independent tasks so they do not all fire on the same pass.
//!
//! Due times stay aligned to the absolute grid `phase + k * interval`: if
//! the run loop stalls past one or more intervals, exactly one run fires and
//! the skipped ones are silently dropped, so there is neither cumulative
//! drift nor a burst of catch-up runs.

/// Errors constructing a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// A zero interval would never schedule and divides by zero
    ZeroInterval,
}

/// Milliseconds elapsed from `since_ms` to `now_ms`, safe across the
/// timestamp wrap boundary.
pub fn elapsed(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

/// Timing state for one periodic task
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Interval between runs in milliseconds
    interval_ms: u32,
    /// Time of the first run in milliseconds since boot
    phase_ms: u32,
    /// Absolute time of the next run
    next_due_ms: u32,
}

impl Tick {
    /// Create a tick firing at `phase_ms + k * interval_ms`.
    ///
    /// The phase is reduced modulo the interval: the grid re-sync in
    /// [`Tick::due`] only holds for a phase within one interval. A task
    /// whose phase has already elapsed fires on the first check.
    pub fn new(interval_ms: u32, phase_ms: u32) -> Result<Self, TickError> {
        if interval_ms == 0 {
            return Err(TickError::ZeroInterval);
        }
        let phase_ms = phase_ms % interval_ms;
        Ok(Self {
            interval_ms,
            phase_ms,
            next_due_ms: phase_ms,
        })
    }

    /// Check whether the task is due to run. If so, schedule the next run.
    ///
    /// Returns true at most once per grid point regardless of how often or
    /// how late the check is made.
    pub fn due(&mut self, now_ms: u32) -> bool {
        // Wrap-safe strict comparison now > next_due
        if elapsed(now_ms, self.next_due_ms) as i32 > 0 {
            // Re-synchronize to the absolute grid rather than adding one
            // interval: skipped runs are dropped, the phase is preserved.
            self.next_due_ms = self
                .phase_ms
                .wrapping_add(self.interval_ms)
                .wrapping_add(now_ms / self.interval_ms * self.interval_ms);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_interval_rejected() {
        assert_eq!(Tick::new(0, 10).unwrap_err(), TickError::ZeroInterval);
    }

    #[test]
    fn test_not_due_before_phase() {
        let mut tick = Tick::new(50, 15).unwrap();
        assert!(!tick.due(0));
        assert!(!tick.due(15)); // strictly greater-than, not at-phase
    }

    #[test]
    fn test_fires_once_after_phase() {
        let mut tick = Tick::new(50, 15).unwrap();
        assert!(tick.due(16));
        assert!(!tick.due(17));
        assert!(!tick.due(64));
        assert!(tick.due(66));
    }

    #[test]
    fn test_stall_drops_skipped_runs() {
        let mut tick = Tick::new(50, 15).unwrap();
        assert!(tick.due(16));
        // Loop stalls for four intervals: exactly one firing, not four
        assert!(tick.due(200));
        assert!(!tick.due(201));
        assert!(!tick.due(260));
        assert!(tick.due(266));
    }

    #[test]
    fn test_phase_preserved_after_stall() {
        let mut tick = Tick::new(100, 30).unwrap();
        assert!(tick.due(31));
        assert!(tick.due(1000));
        // Next grid point is 30 + 100 + 1000 = 1130
        assert!(!tick.due(1130));
        assert!(tick.due(1131));
    }

    #[test]
    fn test_phase_reduced_onto_grid() {
        // Phase 115 with interval 50 is the same grid as phase 15
        let mut tick = Tick::new(50, 115).unwrap();
        assert!(!tick.due(15));
        assert!(tick.due(16));
        // Next grid point is 15 + 50 + 0 = 65, not 165
        assert!(!tick.due(65));
        assert!(tick.due(66));
    }

    #[test]
    fn test_elapsed_wraps() {
        assert_eq!(elapsed(5, u32::MAX - 4), 10);
        assert_eq!(elapsed(100, 40), 60);
    }

    #[test]
    fn test_due_near_wrap() {
        let mut tick = Tick::new(50, 15).unwrap();
        // next_due still 15; a now just before the wrap boundary reads as
        // "before" the due time through the signed difference
        assert!(!tick.due(u32::MAX - 100));
    }

    proptest! {
        /// After any firing, an immediate re-check never fires again
        #[test]
        fn prop_no_double_fire(interval in 1u32..10_000, phase in 0u32..10_000, now in 0u32..1_000_000) {
            let mut tick = Tick::new(interval, phase).unwrap();
            if tick.due(now) {
                prop_assert!(!tick.due(now));
            }
        }

        /// Exactly one firing is observed per check after an arbitrary stall
        #[test]
        fn prop_single_fire_after_stall(interval in 1u32..1_000, phase in 0u32..1_000, stall in 1u32..100_000) {
            let mut tick = Tick::new(interval, phase).unwrap();
            let first = phase + 1;
            tick.due(first);
            let late = first + stall;
            if tick.due(late) {
                prop_assert!(!tick.due(late));
            }
        }
    }
}
