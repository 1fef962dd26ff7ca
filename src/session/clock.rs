//! One-second duration clock for the recording session.
//!
//! The clock is not a background task. It is a schedule that the panel loop
//! advances once per frame: `sync` arms or disarms it from the current
//! recording state, `poll` reports how many whole seconds have elapsed since
//! it was armed. Keeping it passive means there is exactly one tick source,
//! it stops the moment the session leaves the recording-and-unpaused state,
//! and paused wall-clock time is never credited.

use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Tick schedule driven by the panel loop.
#[derive(Debug)]
pub struct DurationClock {
    /// When the next tick is due. `None` while disarmed.
    next_due: Option<Instant>,
}

impl DurationClock {
    pub fn new() -> Self {
        DurationClock { next_due: None }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arms or disarms the clock from the recording-and-unpaused condition.
    ///
    /// Arming schedules the first tick one second from `now` — starting or
    /// resuming a session never yields an immediate tick. Disarming drops the
    /// schedule, discarding any partial second in progress.
    pub fn sync(&mut self, active: bool, now: Instant) {
        match (active, self.next_due.is_some()) {
            (true, false) => self.next_due = Some(now + TICK),
            (false, true) => self.next_due = None,
            _ => {}
        }
    }

    /// Returns the number of whole ticks due at `now` and advances the
    /// schedule past them. Returns 0 while disarmed.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += TICK;
        }
        self.next_due = Some(due);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_clock_never_ticks() {
        let mut clock = DurationClock::new();
        let t0 = Instant::now();
        assert!(!clock.is_armed());
        assert_eq!(clock.poll(t0 + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_no_tick_before_first_second() {
        let mut clock = DurationClock::new();
        let t0 = Instant::now();
        clock.sync(true, t0);
        assert_eq!(clock.poll(t0), 0);
        assert_eq!(clock.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(clock.poll(t0 + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_accrued_ticks_are_delivered_in_one_poll() {
        let mut clock = DurationClock::new();
        let t0 = Instant::now();
        clock.sync(true, t0);
        // 3.5 seconds pass without a poll (e.g. a slow command in flight).
        assert_eq!(clock.poll(t0 + Duration::from_millis(3500)), 3);
        // The half second in progress completes later.
        assert_eq!(clock.poll(t0 + Duration::from_millis(3900)), 0);
        assert_eq!(clock.poll(t0 + Duration::from_secs(4)), 1);
    }

    #[test]
    fn test_disarm_discards_partial_progress() {
        let mut clock = DurationClock::new();
        let t0 = Instant::now();
        clock.sync(true, t0);
        assert_eq!(clock.poll(t0 + Duration::from_millis(2700)), 2);

        // Pause at 2.7s: the 0.7s in progress must not survive the pause.
        clock.sync(false, t0 + Duration::from_millis(2700));
        assert!(!clock.is_armed());

        // Resume ten seconds later: cadence restarts from the resume instant.
        let resumed = t0 + Duration::from_millis(12_700);
        clock.sync(true, resumed);
        assert_eq!(clock.poll(resumed + Duration::from_millis(999)), 0);
        assert_eq!(clock.poll(resumed + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_sync_while_armed_keeps_the_schedule() {
        let mut clock = DurationClock::new();
        let t0 = Instant::now();
        clock.sync(true, t0);
        // Re-syncing every frame must not push the next tick into the future.
        clock.sync(true, t0 + Duration::from_millis(500));
        clock.sync(true, t0 + Duration::from_millis(900));
        assert_eq!(clock.poll(t0 + Duration::from_secs(1)), 1);
    }
}
