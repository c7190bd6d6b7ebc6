//! Cooperative keypad timers, pumped by the host event loop.
//!
//! Nothing here spawns threads, the host calls [`SecurePad::update`] from its loop and
//! elapsed deadlines are applied there, so a cancelled timer can never fire late.
//!
//! [`SecurePad::update`]: crate::pad::SecurePad::update

use std::time::{Duration, Instant};

/// Hold time before the backspace key starts repeating.
pub const REPEAT_DELAY: Duration = Duration::from_millis(500);
/// Interval between repeated backspace presses while the key is held.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(100);
/// Time for the keypad entrance animation to settle before the target field is
/// scrolled into view.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Periodic repeat timer, armed while an action key is held.
#[derive(Debug, Default)]
pub struct RepeatTimer {
    deadline: Option<Instant>,
}
impl RepeatTimer {
    /// Arms the timer, the first tick elapses after [`REPEAT_DELAY`].
    ///
    /// Arming an armed timer restarts it, the previous deadline is discarded.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + REPEAT_DELAY);
    }

    /// Disarms the timer, pending ticks are discarded.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// If the timer is armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Count of ticks elapsed up to `now`, advancing the deadline per [`REPEAT_INTERVAL`].
    ///
    /// Is zero while disarmed or before the hold delay elapses.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        if let Some(deadline) = &mut self.deadline {
            while *deadline <= now {
                *deadline += REPEAT_INTERVAL;
                ticks += 1;
            }
        }
        ticks
    }
}

/// Single-shot deferred deadline.
#[derive(Debug, Default)]
pub struct Deferred {
    deadline: Option<Instant>,
}
impl Deferred {
    /// Schedules the deadline, replacing any pending one.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Discards the pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` once, when the deadline elapses.
    ///
    /// The caller is responsible for re-checking state at fire time, a deadline
    /// scheduled under a previous state can be stale.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.deadline.map_or(false, |d| d <= now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_waits_for_hold_delay() {
        let now = Instant::now();
        let mut t = RepeatTimer::default();
        t.start(now);

        assert_eq!(t.poll(now), 0);
        assert_eq!(t.poll(now + REPEAT_DELAY - Duration::from_millis(1)), 0);
        assert_eq!(t.poll(now + REPEAT_DELAY), 1);
    }

    #[test]
    fn repeat_ticks_per_interval() {
        let now = Instant::now();
        let mut t = RepeatTimer::default();
        t.start(now);

        assert_eq!(t.poll(now + REPEAT_DELAY + 3 * REPEAT_INTERVAL), 4);
        assert_eq!(t.poll(now + REPEAT_DELAY + 3 * REPEAT_INTERVAL), 0);
        assert_eq!(t.poll(now + REPEAT_DELAY + 4 * REPEAT_INTERVAL), 1);
    }

    #[test]
    fn stopped_repeat_never_ticks() {
        let now = Instant::now();
        let mut t = RepeatTimer::default();
        t.start(now);
        t.stop();

        assert!(!t.is_armed());
        assert_eq!(t.poll(now + REPEAT_DELAY + REPEAT_INTERVAL), 0);
    }

    #[test]
    fn restart_discards_previous_deadline() {
        let now = Instant::now();
        let mut t = RepeatTimer::default();
        t.start(now);
        t.start(now + REPEAT_DELAY);

        assert_eq!(t.poll(now + REPEAT_DELAY), 0);
        assert_eq!(t.poll(now + 2 * REPEAT_DELAY), 1);
    }

    #[test]
    fn deferred_fires_once() {
        let now = Instant::now();
        let mut d = Deferred::default();
        d.schedule(now, SETTLE_DELAY);

        assert!(!d.poll(now));
        assert!(d.poll(now + SETTLE_DELAY));
        assert!(!d.poll(now + 2 * SETTLE_DELAY));
    }

    #[test]
    fn cancelled_deferred_never_fires() {
        let now = Instant::now();
        let mut d = Deferred::default();
        d.schedule(now, SETTLE_DELAY);
        d.cancel();
        assert!(!d.poll(now + SETTLE_DELAY));
    }
}
