//! Cancellable fixed-period tick gate
//!
//! The host calls `poll` whenever it gets a chance (interval callback, frame
//! callback, test loop). A tick fires at most once per poll; whole periods
//! that were missed are absorbed rather than replayed. An optional tolerance
//! lets a host timer that wakes slightly early still land its tick.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Hand-driven clock shared between a session and its driver
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    period_ms: f64,
    tolerance_ms: f64,
    next_due: Option<f64>,
}

impl Scheduler {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1) as f64,
            tolerance_ms: 0.0,
            next_due: None,
        }
    }

    /// Accept polls up to `ms` before the due time, capped at half a period
    pub fn with_tolerance(mut self, ms: f64) -> Self {
        self.tolerance_ms = ms.clamp(0.0, self.period_ms * 0.5);
        self
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Arm the schedule; first tick one period from `now_ms`. No-op if armed.
    pub fn start(&mut self, now_ms: f64) {
        if self.next_due.is_none() {
            self.next_due = Some(now_ms + self.period_ms);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true if a tick is due, and schedules the next one
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now_ms + self.tolerance_ms < due {
            return false;
        }

        let next = due + self.period_ms;
        self.next_due = Some(if next <= now_ms {
            now_ms + self.period_ms
        } else {
            next
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let clock = ManualClock::new(0.0);
        let mut s = Scheduler::new(100);
        s.start(clock.now_ms());

        let mut fired = 0;
        for _ in 0..50 {
            clock.advance(20.0);
            if s.poll(clock.now_ms()) {
                fired += 1;
            }
        }
        // 1000 ms of 20 ms polls
        assert_eq!(fired, 10);
    }

    #[test]
    fn test_keeps_cadence_with_late_polls() {
        let mut s = Scheduler::new(100);
        s.start(0.0);
        assert!(s.poll(130.0));
        // Next due stays on the 100 ms grid
        assert!(!s.poll(199.0));
        assert!(s.poll(200.0));
    }

    #[test]
    fn test_tolerance_accepts_early_wakeups() {
        let mut s = Scheduler::new(100).with_tolerance(25.0);
        s.start(0.0);
        // Host interval woke 1 ms early
        assert!(s.poll(99.0));
        assert!(!s.poll(150.0));
        // Grid is not shifted by the early tick
        assert!(s.poll(180.0));
        assert!(!s.poll(200.0));
        assert!(s.poll(300.0));

        let mut strict = Scheduler::new(100);
        strict.start(0.0);
        assert!(!strict.poll(99.0));
    }

    #[test]
    fn test_tolerance_is_capped() {
        let mut s = Scheduler::new(100).with_tolerance(1000.0);
        s.start(0.0);
        assert!(!s.poll(49.0));
        assert!(s.poll(50.0));
    }

    #[test]
    fn test_missed_ticks_absorbed() {
        let mut s = Scheduler::new(100);
        s.start(0.0);
        assert!(s.poll(1050.0));
        assert!(!s.poll(1100.0));
        assert!(s.poll(1150.0));
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut s = Scheduler::new(100);
        assert!(!s.is_active());
        assert!(!s.poll(1000.0));

        s.start(0.0);
        assert!(s.is_active());
        s.cancel();
        assert!(!s.is_active());
        assert!(!s.poll(1000.0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut s = Scheduler::new(100);
        s.start(0.0);
        s.start(90.0);
        assert!(s.poll(100.0));
    }

    #[test]
    fn test_clock_clones_share_time() {
        let clock = ManualClock::new(5.0);
        let view = clock.clone();
        clock.advance(10.0);
        assert_eq!(view.now_ms(), 15.0);
        clock.set(1.0);
        assert_eq!(view.now_ms(), 1.0);
    }
}
