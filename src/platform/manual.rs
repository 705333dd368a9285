//! Host-driven scheduler
//!
//! Keeps the timer period and an elapsed-time accumulator; the host feeds it
//! time and runs as many ticks as have come due. Used by the native binary
//! and by tests.

use super::Scheduler;

#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    period_ms: Option<u32>,
    accumulator_ms: u32,
    /// Total timers started
    pub starts: u32,
    /// Total timers cancelled
    pub cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.period_ms.is_some()
    }

    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    /// Feed elapsed time, returning how many ticks are due
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let Some(period) = self.period_ms else {
            return 0;
        };
        self.accumulator_ms += elapsed_ms;
        let due = self.accumulator_ms / period;
        self.accumulator_ms %= period;
        due
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, period_ms: u32) {
        if self.period_ms.is_some() {
            log::warn!("timer started while another was live, replacing it");
            self.cancels += 1;
        }
        self.period_ms = Some(period_ms);
        self.accumulator_ms = 0;
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.period_ms.take().is_some() {
            self.accumulator_ms = 0;
            self.cancels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut sched = ManualScheduler::new();
        assert_eq!(sched.advance(1000), 0);

        sched.start(100);
        assert_eq!(sched.advance(40), 0);
        assert_eq!(sched.advance(70), 1);
        assert_eq!(sched.advance(290), 3);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut sched = ManualScheduler::new();
        sched.start(50);
        sched.cancel();
        sched.cancel();
        assert_eq!(sched.cancels, 1);
        assert!(!sched.is_running());
        assert_eq!(sched.advance(500), 0);
    }
}
