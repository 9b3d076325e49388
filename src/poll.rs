//! Fixed-interval polling until a device reports a terminal condition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Terminal conditions of one wait. Exactly one is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Ready,
    Overflow,
    Removed,
}

/// What one probe observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    Pending,
    Done(PollOutcome),
}

/// Sleep-based wait on a device flag. The probe runs before the first sleep,
/// so a condition that already holds is observed without waiting, and no
/// wait extends past one interval after the condition becomes true.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
    ceiling: Option<Duration>,
}

impl Default for Poller {
    fn default() -> Self {
        Poller {
            interval: Duration::from_millis(10),
            ceiling: None,
        }
    }
}

impl Poller {
    pub fn new() -> Poller {
        Poller::default()
    }

    pub fn interval(mut self, interval: Duration) -> Poller {
        self.interval = interval;
        self
    }

    /// Bound the wait. Without a ceiling the wait runs until a terminal
    /// condition, which is the behavior the device's own trigger timeout is
    /// expected to bound.
    pub fn ceiling(mut self, ceiling: Duration) -> Poller {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn run<F>(&self, mut probe: F) -> Result<PollOutcome>
    where
        F: FnMut() -> Result<PollStep>,
    {
        let started = Instant::now();
        loop {
            if let PollStep::Done(outcome) = probe()? {
                return Ok(outcome);
            }
            if let Some(ceiling) = self.ceiling {
                if started.elapsed() >= ceiling {
                    return Err(Error::TimedOut);
                }
            }
            sleep(self.interval);
        }
    }

    /// Like `run`, but gives up with `Error::Cancelled` once `cancelled`
    /// becomes true.
    pub fn run_cancellable<F>(&self, mut probe: F, cancelled: &AtomicBool) -> Result<PollOutcome>
    where
        F: FnMut() -> Result<PollStep>,
    {
        self.run(|| {
            if cancelled.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
            probe()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_immediate_condition_returns_without_sleeping() {
        let poller = Poller::new().interval(Duration::from_secs(60));
        let started = Instant::now();
        let outcome = poller.run(|| Ok(PollStep::Done(PollOutcome::Ready))).unwrap();
        assert_eq!(outcome, PollOutcome::Ready);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_pending_then_done() {
        let poller = Poller::new().interval(Duration::from_millis(1));
        let mut polls = 0;
        let outcome = poller
            .run(|| {
                polls += 1;
                Ok(if polls < 4 {
                    PollStep::Pending
                } else {
                    PollStep::Done(PollOutcome::Overflow)
                })
            })
            .unwrap();
        assert_eq!(outcome, PollOutcome::Overflow);
        assert_eq!(polls, 4);
    }

    #[test]
    fn test_ceiling_expires() {
        let poller = Poller::new()
            .interval(Duration::from_millis(1))
            .ceiling(Duration::from_millis(5));
        let result = poller.run(|| Ok(PollStep::Pending));
        assert!(matches!(result, Err(Error::TimedOut)));
    }

    #[test]
    fn test_probe_error_propagates() {
        let poller = Poller::new();
        let result = poller.run(|| -> Result<PollStep> { Err(Error::DeviceGone) });
        assert!(matches!(result, Err(Error::DeviceGone)));
    }

    #[test]
    fn test_cancellation() {
        let poller = Poller::new().interval(Duration::from_millis(1));
        let cancelled = AtomicBool::new(false);
        let mut polls = 0;
        let result = poller.run_cancellable(
            || {
                polls += 1;
                if polls == 3 {
                    cancelled.store(true, Ordering::Relaxed);
                }
                Ok(PollStep::Pending)
            },
            &cancelled,
        );
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
