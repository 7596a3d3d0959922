//! Cancelable deadline timers driven by the UI loop tick

use std::time::{Duration, Instant};

/// A one-shot timer that fires once its deadline has passed.
///
/// The timer never runs on its own: the owner calls [`DeadlineTimer::fire_if_due`]
/// from the loop tick with the current instant. Rescheduling always cancels the
/// previous deadline first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    /// Create a timer already armed for `now + delay`
    pub fn armed(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: Some(now + delay),
        }
    }

    /// Cancel any pending deadline and arm a new one at `now + delay`
    pub fn reschedule(&mut self, now: Instant, delay: Duration) {
        self.cancel();
        self.deadline = Some(now + delay);
    }

    /// Disarm the timer. Returns true if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending
    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed. Fires at most once per schedule.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_default_is_disarmed() {
        let mut timer = DeadlineTimer::default();
        assert!(!timer.is_armed());
        assert!(!timer.fire_if_due(Instant::now()));
    }

    #[test]
    fn test_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::armed(start, DELAY);

        assert!(!timer.fire_if_due(start + Duration::from_millis(499)));
        assert!(timer.fire_if_due(start + DELAY));
        assert!(!timer.fire_if_due(start + DELAY * 2));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_reschedule_replaces_pending_deadline() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::armed(start, DELAY);

        let later = start + Duration::from_millis(400);
        timer.reschedule(later, DELAY);

        // The original deadline no longer fires
        assert!(!timer.fire_if_due(start + DELAY));
        assert!(timer.fire_if_due(later + DELAY));
    }

    #[test]
    fn test_cancel_reports_pending_state() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::armed(start, DELAY);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.fire_if_due(start + DELAY));
    }
}
