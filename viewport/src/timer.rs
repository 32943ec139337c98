//! Cancellable timers over a caller-supplied millisecond clock.
//!
//! Nothing here sleeps. The host owns real time: it asks for the next deadline, arranges
//! to be woken then, and polls with the current time. Each trigger source gets one slot,
//! and re-arming a slot cancels whatever was pending in it.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// A single pending-deadline slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerSlot {
    deadline: Option<f64>,
}

impl TimerSlot {
    /// Schedule to fire `delay_ms` after `now_ms`, replacing any pending deadline.
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) -> f64 {
        let at = now_ms + delay_ms;
        self.deadline = Some(at);
        at
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and return true if the deadline has passed.
    pub fn take_due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(at) if now_ms >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Collapses a burst of values into the latest one, released after a quiet window.
#[derive(Debug, Clone, Default)]
pub struct Debouncer<T> {
    slot: TimerSlot,
    delay_ms: f64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self { slot: TimerSlot::default(), delay_ms, pending: None }
    }

    /// Replace the pending value and restart the window. Returns the new deadline.
    pub fn push(&mut self, now_ms: f64, value: T) -> f64 {
        self.pending = Some(value);
        self.slot.arm(now_ms, self.delay_ms)
    }

    /// Release the pending value once its window has elapsed.
    pub fn take_due(&mut self, now_ms: f64) -> Option<T> {
        if self.slot.take_due(now_ms) { self.pending.take() } else { None }
    }

    /// Keep the pending value but stop the clock; [`Self::rearm`] restarts it.
    pub fn hold(&mut self) {
        self.slot.cancel();
    }

    /// Restart a full window for a held value. Returns the deadline, if a value is held.
    pub fn rearm(&mut self, now_ms: f64) -> Option<f64> {
        if self.pending.is_none() {
            return None;
        }
        Some(self.slot.arm(now_ms, self.delay_ms))
    }

    /// True when a value is waiting, whether or not its clock is running.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.slot.deadline()
    }

    pub fn cancel(&mut self) {
        self.slot.cancel();
        self.pending = None;
    }
}
