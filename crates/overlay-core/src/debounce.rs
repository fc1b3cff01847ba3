//! Trailing-edge debounce: a timer deadline plus a last-value slot.
//!
//! The primitive is clock-agnostic. Callers pass `now` explicitly, and the
//! front-end arms a platform timer for [`Debouncer::deadline`] after every
//! [`Debouncer::push`]. When the timer fires it calls [`Debouncer::poll`].
//! A burst of pushes collapses into one delivery of the newest value.

use instant::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace the pending value and restart the quiet window from `now`.
    /// Returns the new deadline.
    pub fn push(&mut self, value: T, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.pending = Some(Pending { value, deadline });
        deadline
    }

    /// Take the pending value if its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Deadline of the pending value, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Time left until the pending value is due, saturating at zero.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|d| if d > now { d - now } else { Duration::ZERO })
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value without waiting out the window.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns true if something was discarded.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
