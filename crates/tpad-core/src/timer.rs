#![forbid(unsafe_code)]

//! Timer service seam.
//!
//! A [`TimerService`] hands out [`TimerId`] handles at registration time and
//! then accepts one absolute deadline per handle. Setting a deadline replaces
//! whatever was scheduled before; cancelling is idempotent. When a deadline
//! passes, the event loop routes the expiry back to whoever owns the handle,
//! which keeps the handler typed instead of going through an opaque pointer.

use std::fmt;

use crate::time::Timestamp;

/// Handle to a registered timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u32);

impl TimerId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Errors raised by a timer service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// No more timers can be registered.
    #[error("timer capacity exhausted ({capacity} registered)")]
    CapacityExhausted { capacity: usize },
    /// The service declined the registration.
    #[error("timer service refused to register {name:?}")]
    Refused { name: &'static str },
}

/// Schedules one-shot deadlines on behalf of a device.
pub trait TimerService {
    /// Register a new timer. `name` is used for diagnostics only.
    fn register(&mut self, name: &'static str) -> Result<TimerId, TimerError>;

    /// Schedule `id` to expire at `deadline`, replacing any earlier schedule.
    fn set(&mut self, id: TimerId, deadline: Timestamp);

    /// Cancel any pending expiry for `id`. No-op if nothing is pending.
    fn cancel(&mut self, id: TimerId);

    /// Release a timer. Any pending expiry is dropped.
    fn unregister(&mut self, id: TimerId);
}

impl<T: TimerService + ?Sized> TimerService for &mut T {
    fn register(&mut self, name: &'static str) -> Result<TimerId, TimerError> {
        (**self).register(name)
    }

    fn set(&mut self, id: TimerId, deadline: Timestamp) {
        (**self).set(id, deadline);
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id);
    }

    fn unregister(&mut self, id: TimerId) {
        (**self).unregister(id);
    }
}
