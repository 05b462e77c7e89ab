#![forbid(unsafe_code)]

//! Manual-clock timer service.
//!
//! [`TimerWheel`] stores at most one deadline per registered timer. Time only
//! moves when [`fire_due`](TimerWheel::fire_due) is called, which delivers
//! every expiry at or before the new clock value to a [`TimerTarget`], earliest
//! deadline first (ties broken by timer id).
//!
//! # Invariants
//!
//! 1. `set` replaces a timer's deadline; it never stacks.
//! 2. A timer is disarmed before its target runs, so a handler may re-arm it.
//! 3. The clock never moves backwards.

use tpad_core::{EventSink, ScrollMethod, TimerError, TimerId, TimerService, Timestamp};
use tpad_gestures::TouchpadGestures;
use tracing::trace;

/// Default number of timers a wheel accepts.
pub const DEFAULT_CAPACITY: usize = 16;

/// Receiver of timer expiries.
pub trait TimerTarget {
    fn on_timer(&mut self, id: TimerId, now: Timestamp);
}

/// Routes expiries to a gesture subsystem, with the collaborators its
/// timeout handler needs.
pub struct GestureTimerTarget<'a, S: EventSink> {
    pub gestures: &'a mut TouchpadGestures,
    pub scroll_method: ScrollMethod,
    pub sink: &'a mut S,
}

impl<S: EventSink> TimerTarget for GestureTimerTarget<'_, S> {
    fn on_timer(&mut self, id: TimerId, now: Timestamp) {
        self.gestures
            .on_timer(id, now, self.scroll_method, &mut *self.sink);
    }
}

#[derive(Debug, Clone)]
struct Slot {
    name: &'static str,
    deadline: Option<Timestamp>,
}

/// Deterministic timer service.
#[derive(Debug, Clone)]
pub struct TimerWheel {
    slots: Vec<Option<Slot>>,
    capacity: usize,
    now: Timestamp,
    fired: Vec<(TimerId, Timestamp)>,
}

impl Default for TimerWheel {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TimerWheel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wheel that refuses registrations beyond `capacity` live timers.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            now: Timestamp::ZERO,
            fired: Vec::new(),
        }
    }

    /// Current clock value.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Deadline of `id`, if armed.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Timestamp> {
        self.slot(id).and_then(|s| s.deadline)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn is_registered(&self, id: TimerId) -> bool {
        self.slot(id).is_some()
    }

    /// Diagnostic name of `id`.
    #[must_use]
    pub fn name(&self, id: TimerId) -> Option<&'static str> {
        self.slot(id).map(|s| s.name)
    }

    /// Number of armed timers.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.deadline.is_some())
            .count()
    }

    /// Earliest armed deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.slots.iter().flatten().filter_map(|s| s.deadline).min()
    }

    /// Every expiry delivered so far, as `(timer, clock at delivery)`.
    #[must_use]
    pub fn fired(&self) -> &[(TimerId, Timestamp)] {
        &self.fired
    }

    /// Advance the clock to `now` and deliver every due expiry to `target`.
    ///
    /// Returns the number of expiries delivered.
    pub fn fire_due(&mut self, now: Timestamp, target: &mut impl TimerTarget) -> usize {
        self.now = self.now.max(now);
        let mut delivered = 0;

        while let Some(id) = self.earliest_due() {
            if let Some(slot) = self.slot_mut(id) {
                slot.deadline = None;
            }
            trace!(target: "tpad.harness", timer = %id, now = self.now.as_millis(), "timer expired");
            self.fired.push((id, self.now));
            target.on_timer(id, self.now);
            delivered += 1;
        }

        delivered
    }

    fn earliest_due(&self) -> Option<TimerId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let deadline = s.as_ref()?.deadline?;
                (deadline <= self.now).then_some((deadline, i))
            })
            .min()
            .map(|(_, i)| TimerId::new(i as u32))
    }

    fn slot(&self, id: TimerId) -> Option<&Slot> {
        self.slots.get(id.raw() as usize)?.as_ref()
    }

    fn slot_mut(&mut self, id: TimerId) -> Option<&mut Slot> {
        self.slots.get_mut(id.raw() as usize)?.as_mut()
    }
}

impl TimerService for TimerWheel {
    fn register(&mut self, name: &'static str) -> Result<TimerId, TimerError> {
        let slot = Some(Slot {
            name,
            deadline: None,
        });
        if let Some(i) = self.slots.iter().position(Option::is_none) {
            self.slots[i] = slot;
            return Ok(TimerId::new(i as u32));
        }
        if self.slots.len() >= self.capacity {
            return Err(TimerError::CapacityExhausted {
                capacity: self.capacity,
            });
        }
        self.slots.push(slot);
        Ok(TimerId::new((self.slots.len() - 1) as u32))
    }

    fn set(&mut self, id: TimerId, deadline: Timestamp) {
        if let Some(slot) = self.slot_mut(id) {
            slot.deadline = Some(deadline);
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.deadline = None;
        }
    }

    fn unregister(&mut self, id: TimerId) {
        if let Some(entry) = self.slots.get_mut(id.raw() as usize) {
            *entry = None;
        }
    }
}
