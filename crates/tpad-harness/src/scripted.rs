#![forbid(unsafe_code)]

//! Scripted touchpad device.
//!
//! [`ScriptedTouchpad`] owns everything a real device context would: the
//! contact table, button and tap-drag state, a motion filter, a timer wheel,
//! an event log, and the gesture subsystem. Tests describe touches, then call
//! [`frame`](ScriptedTouchpad::frame) to run one frame at a given time.
//!
//! # Frame order
//!
//! 1. Fire every switch timer due at or before the frame time.
//! 2. Reconcile and dispatch (`process_frame`).
//! 3. Clear per-frame dirty flags.

use tpad_core::{
    ButtonState, ContactTable, DeviceState, LinearFilter, MotionFilter, NormalizedDelta, Point,
    PointerEvent, ScrollMethod, Timestamp, TouchpadConfig,
};
use tpad_gestures::{GestureError, TouchpadGestures};
use tracing::{debug_span, trace};

use crate::device::DeviceDescription;
use crate::event_log::EventLog;
use crate::timer_wheel::{GestureTimerTarget, TimerWheel};

const LOG_TARGET: &str = "tpad.harness";

/// A simulated touchpad driving a [`TouchpadGestures`] instance.
pub struct ScriptedTouchpad {
    description: DeviceDescription,
    touches: ContactTable,
    buttons: ButtonState,
    scroll_method: ScrollMethod,
    tap_dragging: bool,
    filter: Box<dyn MotionFilter>,
    timers: TimerWheel,
    events: EventLog,
    gestures: TouchpadGestures,
}

impl std::fmt::Debug for ScriptedTouchpad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTouchpad")
            .field("device", &self.description.name)
            .field("now", &self.timers.now())
            .field("active", &self.touches.active_count())
            .field("gestures", &self.gestures)
            .field("events", &self.events.len())
            .finish()
    }
}

impl ScriptedTouchpad {
    /// Set up a device with an identity-scale linear filter.
    pub fn new(description: DeviceDescription, config: &TouchpadConfig) -> Result<Self, GestureError> {
        Self::with_timers(description, config, TimerWheel::new())
    }

    /// Set up a device on a caller-provided timer wheel.
    pub fn with_timers(
        description: DeviceDescription,
        config: &TouchpadConfig,
        mut timers: TimerWheel,
    ) -> Result<Self, GestureError> {
        let gestures = TouchpadGestures::new(config.gesture.clone(), &mut timers)?;
        Ok(Self {
            touches: ContactTable::new(description.num_slots),
            buttons: ButtonState {
                is_clickpad: description.is_clickpad,
                pressed: false,
            },
            scroll_method: config.scroll_method,
            tap_dragging: false,
            filter: Box::new(LinearFilter::default()),
            timers,
            events: EventLog::new(),
            gestures,
            description,
        })
    }

    /// Tear the gesture subsystem down and hand back the timer wheel.
    #[must_use]
    pub fn remove(mut self) -> TimerWheel {
        self.gestures.remove(&mut self.timers);
        self.timers
    }

    // --- script ---

    /// Put a finger down in `slot`. Ignored if the slot does not exist.
    pub fn touch_down(&mut self, slot: usize, x: f64, y: f64) -> &mut Self {
        if let Some(t) = self.touches.slot_mut(slot) {
            t.begin(Point::new(x, y));
        }
        self
    }

    /// Move the finger in `slot` to a new position.
    pub fn touch_move(&mut self, slot: usize, x: f64, y: f64) -> &mut Self {
        if let Some(t) = self.touches.slot_mut(slot) {
            t.move_to(Point::new(x, y));
        }
        self
    }

    /// Move the finger in `slot` by a relative amount.
    pub fn touch_move_by(&mut self, slot: usize, dx: f64, dy: f64) -> &mut Self {
        if let Some(t) = self.touches.slot_mut(slot) {
            t.push_delta(NormalizedDelta::new(dx, dy));
        }
        self
    }

    /// Lift the finger in `slot`.
    pub fn touch_up(&mut self, slot: usize) -> &mut Self {
        if let Some(t) = self.touches.slot_mut(slot) {
            t.end();
        }
        self
    }

    pub fn press_button(&mut self) -> &mut Self {
        self.buttons.pressed = true;
        self
    }

    pub fn release_button(&mut self) -> &mut Self {
        self.buttons.pressed = false;
        self
    }

    pub fn set_tap_dragging(&mut self, dragging: bool) -> &mut Self {
        self.tap_dragging = dragging;
        self
    }

    pub fn set_scroll_method(&mut self, method: ScrollMethod) -> &mut Self {
        self.scroll_method = method;
        self
    }

    /// Replace the motion filter.
    pub fn set_filter(&mut self, filter: impl MotionFilter + 'static) -> &mut Self {
        self.filter = Box::new(filter);
        self
    }

    // --- time ---

    /// Run one frame at `now`.
    pub fn frame(&mut self, now: u64) -> &mut Self {
        let now = Timestamp::from_millis(now);
        let _span = debug_span!(target: LOG_TARGET, "frame", time = now.as_millis()).entered();

        self.fire_due(now);

        let device = DeviceState {
            touches: &self.touches,
            buttons: self.buttons,
            scroll_method: self.scroll_method,
            tap_dragging: self.tap_dragging,
            semi_mt: self.description.semi_mt,
        };
        self.gestures.process_frame(
            now,
            &device,
            &mut self.filter,
            &mut self.events,
            &mut self.timers,
        );
        self.touches.end_frame();
        self
    }

    /// Let time pass without a frame, firing any timers that come due.
    pub fn advance_to(&mut self, now: u64) -> &mut Self {
        self.fire_due(Timestamp::from_millis(now));
        self
    }

    fn fire_due(&mut self, now: Timestamp) {
        let mut target = GestureTimerTarget {
            gestures: &mut self.gestures,
            scroll_method: self.scroll_method,
            sink: &mut self.events,
        };
        let fired = self.timers.fire_due(now, &mut target);
        if fired > 0 {
            trace!(target: LOG_TARGET, time = now.as_millis(), fired, "timers fired");
        }
    }

    // --- inspection ---

    #[must_use]
    pub fn description(&self) -> &DeviceDescription {
        &self.description
    }

    #[must_use]
    pub fn gestures(&self) -> &TouchpadGestures {
        &self.gestures
    }

    #[must_use]
    pub fn timers(&self) -> &TimerWheel {
        &self.timers
    }

    #[must_use]
    pub fn touches(&self) -> &ContactTable {
        &self.touches
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.events
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[PointerEvent] {
        self.events.events()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn take_events(&mut self) -> Vec<PointerEvent> {
        self.events.drain()
    }

    /// Deadline of the switch timer, if armed.
    #[must_use]
    pub fn switch_deadline(&self) -> Option<Timestamp> {
        self.timers.deadline(self.gestures.switch_timer())
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.timers.now()
    }
}
