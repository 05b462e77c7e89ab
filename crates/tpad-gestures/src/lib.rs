#![forbid(unsafe_code)]

//! Touchpad gestures: finger-count recognition for pointer motion and
//! two-finger scrolling.
//!
//! # Role in tpad
//! The device layer updates a [`ContactTable`](tpad_core::ContactTable) per
//! frame and hands this crate a [`DeviceState`](tpad_core::DeviceState)
//! snapshot. [`TouchpadGestures`] decides how many fingers are engaged,
//! debounces noisy count changes mid-gesture, and routes motion either to
//! pointer motion (one finger) or to finger-sourced scrolling (two fingers).
//!
//! # Frame flow
//!
//! ```text
//! contacts updated ─► handle_state ─► post_events ─► EventSink
//!                          │
//!                          └─ arms switch timer ─► finger_count_switch_timeout
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut gestures = TouchpadGestures::new(GestureConfig::default(), &mut timers)?;
//! // per frame
//! gestures.process_frame(now, &device, &mut filter, &mut sink, &mut timers);
//! // when the switch timer fires
//! gestures.on_timer(id, now, device.scroll_method, &mut sink);
//! ```

pub mod aggregate;
mod dispatch;
mod lifecycle;
pub mod machine;
pub mod state;
pub mod stats;

pub use aggregate::{Aggregation, average_touches_delta, combined_touches_delta, touches_delta};
pub use machine::{GestureError, SWITCH_TIMER_NAME, TouchpadGestures};
pub use state::{FingerMode, GesturePhase, GestureState};
pub use stats::GestureStats;

#[cfg(test)]
pub(crate) mod testutil {
    use tpad_core::{
        ButtonState, ContactTable, DeviceState, GestureConfig, LinearFilter, Point, PointerEvent,
        ScrollMethod, TimerError, TimerId, TimerService, Timestamp,
    };

    use crate::TouchpadGestures;

    pub(crate) fn ms(n: u64) -> Timestamp {
        Timestamp::from_millis(n)
    }

    /// Single-timer service that remembers the latest deadline.
    #[derive(Debug, Default)]
    pub(crate) struct FakeTimers {
        pub(crate) refuse: bool,
        pub(crate) registered: bool,
        pub(crate) deadline: Option<Timestamp>,
        pub(crate) sets: u32,
    }

    impl FakeTimers {
        pub(crate) fn refusing() -> Self {
            Self {
                refuse: true,
                ..Self::default()
            }
        }
    }

    impl TimerService for FakeTimers {
        fn register(&mut self, name: &'static str) -> Result<TimerId, TimerError> {
            if self.refuse {
                return Err(TimerError::Refused { name });
            }
            self.registered = true;
            Ok(TimerId::new(1))
        }

        fn set(&mut self, _id: TimerId, deadline: Timestamp) {
            self.deadline = Some(deadline);
            self.sets += 1;
        }

        fn cancel(&mut self, _id: TimerId) {
            self.deadline = None;
        }

        fn unregister(&mut self, _id: TimerId) {
            self.deadline = None;
            self.registered = false;
        }
    }

    /// Minimal device wrapper driving a `TouchpadGestures` frame by frame.
    pub(crate) struct Pad {
        pub(crate) touches: ContactTable,
        pub(crate) buttons: ButtonState,
        pub(crate) scroll_method: ScrollMethod,
        pub(crate) tap_dragging: bool,
        pub(crate) semi_mt: bool,
        pub(crate) filter: LinearFilter,
        pub(crate) events: Vec<PointerEvent>,
        pub(crate) timers: FakeTimers,
        pub(crate) gestures: TouchpadGestures,
    }

    impl Pad {
        pub(crate) fn new(slots: usize) -> Self {
            let mut timers = FakeTimers::default();
            let gestures = TouchpadGestures::new(GestureConfig::default(), &mut timers)
                .expect("fake timers register");
            Self {
                touches: ContactTable::new(slots),
                buttons: ButtonState::default(),
                scroll_method: ScrollMethod::TwoFinger,
                tap_dragging: false,
                semi_mt: false,
                filter: LinearFilter::new(1.0),
                events: Vec::new(),
                timers,
                gestures,
            }
        }

        /// Two fingers down at t=0, scrolled by (0, 5) at t=10.
        pub(crate) fn scrolling() -> Self {
            let mut pad = Self::new(4);
            pad.down(0, 0.0, 0.0);
            pad.down(1, 10.0, 0.0);
            pad.frame(ms(0));
            pad.move_to(0, 0.0, 5.0);
            pad.move_to(1, 10.0, 5.0);
            pad.frame(ms(10));
            assert!(pad.gestures.is_started());
            pad
        }

        pub(crate) fn down(&mut self, slot: usize, x: f64, y: f64) {
            self.touches
                .slot_mut(slot)
                .expect("slot exists")
                .begin(Point::new(x, y));
        }

        pub(crate) fn move_to(&mut self, slot: usize, x: f64, y: f64) {
            self.touches
                .slot_mut(slot)
                .expect("slot exists")
                .move_to(Point::new(x, y));
        }

        pub(crate) fn up(&mut self, slot: usize) {
            self.touches.slot_mut(slot).expect("slot exists").end();
        }

        pub(crate) fn frame(&mut self, now: Timestamp) {
            let device = DeviceState {
                touches: &self.touches,
                buttons: self.buttons,
                scroll_method: self.scroll_method,
                tap_dragging: self.tap_dragging,
                semi_mt: self.semi_mt,
            };
            self.gestures.process_frame(
                now,
                &device,
                &mut self.filter,
                &mut self.events,
                &mut self.timers,
            );
            self.touches.end_frame();
        }

        /// Deliver a switch-timer expiry, whether or not one is scheduled.
        pub(crate) fn expire(&mut self, now: Timestamp) {
            self.timers.deadline = None;
            self.gestures
                .finger_count_switch_timeout(now, self.scroll_method, &mut self.events);
        }

        pub(crate) fn scroll_stops(&self) -> usize {
            self.events.iter().filter(|e| e.is_scroll_stop()).count()
        }
    }
}
