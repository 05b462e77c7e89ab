#![forbid(unsafe_code)]

//! Mode dispatch: turn the recognized mode into output events.
//!
//! Dispatch always runs for the *current* mode, which is either the mode this
//! frame switched to immediately or the old mode while a switch is pending.
//! While a switch is pending nothing is posted at all.

use tpad_core::{AxisSource, DeviceState, EventSink, MotionFilter, Timestamp};
use tracing::debug;

use crate::aggregate::{Aggregation, touches_delta};
use crate::machine::{LOG_TARGET, TouchpadGestures};
use crate::state::FingerMode;

impl TouchpadGestures {
    /// Post output for the recognized mode.
    ///
    /// Call once per frame, after [`handle_state`](Self::handle_state).
    pub fn post_events(
        &mut self,
        now: Timestamp,
        device: &DeviceState<'_>,
        filter: &mut impl MotionFilter,
        sink: &mut impl EventSink,
    ) {
        if self.state.mode().is_none() {
            return;
        }

        // Dragging or clicking is never a two-finger gesture.
        if device.forces_single_finger() {
            self.stop(now, device.scroll_method, sink);
            if self.state.finger_count() != 1 || self.state.pending.is_some() {
                debug!(
                    target: LOG_TARGET,
                    time = now.as_millis(),
                    from = self.state.finger_count(),
                    tap_dragging = device.tap_dragging,
                    "forcing single-finger mode"
                );
            }
            self.state.switch_to(1);
            self.stats.forced_single_finger += 1;
        }

        if self.state.pending.is_some() {
            self.stats.suppressed_frames += 1;
            return;
        }

        match self.state.mode() {
            Some(FingerMode::Pointer) => self.post_pointer_motion(now, device, filter, sink),
            Some(FingerMode::TwoFingerScroll) => {
                self.post_twofinger_scroll(now, device, filter, sink);
            }
            Some(FingerMode::Unbound(_)) | None => {}
        }
    }

    fn post_pointer_motion(
        &mut self,
        now: Timestamp,
        device: &DeviceState<'_>,
        filter: &mut impl MotionFilter,
        sink: &mut impl EventSink,
    ) {
        // A clicked clickpad combines the motion of every touch.
        let aggregation = if device.buttons.clickpad_pressed() {
            Aggregation::Combined
        } else {
            Aggregation::Averaged
        };
        let unaccel = touches_delta(device.touches, aggregation);
        let delta = filter.filter(unaccel, now);

        if !delta.is_zero() || !unaccel.is_zero() {
            sink.notify_motion(now, delta, unaccel);
        }
    }

    fn post_twofinger_scroll(
        &mut self,
        now: Timestamp,
        device: &DeviceState<'_>,
        filter: &mut impl MotionFilter,
        sink: &mut impl EventSink,
    ) {
        if !device.two_finger_scroll() {
            return;
        }

        // Semi-mt hardware: slot 0 is the only reliable slot.
        let raw = if device.semi_mt {
            match device.touches.slot(0) {
                Some(t) if t.is_dirty() => t.delta(),
                _ => return,
            }
        } else {
            touches_delta(device.touches, Aggregation::Averaged)
        };

        let delta = filter.filter(raw, now);
        if delta.is_zero() {
            return;
        }

        self.start(now);
        sink.post_scroll(now, AxisSource::Finger, delta);
    }
}
