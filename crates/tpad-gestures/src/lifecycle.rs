#![forbid(unsafe_code)]

//! Gesture start/stop.
//!
//! `start` opens the output channel of the recognized mode; `stop` closes it.
//! Only two-finger scrolling has per-mode teardown: an open scroll sequence
//! must be ended with a scroll-stop so clients can run kinetic scrolling.

use tpad_core::{AxisSource, EventSink, ScrollMethod, Timestamp};
use tracing::trace;

use crate::machine::{LOG_TARGET, TouchpadGestures};
use crate::state::{FingerMode, GesturePhase};

impl TouchpadGestures {
    /// Open the current mode's output channel. No-op if already open or idle.
    pub(crate) fn start(&mut self, now: Timestamp) {
        match self.state.phase {
            GesturePhase::Ready(mode) => {
                // Two-finger scroll opens implicitly with its first event.
                self.state.phase = GesturePhase::Active(mode);
                trace!(target: LOG_TARGET, time = now.as_millis(), %mode, "gesture started");
            }
            GesturePhase::Active(_) => {}
            GesturePhase::Idle => {
                trace!(target: LOG_TARGET, time = now.as_millis(), "start ignored while idle");
            }
        }
    }

    /// Close the current gesture, ending any open scroll sequence.
    ///
    /// No-op if no gesture is started. The recognized mode is kept.
    pub fn stop(&mut self, now: Timestamp, scroll_method: ScrollMethod, sink: &mut impl EventSink) {
        let GesturePhase::Active(mode) = self.state.phase else {
            return;
        };

        if mode == FingerMode::TwoFingerScroll {
            self.stop_twofinger_scroll(now, scroll_method, sink);
        }
        self.state.close();
        trace!(target: LOG_TARGET, time = now.as_millis(), %mode, "gesture stopped");
    }

    /// End a two-finger scroll sequence, regardless of gesture phase.
    ///
    /// Emits nothing unless two-finger scrolling is the configured method,
    /// since no scroll sequence could have been opened otherwise.
    pub fn stop_twofinger_scroll(
        &mut self,
        now: Timestamp,
        scroll_method: ScrollMethod,
        sink: &mut impl EventSink,
    ) {
        if scroll_method != ScrollMethod::TwoFinger {
            return;
        }
        sink.stop_scroll(now, AxisSource::Finger);
        self.stats.scroll_stops += 1;
    }
}
