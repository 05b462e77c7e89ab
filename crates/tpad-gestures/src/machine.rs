#![forbid(unsafe_code)]

//! Finger-count reconciliation and the debounce timer.
//!
//! [`TouchpadGestures`] is the per-device gesture subsystem. It has exactly
//! three entry points that mutate state, all called from the device's event
//! thread:
//!
//! - [`handle_state`](TouchpadGestures::handle_state): reconcile the observed
//!   contact count with the recognized mode, once per frame.
//! - [`post_events`](TouchpadGestures::post_events): emit output for the
//!   recognized mode, once per frame, always after `handle_state`.
//! - [`finger_count_switch_timeout`](TouchpadGestures::finger_count_switch_timeout):
//!   commit a debounced switch when the switch timer expires.
//!
//! # Switch policy
//!
//! Evaluated in order, with `n` the number of contacts down:
//!
//! 1. `n` equals the recognized count: drop any pending switch.
//! 2. `n == 0`: stop the gesture and go idle immediately.
//! 3. The gesture has not started: switch to `n` immediately.
//! 4. Otherwise, if `n` differs from the pending count: make `n` pending and
//!    arm the switch timer. Seeing the same pending count again does not
//!    re-arm, so a persistent change expires one timeout after it first
//!    appeared.
//!
//! # Invariants
//!
//! 1. A started gesture always has a non-zero finger count.
//! 2. The pending count is never zero and never equal to the recognized count.
//! 3. A debounced switch always stops the old gesture before the new count
//!    becomes visible to the dispatcher.
//! 4. At most one switch deadline is scheduled per instance.

use tpad_core::{
    DeviceState, EventSink, GestureConfig, ScrollMethod, Timestamp, TimerError, TimerId,
    TimerService,
};
use tracing::{debug, trace};

use crate::state::{FingerMode, GesturePhase, GestureState};
use crate::stats::GestureStats;

pub(crate) const LOG_TARGET: &str = "tpad.gesture";

/// Name under which the switch timer is registered.
pub const SWITCH_TIMER_NAME: &str = "gesture-finger-count-switch";

/// Errors raised while setting up the gesture subsystem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    /// The finger-count switch timer could not be registered.
    #[error("failed to register the finger-count switch timer: {0}")]
    TimerRegistration(#[from] TimerError),
}

/// Gesture subsystem for one touchpad.
pub struct TouchpadGestures {
    pub(crate) config: GestureConfig,
    pub(crate) state: GestureState,
    pub(crate) switch_timer: TimerId,
    pub(crate) stats: GestureStats,
}

impl std::fmt::Debug for TouchpadGestures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchpadGestures")
            .field("phase", &self.state.phase())
            .field("pending", &self.state.pending())
            .field("switch_timer", &self.switch_timer)
            .finish()
    }
}

impl TouchpadGestures {
    /// Initialize the subsystem, registering its switch timer.
    ///
    /// Device setup should be aborted if this fails.
    pub fn new(
        config: GestureConfig,
        timers: &mut impl TimerService,
    ) -> Result<Self, GestureError> {
        let switch_timer = timers.register(SWITCH_TIMER_NAME)?;
        debug!(
            target: LOG_TARGET,
            timer = %switch_timer,
            timeout_ms = u64::try_from(config.switch_timeout.as_millis()).unwrap_or(u64::MAX),
            "gesture subsystem initialized"
        );
        Ok(Self {
            config,
            state: GestureState::default(),
            switch_timer,
            stats: GestureStats::default(),
        })
    }

    /// Tear the subsystem down, cancelling any pending switch.
    pub fn remove(self, timers: &mut impl TimerService) {
        timers.cancel(self.switch_timer);
        timers.unregister(self.switch_timer);
        debug!(target: LOG_TARGET, timer = %self.switch_timer, "gesture subsystem removed");
    }

    /// Reconcile the number of contacts down with the recognized mode.
    ///
    /// Call once per frame after the contact table was updated and before
    /// [`post_events`](Self::post_events).
    pub fn handle_state(
        &mut self,
        now: Timestamp,
        device: &DeviceState<'_>,
        sink: &mut impl EventSink,
        timers: &mut impl TimerService,
    ) {
        let active_touches = device.touches.active_count();
        let finger_count = self.state.finger_count();

        #[cfg(feature = "frame-trace")]
        trace!(
            target: LOG_TARGET,
            time = now.as_millis(),
            active_touches,
            finger_count,
            pending = ?self.state.finger_count_pending(),
            "reconcile"
        );

        if active_touches == finger_count {
            if self.state.pending.take().is_some() {
                timers.cancel(self.switch_timer);
                self.stats.debounce_cancelled += 1;
                debug!(
                    target: LOG_TARGET,
                    time = now.as_millis(),
                    finger_count,
                    "finger count reverted, pending switch dropped"
                );
            }
            return;
        }

        if active_touches == 0 {
            // All fingers lifted: end the gesture without debouncing.
            self.stop(now, device.scroll_method, sink);
            self.drop_pending(timers);
            self.state.switch_to(0);
            self.stats.lift_offs += 1;
            debug!(target: LOG_TARGET, time = now.as_millis(), from = finger_count, "all touches lifted");
        } else if !self.state.is_started() {
            // Nothing is open yet, so switch now and avoid start-up latency.
            self.drop_pending(timers);
            self.state.switch_to(active_touches);
            self.stats.immediate_switches += 1;
            debug!(
                target: LOG_TARGET,
                time = now.as_millis(),
                from = finger_count,
                to = active_touches,
                "immediate finger count switch"
            );
        } else if self.state.finger_count_pending() != Some(active_touches) {
            self.state.pending = FingerMode::from_count(active_touches);
            let deadline = now + self.config.switch_timeout;
            timers.set(self.switch_timer, deadline);
            self.stats.debounce_armed += 1;
            debug!(
                target: LOG_TARGET,
                time = now.as_millis(),
                from = finger_count,
                pending = active_touches,
                deadline = deadline.as_millis(),
                "finger count switch pending"
            );
        }
    }

    /// Commit a pending switch. Called when the switch timer expires.
    ///
    /// A no-op if the pending switch was already resolved by a later frame.
    pub fn finger_count_switch_timeout(
        &mut self,
        now: Timestamp,
        scroll_method: ScrollMethod,
        sink: &mut impl EventSink,
    ) {
        let Some(pending) = self.state.pending else {
            trace!(target: LOG_TARGET, time = now.as_millis(), "switch timer fired with nothing pending");
            return;
        };

        let from = self.state.finger_count();
        self.stop(now, scroll_method, sink);
        self.state.switch_to(pending.fingers());
        self.stats.debounced_switches += 1;
        debug!(
            target: LOG_TARGET,
            time = now.as_millis(),
            from,
            to = pending.fingers(),
            "debounced finger count switch"
        );
    }

    /// Route a timer expiry. Returns `false` if `id` is not this subsystem's
    /// timer.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        now: Timestamp,
        scroll_method: ScrollMethod,
        sink: &mut impl EventSink,
    ) -> bool {
        if id != self.switch_timer {
            return false;
        }
        self.finger_count_switch_timeout(now, scroll_method, sink);
        true
    }

    /// Run one full frame: reconciliation, then dispatch.
    pub fn process_frame(
        &mut self,
        now: Timestamp,
        device: &DeviceState<'_>,
        filter: &mut impl tpad_core::MotionFilter,
        sink: &mut impl EventSink,
        timers: &mut impl TimerService,
    ) {
        self.handle_state(now, device, sink, timers);
        self.post_events(now, device, filter, sink);
    }

    /// Stop any gesture and return to idle, as if every finger lifted.
    pub fn reset(
        &mut self,
        now: Timestamp,
        scroll_method: ScrollMethod,
        sink: &mut impl EventSink,
        timers: &mut impl TimerService,
    ) {
        self.stop(now, scroll_method, sink);
        self.drop_pending(timers);
        self.state.switch_to(0);
    }

    fn drop_pending(&mut self, timers: &mut impl TimerService) {
        if self.state.pending.take().is_some() {
            timers.cancel(self.switch_timer);
            self.stats.debounce_cancelled += 1;
        }
    }

    // --- accessors ---

    /// Full gesture state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    /// Recognized mode, if any.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Option<FingerMode> {
        self.state.mode()
    }

    /// Recognized finger count (0 when idle).
    #[inline]
    #[must_use]
    pub fn finger_count(&self) -> u32 {
        self.state.finger_count()
    }

    /// Finger count awaiting debounce, if any.
    #[inline]
    #[must_use]
    pub fn finger_count_pending(&self) -> Option<u32> {
        self.state.finger_count_pending()
    }

    /// Whether a gesture's output channel is open.
    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    /// Handle of the switch timer.
    #[inline]
    #[must_use]
    pub fn switch_timer(&self) -> TimerId {
        self.switch_timer
    }

    /// Counters accumulated since initialization.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &GestureStats {
        &self.stats
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next armed switch.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeTimers, Pad, ms};
    use tpad_core::PointerEvent;

    #[test]
    fn registration_failure_is_reported() {
        let mut timers = FakeTimers::refusing();
        let err = TouchpadGestures::new(GestureConfig::default(), &mut timers).unwrap_err();
        assert!(matches!(err, GestureError::TimerRegistration(_)));
        assert!(err.to_string().contains("switch timer"));
    }

    #[test]
    fn remove_cancels_and_unregisters() {
        let mut pad = Pad::new(4);
        pad.down(0, 0.0, 0.0);
        pad.frame(ms(0));
        pad.down(1, 10.0, 0.0);
        pad.gestures.state.phase = GesturePhase::Active(FingerMode::Pointer);
        pad.frame(ms(10));
        assert!(pad.timers.deadline.is_some());

        let Pad {
            gestures,
            mut timers,
            ..
        } = pad;
        gestures.remove(&mut timers);
        assert!(timers.deadline.is_none());
        assert!(!timers.registered);
    }

    #[test]
    fn immediate_switch_before_start() {
        let mut pad = Pad::new(4);
        pad.down(0, 0.0, 0.0);
        pad.down(1, 10.0, 0.0);
        pad.frame(ms(0));
        assert_eq!(pad.gestures.finger_count(), 2);
        assert_eq!(pad.gestures.finger_count_pending(), None);
        assert!(pad.timers.deadline.is_none());
        assert_eq!(pad.gestures.stats().immediate_switches, 1);
    }

    #[test]
    fn lift_off_resets_immediately() {
        let mut pad = Pad::new(4);
        pad.down(0, 0.0, 0.0);
        pad.down(1, 10.0, 0.0);
        pad.frame(ms(0));
        pad.move_to(0, 0.0, 5.0);
        pad.move_to(1, 10.0, 5.0);
        pad.frame(ms(10));
        assert!(pad.gestures.is_started());

        pad.up(0);
        pad.up(1);
        pad.frame(ms(20));
        assert_eq!(pad.gestures.finger_count(), 0);
        assert!(!pad.gestures.is_started());
        assert_eq!(pad.gestures.phase(), GesturePhase::Idle);
        assert_eq!(pad.scroll_stops(), 1);
    }

    #[test]
    fn lift_off_while_pending_drops_pending() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        assert_eq!(pad.gestures.finger_count_pending(), Some(1));

        pad.up(0);
        pad.frame(ms(40));
        assert_eq!(pad.gestures.finger_count(), 0);
        assert_eq!(pad.gestures.finger_count_pending(), None);
        assert!(pad.timers.deadline.is_none());
    }

    #[test]
    fn debounce_arms_timer_mid_gesture() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        assert_eq!(pad.gestures.finger_count(), 2);
        assert_eq!(pad.gestures.finger_count_pending(), Some(1));
        assert_eq!(pad.timers.deadline, Some(ms(130)));
    }

    #[test]
    fn same_pending_does_not_rearm() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        pad.move_to(0, 0.0, 20.0);
        pad.frame(ms(60));
        pad.frame(ms(90));
        assert_eq!(pad.timers.deadline, Some(ms(130)));
        assert_eq!(pad.timers.sets, 1);
        assert_eq!(pad.gestures.stats().debounce_armed, 1);
    }

    #[test]
    fn different_pending_rearms() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        pad.down(1, 5.0, 5.0);
        pad.down(2, 9.0, 9.0);
        pad.frame(ms(50));
        assert_eq!(pad.gestures.finger_count_pending(), Some(3));
        assert_eq!(pad.timers.deadline, Some(ms(150)));
    }

    #[test]
    fn revert_clears_pending() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        pad.down(1, 10.0, 10.0);
        pad.frame(ms(50));
        assert_eq!(pad.gestures.finger_count(), 2);
        assert_eq!(pad.gestures.finger_count_pending(), None);
        assert!(pad.timers.deadline.is_none());
        assert_eq!(pad.gestures.stats().debounce_cancelled, 1);

        // A late expiry is harmless.
        pad.expire(ms(130));
        assert_eq!(pad.gestures.finger_count(), 2);
        assert!(pad.gestures.is_started());
        assert_eq!(pad.scroll_stops(), 0);
    }

    #[test]
    fn timeout_stops_then_commits() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        pad.expire(ms(130));

        assert_eq!(pad.gestures.finger_count(), 1);
        assert_eq!(pad.gestures.finger_count_pending(), None);
        assert!(!pad.gestures.is_started());
        assert_eq!(pad.scroll_stops(), 1);
        assert_eq!(
            pad.events.last(),
            Some(&PointerEvent::ScrollStop {
                time: ms(130),
                source: tpad_core::AxisSource::Finger,
            })
        );
        assert_eq!(pad.gestures.stats().debounced_switches, 1);
    }

    #[test]
    fn timeout_with_nothing_pending_is_noop() {
        let mut pad = Pad::scrolling();
        let before = *pad.gestures.state();
        pad.expire(ms(500));
        assert_eq!(*pad.gestures.state(), before);
        assert!(pad.events.iter().all(|e| !e.is_scroll_stop()));
    }

    #[test]
    fn foreign_timer_is_ignored() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        let foreign = TimerId::new(pad.gestures.switch_timer().raw() + 1);
        let handled = pad.gestures.on_timer(
            foreign,
            ms(130),
            ScrollMethod::TwoFinger,
            &mut pad.events,
        );
        assert!(!handled);
        assert_eq!(pad.gestures.finger_count_pending(), Some(1));
    }

    #[test]
    fn reset_behaves_like_lift_off() {
        let mut pad = Pad::scrolling();
        pad.up(1);
        pad.frame(ms(30));
        pad.gestures.reset(
            ms(40),
            ScrollMethod::TwoFinger,
            &mut pad.events,
            &mut pad.timers,
        );
        assert_eq!(pad.gestures.phase(), GesturePhase::Idle);
        assert_eq!(pad.gestures.finger_count_pending(), None);
        assert!(pad.timers.deadline.is_none());
        assert_eq!(pad.scroll_stops(), 1);
    }

    #[test]
    fn custom_timeout_is_used() {
        let mut pad = Pad::scrolling();
        pad.gestures.set_config(GestureConfig {
            switch_timeout: std::time::Duration::from_millis(40),
        });
        pad.up(1);
        pad.frame(ms(30));
        assert_eq!(pad.timers.deadline, Some(ms(70)));
    }

    #[test]
    fn debug_format() {
        let pad = Pad::new(2);
        let dbg = format!("{:?}", pad.gestures);
        assert!(dbg.contains("TouchpadGestures"));
        assert!(dbg.contains("Idle"));
    }
}
