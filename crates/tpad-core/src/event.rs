#![forbid(unsafe_code)]

//! Output events produced by the gesture core.
//!
//! The core never owns an output queue. It calls into an [`EventSink`], which
//! the device layer forwards to the seat. `Vec<PointerEvent>` implements the
//! trait so tests and simple callers can collect events directly.

use crate::geometry::NormalizedDelta;
use crate::time::Timestamp;

/// Origin of a scroll axis event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSource {
    /// A physical wheel.
    Wheel,
    /// Finger motion on a touch surface.
    Finger,
    /// Continuous motion from a non-finger source (e.g. a trackball).
    Continuous,
}

/// A pointer-level event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Relative pointer motion.
    Motion {
        time: Timestamp,
        /// Motion after the filter was applied.
        delta: NormalizedDelta,
        /// Motion before the filter was applied.
        unaccel: NormalizedDelta,
    },
    /// Scroll motion on one or both axes.
    Scroll {
        time: Timestamp,
        source: AxisSource,
        delta: NormalizedDelta,
    },
    /// The scroll sequence from `source` ended.
    ScrollStop { time: Timestamp, source: AxisSource },
}

impl PointerEvent {
    /// Timestamp of the event.
    #[must_use]
    pub fn time(&self) -> Timestamp {
        match self {
            Self::Motion { time, .. } | Self::Scroll { time, .. } | Self::ScrollStop { time, .. } => {
                *time
            }
        }
    }

    #[must_use]
    pub fn is_motion(&self) -> bool {
        matches!(self, Self::Motion { .. })
    }

    #[must_use]
    pub fn is_scroll(&self) -> bool {
        matches!(self, Self::Scroll { .. })
    }

    #[must_use]
    pub fn is_scroll_stop(&self) -> bool {
        matches!(self, Self::ScrollStop { .. })
    }
}

/// Receiver for events posted by the gesture core.
pub trait EventSink {
    /// Post relative pointer motion.
    fn notify_motion(&mut self, time: Timestamp, delta: NormalizedDelta, unaccel: NormalizedDelta);

    /// Post scroll motion.
    fn post_scroll(&mut self, time: Timestamp, source: AxisSource, delta: NormalizedDelta);

    /// End the scroll sequence from `source`.
    fn stop_scroll(&mut self, time: Timestamp, source: AxisSource);
}

impl EventSink for Vec<PointerEvent> {
    fn notify_motion(&mut self, time: Timestamp, delta: NormalizedDelta, unaccel: NormalizedDelta) {
        self.push(PointerEvent::Motion {
            time,
            delta,
            unaccel,
        });
    }

    fn post_scroll(&mut self, time: Timestamp, source: AxisSource, delta: NormalizedDelta) {
        self.push(PointerEvent::Scroll {
            time,
            source,
            delta,
        });
    }

    fn stop_scroll(&mut self, time: Timestamp, source: AxisSource) {
        self.push(PointerEvent::ScrollStop { time, source });
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn notify_motion(&mut self, time: Timestamp, delta: NormalizedDelta, unaccel: NormalizedDelta) {
        (**self).notify_motion(time, delta, unaccel);
    }

    fn post_scroll(&mut self, time: Timestamp, source: AxisSource, delta: NormalizedDelta) {
        (**self).post_scroll(time, source, delta);
    }

    fn stop_scroll(&mut self, time: Timestamp, source: AxisSource) {
        (**self).stop_scroll(time, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_records_in_order() {
        let mut out: Vec<PointerEvent> = Vec::new();
        let t = Timestamp::from_millis(10);
        out.post_scroll(t, AxisSource::Finger, NormalizedDelta::new(0.0, 5.0));
        out.stop_scroll(t, AxisSource::Finger);
        out.notify_motion(t, NormalizedDelta::new(1.0, 0.0), NormalizedDelta::new(2.0, 0.0));

        assert_eq!(out.len(), 3);
        assert!(out[0].is_scroll());
        assert!(out[1].is_scroll_stop());
        assert!(out[2].is_motion());
        assert!(out.iter().all(|e| e.time() == t));
    }

    #[test]
    fn scroll_source_is_preserved() {
        let mut out: Vec<PointerEvent> = Vec::new();
        let t = Timestamp::from_millis(3);
        for source in [AxisSource::Wheel, AxisSource::Finger, AxisSource::Continuous] {
            out.post_scroll(t, source, NormalizedDelta::new(0.0, 1.0));
            out.stop_scroll(t, source);
        }
        let sources: Vec<_> = out
            .iter()
            .map(|e| match e {
                PointerEvent::Scroll { source, .. } | PointerEvent::ScrollStop { source, .. } => {
                    *source
                }
                PointerEvent::Motion { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(
            sources,
            [
                AxisSource::Wheel,
                AxisSource::Wheel,
                AxisSource::Finger,
                AxisSource::Finger,
                AxisSource::Continuous,
                AxisSource::Continuous,
            ]
        );
    }

    #[test]
    fn sink_through_mut_ref() {
        fn post(sink: &mut impl EventSink) {
            sink.stop_scroll(Timestamp::ZERO, AxisSource::Finger);
        }
        let mut out: Vec<PointerEvent> = Vec::new();
        let mut r = &mut out;
        post(&mut r);
        assert_eq!(
            out,
            vec![PointerEvent::ScrollStop {
                time: Timestamp::ZERO,
                source: AxisSource::Finger
            }]
        );
    }
}
