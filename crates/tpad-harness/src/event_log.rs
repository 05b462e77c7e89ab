#![forbid(unsafe_code)]

//! Recording event sink.

use tpad_core::{AxisSource, EventSink, NormalizedDelta, PointerEvent, Timestamp};

/// Records every posted event in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<PointerEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in posting order.
    #[must_use]
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PointerEvent> {
        self.events.last()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    /// `(delta, unaccel)` of every motion event.
    #[must_use]
    pub fn motions(&self) -> Vec<(NormalizedDelta, NormalizedDelta)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PointerEvent::Motion { delta, unaccel, .. } => Some((*delta, *unaccel)),
                _ => None,
            })
            .collect()
    }

    /// Deltas of every scroll event.
    #[must_use]
    pub fn scrolls(&self) -> Vec<NormalizedDelta> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PointerEvent::Scroll { delta, .. } => Some(*delta),
                _ => None,
            })
            .collect()
    }

    /// Timestamps of every scroll-stop event.
    #[must_use]
    pub fn scroll_stops(&self) -> Vec<Timestamp> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PointerEvent::ScrollStop { time, .. } => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Events posted at exactly `time`.
    pub fn at(&self, time: Timestamp) -> impl Iterator<Item = &PointerEvent> {
        self.events.iter().filter(move |e| e.time() == time)
    }
}

impl EventSink for EventLog {
    fn notify_motion(&mut self, time: Timestamp, delta: NormalizedDelta, unaccel: NormalizedDelta) {
        self.events.notify_motion(time, delta, unaccel);
    }

    fn post_scroll(&mut self, time: Timestamp, source: AxisSource, delta: NormalizedDelta) {
        self.events.post_scroll(time, source, delta);
    }

    fn stop_scroll(&mut self, time: Timestamp, source: AxisSource) {
        self.events.stop_scroll(time, source);
    }
}
