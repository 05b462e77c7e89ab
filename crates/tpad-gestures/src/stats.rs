#![forbid(unsafe_code)]

//! Per-instance gesture counters.

/// Monotonic counters describing what the state machine did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureStats {
    /// Mode switches applied on the frame they were observed.
    pub immediate_switches: u64,
    /// Mode switches committed by the debounce timer.
    pub debounced_switches: u64,
    /// Times a new pending mode was armed.
    pub debounce_armed: u64,
    /// Pending modes dropped because the count reverted or resolved otherwise.
    pub debounce_cancelled: u64,
    /// Frames where all contacts had lifted and the gesture was reset.
    pub lift_offs: u64,
    /// Frames forced into single-finger mode by tap-drag or a clickpad press.
    pub forced_single_finger: u64,
    /// Frames whose output was suppressed while a switch was pending.
    pub suppressed_frames: u64,
    /// Scroll-stop notifications emitted.
    pub scroll_stops: u64,
}

impl GestureStats {
    /// Total mode switches, immediate and debounced.
    #[must_use]
    pub fn total_switches(&self) -> u64 {
        self.immediate_switches + self.debounced_switches
    }
}
