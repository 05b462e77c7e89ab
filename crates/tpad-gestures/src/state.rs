#![forbid(unsafe_code)]

//! Gesture state: the recognized finger mode and whether it is open.
//!
//! # State Machine
//!
//! [`GesturePhase`] replaces the `(finger_count, started)` pair with a tagged
//! variant so that "started with zero fingers" cannot be represented:
//!
//! ```text
//!            touches > 0                  first output
//!   Idle ──────────────────► Ready(mode) ─────────────► Active(mode)
//!    ▲                          ▲   ▲                      │
//!    │        all lifted        │   └──────── stop ────────┘
//!    └──────────────────────────┴──────────────────────────┘
//! ```
//!
//! A pending mode only exists while a switch is being debounced. It is always
//! non-zero: lifting every finger resets immediately and never debounces.

use std::fmt;

/// Finger mode recognized for a non-zero contact count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerMode {
    /// One finger moves the pointer.
    Pointer,
    /// Two fingers scroll.
    TwoFingerScroll,
    /// Three or more fingers. No gesture is bound to these counts.
    Unbound(u32),
}

impl FingerMode {
    /// Mode for `count` contacts, or `None` for zero.
    #[must_use]
    pub const fn from_count(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::Pointer),
            2 => Some(Self::TwoFingerScroll),
            n => Some(Self::Unbound(n)),
        }
    }

    /// Number of fingers this mode stands for.
    #[must_use]
    pub const fn fingers(self) -> u32 {
        match self {
            Self::Pointer => 1,
            Self::TwoFingerScroll => 2,
            Self::Unbound(n) => n,
        }
    }
}

impl fmt::Display for FingerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pointer => f.write_str("pointer"),
            Self::TwoFingerScroll => f.write_str("2fg-scroll"),
            Self::Unbound(n) => write!(f, "{n}fg"),
        }
    }
}

/// Lifecycle of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No contacts.
    #[default]
    Idle,
    /// A mode is recognized but its output channel is closed.
    Ready(FingerMode),
    /// A mode is recognized and its output channel is open.
    Active(FingerMode),
}

impl GesturePhase {
    /// The recognized mode, if any contacts are down.
    #[must_use]
    pub const fn mode(self) -> Option<FingerMode> {
        match self {
            Self::Idle => None,
            Self::Ready(m) | Self::Active(m) => Some(m),
        }
    }

    #[must_use]
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Per-device gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    pub(crate) phase: GesturePhase,
    pub(crate) pending: Option<FingerMode>,
}

impl GestureState {
    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Recognized mode, if any.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Option<FingerMode> {
        self.phase.mode()
    }

    /// Number of fingers of the active mode (0 when idle).
    #[inline]
    #[must_use]
    pub fn finger_count(&self) -> u32 {
        self.phase.mode().map_or(0, FingerMode::fingers)
    }

    /// Mode awaiting debounce confirmation.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<FingerMode> {
        self.pending
    }

    /// Finger count awaiting debounce confirmation.
    #[inline]
    #[must_use]
    pub fn finger_count_pending(&self) -> Option<u32> {
        self.pending.map(FingerMode::fingers)
    }

    /// Whether the output channel of the current mode is open.
    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase.is_started()
    }

    /// Close the channel, keeping the mode.
    pub(crate) fn close(&mut self) {
        if let GesturePhase::Active(mode) = self.phase {
            self.phase = GesturePhase::Ready(mode);
        }
    }

    /// Recognize `count` contacts, closed, with nothing pending.
    pub(crate) fn switch_to(&mut self, count: u32) {
        self.phase = match FingerMode::from_count(count) {
            Some(mode) => GesturePhase::Ready(mode),
            None => GesturePhase::Idle,
        };
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_count() {
        assert_eq!(FingerMode::from_count(0), None);
        assert_eq!(FingerMode::from_count(1), Some(FingerMode::Pointer));
        assert_eq!(FingerMode::from_count(2), Some(FingerMode::TwoFingerScroll));
        assert_eq!(FingerMode::from_count(3), Some(FingerMode::Unbound(3)));
        for n in 1..8 {
            assert_eq!(FingerMode::from_count(n).map(FingerMode::fingers), Some(n));
        }
    }

    #[test]
    fn idle_has_zero_fingers_and_is_not_started() {
        let state = GestureState::default();
        assert_eq!(state.finger_count(), 0);
        assert!(!state.is_started());
        assert_eq!(state.finger_count_pending(), None);
    }

    #[test]
    fn close_keeps_mode() {
        let mut state = GestureState {
            phase: GesturePhase::Active(FingerMode::TwoFingerScroll),
            pending: None,
        };
        state.close();
        assert_eq!(state.phase(), GesturePhase::Ready(FingerMode::TwoFingerScroll));
        assert_eq!(state.finger_count(), 2);
    }

    #[test]
    fn close_on_idle_is_noop() {
        let mut state = GestureState::default();
        state.close();
        assert_eq!(state.phase(), GesturePhase::Idle);
    }

    #[test]
    fn switch_clears_pending() {
        let mut state = GestureState {
            phase: GesturePhase::Active(FingerMode::TwoFingerScroll),
            pending: Some(FingerMode::Pointer),
        };
        state.switch_to(3);
        assert_eq!(state.phase(), GesturePhase::Ready(FingerMode::Unbound(3)));
        assert_eq!(state.pending(), None);
        state.switch_to(0);
        assert_eq!(state.phase(), GesturePhase::Idle);
    }

    #[test]
    fn display() {
        assert_eq!(FingerMode::Pointer.to_string(), "pointer");
        assert_eq!(FingerMode::TwoFingerScroll.to_string(), "2fg-scroll");
        assert_eq!(FingerMode::Unbound(4).to_string(), "4fg");
    }
}
