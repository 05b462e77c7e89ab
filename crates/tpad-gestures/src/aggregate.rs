#![forbid(unsafe_code)]

//! Delta aggregation across contacts.
//!
//! Only contacts that are down *and* produced a sample this frame contribute.
//! A contact that is down but idle adds nothing, which is what keeps a resting
//! thumb from diluting the motion of a moving finger in combined mode.

use tpad_core::{ContactTable, NormalizedDelta};

/// How per-contact deltas are folded into one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Vector sum of all contributing contacts.
    Combined,
    /// Vector mean of all contributing contacts.
    Averaged,
}

/// Fold the active, dirty contacts of `touches` into one delta.
///
/// Returns [`NormalizedDelta::ZERO`] when no contact contributes.
#[must_use]
pub fn touches_delta(touches: &ContactTable, aggregation: Aggregation) -> NormalizedDelta {
    let mut delta = NormalizedDelta::ZERO;
    let mut nchanged = 0u32;

    for t in touches.iter().filter(|t| t.is_active() && t.is_dirty()) {
        nchanged += 1;
        delta += t.delta();
    }

    match aggregation {
        Aggregation::Averaged if nchanged > 0 => delta / f64::from(nchanged),
        _ => delta,
    }
}

/// Sum of the contributing contacts' motion.
#[inline]
#[must_use]
pub fn combined_touches_delta(touches: &ContactTable) -> NormalizedDelta {
    touches_delta(touches, Aggregation::Combined)
}

/// Mean of the contributing contacts' motion.
#[inline]
#[must_use]
pub fn average_touches_delta(touches: &ContactTable) -> NormalizedDelta {
    touches_delta(touches, Aggregation::Averaged)
}
