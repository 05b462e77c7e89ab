#![forbid(unsafe_code)]

//! Motion filter seam.
//!
//! Pointer acceleration lives outside the gesture core. The core hands raw
//! deltas to a [`MotionFilter`] and posts whatever comes back.

use crate::geometry::NormalizedDelta;
use crate::time::Timestamp;

/// Maps a raw delta to a filtered (accelerated) delta.
pub trait MotionFilter {
    fn filter(&mut self, delta: NormalizedDelta, time: Timestamp) -> NormalizedDelta;
}

/// Passes motion through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFilter;

impl MotionFilter for IdentityFilter {
    #[inline]
    fn filter(&mut self, delta: NormalizedDelta, _time: Timestamp) -> NormalizedDelta {
        delta
    }
}

/// Constant-factor filter with an optional dead zone.
///
/// Deltas whose larger component is below `threshold` are swallowed, which
/// models a filter that decelerates tiny motions to nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFilter {
    pub factor: f64,
    pub threshold: f64,
}

impl LinearFilter {
    #[must_use]
    pub const fn new(factor: f64) -> Self {
        Self {
            factor,
            threshold: 0.0,
        }
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for LinearFilter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MotionFilter for LinearFilter {
    fn filter(&mut self, delta: NormalizedDelta, _time: Timestamp) -> NormalizedDelta {
        if delta.x.abs().max(delta.y.abs()) < self.threshold {
            return NormalizedDelta::ZERO;
        }
        delta.scale(self.factor)
    }
}

impl<F: MotionFilter + ?Sized> MotionFilter for &mut F {
    fn filter(&mut self, delta: NormalizedDelta, time: Timestamp) -> NormalizedDelta {
        (**self).filter(delta, time)
    }
}

impl<F: MotionFilter + ?Sized> MotionFilter for Box<F> {
    fn filter(&mut self, delta: NormalizedDelta, time: Timestamp) -> NormalizedDelta {
        (**self).filter(delta, time)
    }
}
