#![forbid(unsafe_code)]

//! Geometric primitives in normalized, device-independent units.

use std::ops::{Add, AddAssign, Div, Sub};

/// An absolute contact position, already normalized by the device layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = NormalizedDelta;

    fn sub(self, rhs: Point) -> NormalizedDelta {
        NormalizedDelta::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Motion between two frames in normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedDelta {
    /// Horizontal motion.
    pub x: f64,
    /// Vertical motion.
    pub y: f64,
}

impl NormalizedDelta {
    /// No motion.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new delta.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are exactly zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Scale both components.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for NormalizedDelta {
    type Output = NormalizedDelta;

    fn add(self, rhs: NormalizedDelta) -> NormalizedDelta {
        NormalizedDelta::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for NormalizedDelta {
    fn add_assign(&mut self, rhs: NormalizedDelta) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Div<f64> for NormalizedDelta {
    type Output = NormalizedDelta;

    fn div(self, rhs: f64) -> NormalizedDelta {
        NormalizedDelta::new(self.x / rhs, self.y / rhs)
    }
}
