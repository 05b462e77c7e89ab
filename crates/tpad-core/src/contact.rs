#![forbid(unsafe_code)]

//! Per-slot touch contact records.
//!
//! The device layer owns a [`ContactTable`] with one [`TouchContact`] per
//! hardware slot. Each frame it records new samples (which marks the slot
//! dirty), hands the table to the gesture core by shared reference, then calls
//! [`ContactTable::end_frame`] so the next frame starts clean.
//!
//! # Invariants
//!
//! 1. An inactive slot never carries a non-zero delta.
//! 2. A slot's delta is only meaningful while it is dirty; `end_frame()`
//!    clears dirty flags and deltas together.
//! 3. The number of slots is fixed at construction.

use crate::geometry::{NormalizedDelta, Point};

/// One tracked contact.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchContact {
    slot: usize,
    active: bool,
    dirty: bool,
    delta: NormalizedDelta,
    position: Option<Point>,
}

impl TouchContact {
    /// Create an idle contact for the given slot.
    #[must_use]
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            ..Self::default()
        }
    }

    /// Slot index of this contact.
    #[inline]
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Whether the contact is currently down.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the contact received a new sample this frame.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Motion since the previous frame.
    #[inline]
    #[must_use]
    pub fn delta(&self) -> NormalizedDelta {
        self.delta
    }

    /// Last known position, if the contact is down.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Put the contact down at `pos`. The first sample carries no motion.
    pub fn begin(&mut self, pos: Point) {
        self.active = true;
        self.dirty = true;
        self.delta = NormalizedDelta::ZERO;
        self.position = Some(pos);
    }

    /// Record a new position. Returns `false` (and changes nothing) if the
    /// contact is not down.
    pub fn move_to(&mut self, pos: Point) -> bool {
        let Some(prev) = self.position.filter(|_| self.active) else {
            return false;
        };
        self.delta += pos - prev;
        self.position = Some(pos);
        self.dirty = true;
        true
    }

    /// Record a relative sample for devices that report deltas directly.
    /// Ignored while the contact is up.
    pub fn push_delta(&mut self, delta: NormalizedDelta) -> bool {
        if !self.active {
            return false;
        }
        self.delta += delta;
        self.dirty = true;
        true
    }

    /// Lift the contact.
    pub fn end(&mut self) {
        self.active = false;
        self.dirty = true;
        self.delta = NormalizedDelta::ZERO;
        self.position = None;
    }

    /// Forget this frame's sample.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        self.delta = NormalizedDelta::ZERO;
    }
}

/// Fixed-size table of contacts, indexed by slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactTable {
    touches: Vec<TouchContact>,
}

impl ContactTable {
    /// Create a table with `num_slots` idle contacts.
    #[must_use]
    pub fn new(num_slots: usize) -> Self {
        Self {
            touches: (0..num_slots).map(TouchContact::new).collect(),
        }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.touches.len()
    }

    /// Contact in `slot`, if the slot exists.
    #[inline]
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&TouchContact> {
        self.touches.get(slot)
    }

    /// Mutable contact in `slot`, if the slot exists.
    #[inline]
    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut TouchContact> {
        self.touches.get_mut(slot)
    }

    /// Iterate over all slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &TouchContact> {
        self.touches.iter()
    }

    /// Count of contacts currently down, regardless of freshness.
    #[must_use]
    pub fn active_count(&self) -> u32 {
        self.touches.iter().filter(|t| t.is_active()).count() as u32
    }

    /// Clear every slot's dirty flag and delta.
    pub fn end_frame(&mut self) {
        for t in &mut self.touches {
            t.clear_dirty();
        }
    }
}
