//! Property-based checks of delta aggregation.
//!
//! 1. **Average is combined over count**: for any set of contributing
//!    contacts, the averaged delta is the combined delta divided by their
//!    number.
//! 2. **Idle contacts never contribute**: adding contacts that are up, or
//!    down without a sample, changes neither aggregate.
//! 3. **Empty is zero**: with nothing contributing both aggregates are zero.

use proptest::prelude::*;
use tpad_core::{ContactTable, NormalizedDelta, Point};
use tpad_gestures::{average_touches_delta, combined_touches_delta};

fn delta() -> impl Strategy<Value = (i16, i16)> {
    (any::<i16>(), any::<i16>())
}

/// `moving` contacts with a sample, then `resting` contacts down without
/// one, then `lifted` contacts that went up this frame.
fn table(moving: &[(i16, i16)], resting: usize, lifted: usize) -> ContactTable {
    let mut table = ContactTable::new(moving.len() + resting + lifted);
    for (slot, (x, y)) in moving.iter().enumerate() {
        let t = table.slot_mut(slot).unwrap();
        t.begin(Point::new(0.0, 0.0));
        t.push_delta(NormalizedDelta::new(f64::from(*x), f64::from(*y)));
    }
    for slot in moving.len()..moving.len() + resting {
        let t = table.slot_mut(slot).unwrap();
        t.begin(Point::new(0.0, 0.0));
        t.clear_dirty();
    }
    for slot in moving.len() + resting..table.num_slots() {
        let t = table.slot_mut(slot).unwrap();
        t.begin(Point::new(0.0, 0.0));
        t.push_delta(NormalizedDelta::new(9.0, 9.0));
        t.end();
    }
    table
}

proptest! {
    #[test]
    fn average_is_combined_over_count(moving in prop::collection::vec(delta(), 1..8)) {
        let t = table(&moving, 0, 0);
        let combined = combined_touches_delta(&t);
        prop_assert_eq!(average_touches_delta(&t), combined / moving.len() as f64);
    }

    #[test]
    fn idle_contacts_never_contribute(
        moving in prop::collection::vec(delta(), 0..6),
        resting in 0usize..4,
        lifted in 0usize..4,
    ) {
        let bare = table(&moving, 0, 0);
        let padded = table(&moving, resting, lifted);
        prop_assert_eq!(combined_touches_delta(&padded), combined_touches_delta(&bare));
        prop_assert_eq!(average_touches_delta(&padded), average_touches_delta(&bare));
    }

    #[test]
    fn nothing_moving_is_zero(resting in 0usize..5, lifted in 0usize..5) {
        let t = table(&[], resting, lifted);
        prop_assert!(combined_touches_delta(&t).is_zero());
        prop_assert!(average_touches_delta(&t).is_zero());
    }
}
