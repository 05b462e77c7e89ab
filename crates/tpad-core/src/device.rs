#![forbid(unsafe_code)]

//! Read-only device queries.
//!
//! Button tracking, tap-and-drag detection, and scroll configuration are owned
//! by other subsystems. The gesture core only ever sees them through a
//! [`DeviceState`] snapshot built by the device layer for the current frame.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::contact::ContactTable;

/// Configured scroll method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ScrollMethod {
    /// Scrolling disabled.
    NoScroll,
    /// Two fingers moving together scroll.
    #[default]
    TwoFinger,
    /// Moving along the pad edge scrolls.
    Edge,
    /// Motion while a button is held scrolls.
    OnButtonDown,
}

/// Physical button state as seen by the button subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Buttons are detected through the pad itself.
    pub is_clickpad: bool,
    /// Any button is currently pressed.
    pub pressed: bool,
}

impl ButtonState {
    /// A clickpad that is currently pushed down.
    #[inline]
    #[must_use]
    pub const fn clickpad_pressed(&self) -> bool {
        self.is_clickpad && self.pressed
    }
}

/// Snapshot of everything the gesture core may consult for one frame.
#[derive(Debug, Clone, Copy)]
pub struct DeviceState<'a> {
    /// Contact table after this frame's samples were applied.
    pub touches: &'a ContactTable,
    /// Button/clickpad state.
    pub buttons: ButtonState,
    /// Active scroll method.
    pub scroll_method: ScrollMethod,
    /// A tap-and-drag is in progress.
    pub tap_dragging: bool,
    /// Hardware reports several contacts but only slot 0 is reliable.
    pub semi_mt: bool,
}

impl<'a> DeviceState<'a> {
    /// Snapshot with default buttons, two-finger scrolling, and no quirks.
    #[must_use]
    pub fn new(touches: &'a ContactTable) -> Self {
        Self {
            touches,
            buttons: ButtonState::default(),
            scroll_method: ScrollMethod::default(),
            tap_dragging: false,
            semi_mt: false,
        }
    }

    /// Whether two-finger scrolling is the configured method.
    #[inline]
    #[must_use]
    pub fn two_finger_scroll(&self) -> bool {
        self.scroll_method == ScrollMethod::TwoFinger
    }

    /// Whether the dispatcher must behave as if a single finger were down.
    #[inline]
    #[must_use]
    pub fn forces_single_finger(&self) -> bool {
        self.tap_dragging || self.buttons.clickpad_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scroll_method_is_two_finger() {
        let table = ContactTable::new(2);
        let dev = DeviceState::new(&table);
        assert!(dev.two_finger_scroll());
        assert!(!dev.forces_single_finger());
    }

    #[test]
    fn pressed_button_on_plain_touchpad_does_not_force() {
        let table = ContactTable::new(2);
        let mut dev = DeviceState::new(&table);
        dev.buttons = ButtonState {
            is_clickpad: false,
            pressed: true,
        };
        assert!(!dev.forces_single_finger());
        dev.buttons.is_clickpad = true;
        assert!(dev.forces_single_finger());
    }

    #[test]
    fn only_two_finger_method_scrolls_with_fingers() {
        let table = ContactTable::new(2);
        let mut dev = DeviceState::new(&table);
        for method in [ScrollMethod::NoScroll, ScrollMethod::Edge, ScrollMethod::OnButtonDown] {
            dev.scroll_method = method;
            assert!(!dev.two_finger_scroll(), "{method:?}");
        }
    }

    #[test]
    fn tap_drag_forces() {
        let table = ContactTable::new(2);
        let mut dev = DeviceState::new(&table);
        dev.tap_dragging = true;
        assert!(dev.forces_single_finger());
    }
}
