#![forbid(unsafe_code)]

//! Canned hardware descriptions.

use std::fmt;

/// Bus/vendor/product triple identifying a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}:{:04x}", self.bustype, self.vendor, self.product)
    }
}

/// What the scripted device pretends to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescription {
    pub name: &'static str,
    pub id: InputId,
    /// Number of contact slots.
    pub num_slots: usize,
    /// Buttons are detected through the pad itself.
    pub is_clickpad: bool,
    /// Only slot 0 carries reliable coordinates.
    pub semi_mt: bool,
}

impl DeviceDescription {
    /// Five-slot clickpad with full multitouch.
    #[must_use]
    pub fn clickpad() -> Self {
        Self {
            name: "Scripted clickpad",
            id: InputId {
                bustype: 0x18,
                vendor: 0x6cb,
                product: 0x7e7e,
            },
            num_slots: 5,
            is_clickpad: true,
            semi_mt: false,
        }
    }

    /// Two-slot semi-multitouch touchpad with physical buttons.
    #[must_use]
    pub fn semi_mt_touchpad() -> Self {
        Self {
            name: "Scripted semi-mt touchpad",
            id: InputId {
                bustype: 0x11,
                vendor: 0x2,
                product: 0x7,
            },
            num_slots: 2,
            is_clickpad: false,
            semi_mt: true,
        }
    }

    /// Single-report device that only ever tracks one contact.
    #[must_use]
    pub fn single_touch() -> Self {
        Self {
            name: "Protocol A single-touch pad",
            id: InputId {
                bustype: 0x18,
                vendor: 0xeef,
                product: 0x20,
            },
            num_slots: 1,
            is_clickpad: false,
            semi_mt: false,
        }
    }
}
