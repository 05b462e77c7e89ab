// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: shared vocabulary for the touchpad gesture stack.
//!
//! # Role in tpad
//! `tpad-core` is the seam layer. It owns the types that flow between the
//! device layer, the gesture core (`tpad-gestures`), and the outputs:
//!
//! - **Contacts**: the per-slot [`ContactTable`](contact::ContactTable) the
//!   device layer fills each frame.
//! - **Device queries**: read-only [`DeviceState`](device::DeviceState)
//!   snapshots of button, scroll, and tap-drag state owned elsewhere.
//! - **Outputs**: [`PointerEvent`](event::PointerEvent) and the
//!   [`EventSink`](event::EventSink) trait.
//! - **Timers**: the [`TimerService`](timer::TimerService) trait and
//!   cancelable [`TimerId`](timer::TimerId) handles.
//! - **Configuration**: [`TouchpadConfig`](config::TouchpadConfig), loadable
//!   from TOML or JSON with the `config` feature.
//!
//! # How it fits in the system
//! The gesture core never reaches into other subsystems. Everything it needs
//! arrives as a `DeviceState` borrow, and everything it produces leaves
//! through an `EventSink` or a `TimerService` call.

pub mod config;
pub mod contact;
pub mod device;
pub mod event;
pub mod filter;
pub mod geometry;
pub mod logging;
pub mod time;
pub mod timer;

pub use config::{ConfigError, GestureConfig, TouchpadConfig};
pub use contact::{ContactTable, TouchContact};
pub use device::{ButtonState, DeviceState, ScrollMethod};
pub use event::{AxisSource, EventSink, PointerEvent};
pub use filter::{IdentityFilter, LinearFilter, MotionFilter};
pub use geometry::{NormalizedDelta, Point};
pub use time::Timestamp;
pub use timer::{TimerError, TimerId, TimerService};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
