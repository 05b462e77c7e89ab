#![forbid(unsafe_code)]

//! Test harness for the tpad gesture stack.
//!
//! # Role in tpad
//! `tpad-harness` plays the parts the gesture core treats as external:
//!
//! - [`TimerWheel`]: a [`TimerService`](tpad_core::TimerService) driven by a
//!   manual clock. Nothing fires until the test advances time.
//! - [`EventLog`]: an [`EventSink`](tpad_core::EventSink) with query helpers.
//! - [`ScriptedTouchpad`]: a device that turns touch down/move/up calls into
//!   frames, fires due timers before each frame, and records every output.
//! - [`DeviceDescription`]: canned hardware descriptions (clickpad, semi-mt
//!   touchpad, single-touch pad).
//!
//! Everything is deterministic: the same script always produces the same
//! event log, so tests can assert exact sequences.

pub mod device;
pub mod event_log;
pub mod scripted;
pub mod timer_wheel;

pub use device::{DeviceDescription, InputId};
pub use event_log::EventLog;
pub use scripted::ScriptedTouchpad;
pub use timer_wheel::{GestureTimerTarget, TimerTarget, TimerWheel};
