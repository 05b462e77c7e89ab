#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature the usual macros are re-exported from
//! [`tracing`]. Without it, same-named no-op macros are exported at the crate
//! root so call sites compile unchanged.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], which installs a
//! JSON formatter filtered by the `TPAD_LOG` environment variable.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

/// Environment variable read by [`init_json_subscriber`].
pub const LOG_ENV_VAR: &str = "TPAD_LOG";

/// Install a global JSON subscriber.
///
/// Falls back to `warn` when `TPAD_LOG` is unset or unparsable. Returns
/// `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! trace {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! info {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! warn {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! error {
        ($($arg:tt)*) => {{}};
    }
}
