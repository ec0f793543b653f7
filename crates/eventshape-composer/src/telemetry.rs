//! Logging shim for the optional `telemetry` feature.

/// Diagnostic detail; compiled out without `telemetry`.
///
/// Rejections are returned to the caller as errors, so nothing here writes
/// to stderr on its own.
macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "telemetry")]
        {
            tracing::debug!($($arg)*);
        }
        #[cfg(not(feature = "telemetry"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use debug_event;
