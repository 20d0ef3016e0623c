//! Tracing macros that compile to nothing when tracing is disabled.
//!
//! Tracing is enabled when either:
//! - The `tracing` feature is enabled
//! - Running tests (`cfg(test)`), where `tracing` is a dev-dependency

/// Emit a trace-level log message.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(any(test, feature = "tracing"))]
        tracing::trace!($($arg)*);
    };
}

/// Enter a trace-level span for the rest of the enclosing block.
macro_rules! trace_span {
    ($($arg:tt)*) => {
        #[cfg(any(test, feature = "tracing"))]
        let _span = tracing::trace_span!($($arg)*).entered();
    };
}

pub(crate) use trace;
pub(crate) use trace_span;
