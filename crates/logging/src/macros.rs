//! crates/logging/src/macros.rs
//! Emission macros that build the argument slice for a template.
//!
//! Every macro takes a [`LeveledLog`](crate::LeveledLog) implementor (by
//! value or reference), a template, and the positional arguments. Each
//! argument goes through [`Arg::from`](crate::Arg), so integers, floats,
//! strings, `bool` and `char` can be passed directly.

/// Emits at a runtime [`Severity`](logging_sink::Severity).
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use logging::{Logger, log_at};
/// use logging_sink::{RecordingSink, Severity};
///
/// let sink = Arc::new(RecordingSink::new());
/// let logger = Logger::new(sink.clone());
/// log_at!(logger, Severity::Error, "x=%d", 5).unwrap();
/// assert_eq!(sink.messages(), vec!["x=5"]);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $severity:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).log($severity, $template, &[$($crate::Arg::from($arg)),*])
    }};
}

/// Trace level logging.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).trace($template, &[$($crate::Arg::from($arg)),*])
    }};
}

/// Debug level logging.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).debug($template, &[$($crate::Arg::from($arg)),*])
    }};
}

/// Info level logging.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).info($template, &[$($crate::Arg::from($arg)),*])
    }};
}

/// Warning level logging.
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).warning($template, &[$($crate::Arg::from($arg)),*])
    }};
}

/// Error level logging.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).error($template, &[$($crate::Arg::from($arg)),*])
    }};
}

/// Fatal logging; does not return.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::LeveledLog as _;
        ($logger).fatal($template, &[$($crate::Arg::from($arg)),*])
    }};
}
