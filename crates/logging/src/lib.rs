#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the emitting side of the leveled logging façade. A [`Logger`]
//! owns a severity threshold and forwards rendered messages to a shared
//! [`LogSink`](logging_sink::LogSink); a [`NamedLogger`] prefixes its output
//! with a fixed name and delegates everything else to a shared core logger.
//!
//! # Design
//!
//! - Messages are built from printf-style templates and positional [`Arg`]s
//!   (see [`template`]). Rendering only happens once a message has passed the
//!   threshold.
//! - The threshold and the level-prefix flag are atomics, so loggers are
//!   shared through [`Arc`](std::sync::Arc) and reconfigured while in use.
//! - The fatal path reports through the sink and then hands control to a
//!   [`Terminate`] implementor. [`ProcessExit`] ends the process with
//!   [`FATAL_EXIT_CODE`]; [`UnwindingTerminator`] lets tests observe it.
//! - [`LoggerConfig`] builds a logger from environment variables or
//!   serialized settings.
//! - With the `tracing` feature, `TracingSink` and `LoggerLayer` connect the
//!   logger to the `tracing` ecosystem in both directions.
//!
//! # Invariants
//!
//! - A message below the threshold never reaches the sink and is reported as
//!   success.
//! - Raw writes ([`LeveledLog::print`], `write`, `writeln`) bypass the
//!   threshold.
//! - A fatal message reaches the sink regardless of the threshold and is
//!   always followed by termination, even when the sink fails.
//!
//! # Errors
//!
//! Emission returns [`SinkError`](logging_sink::SinkError) exactly as the sink
//! reported it. Configuration problems surface as [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logging::{Arg, LeveledLog, Logger, log_debug, log_error};
//! use logging_sink::{Severity, WriterSink};
//!
//! let sink = Arc::new(WriterSink::new(Vec::new()));
//! let core = Arc::new(Logger::new(sink.clone()));
//! core.set_level(Severity::Warning);
//!
//! log_debug!(core, "hidden %d", 1)?;
//! log_error!(core, "x=%d", 5)?;
//! core.named("db").warning("slow query (%.1fs)", &[Arg::from(2.5)])?;
//!
//! let output = sink.with_writer(|buffer| String::from_utf8_lossy(buffer).into_owned());
//! assert_eq!(output, "ERR | x=5\nWAR | db: slow query (2.5s)\n");
//! # Ok::<(), logging_sink::SinkError>(())
//! ```

mod config;
mod leveled;
mod logger;
mod macros;
mod named;
pub mod template;
mod terminate;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{ConfigError, DESTINATION_ENV, Destination, LEVEL_ENV, LoggerConfig};
pub use leveled::LeveledLog;
pub use logger::Logger;
pub use named::{NAME_SEPARATOR, NamedLogger};
pub use template::Arg;
pub use terminate::{
    FATAL_EXIT_CODE, ProcessExit, Terminate, Terminated, UnwindingTerminator, catch_termination,
};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{
    LoggerLayer, TRACING_TARGET, TracingSink, init_tracing, init_tracing_with_filter,
};
