#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `leveled_log` is the façade over the workspace's two logging crates:
//! [`logging`] (loggers, templates, configuration) and [`logging_sink`]
//! (severities and output destinations). Applications depend on this crate
//! alone and reach both through the re-exports below. The [`cli`] module
//! backs the `levlog` binary.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use leveled_log::{LeveledLog, Logger, RecordingSink, Severity, log_info};
//!
//! let sink = Arc::new(RecordingSink::new());
//! let core = Arc::new(Logger::new(sink.clone()));
//! core.set_level(Severity::Debug);
//!
//! let worker = core.named("worker-1");
//! log_info!(worker, "processed %d jobs", 12)?;
//! worker.trace("too chatty", &[])?;
//!
//! assert_eq!(sink.messages(), vec!["worker-1: processed 12 jobs"]);
//! # Ok::<(), leveled_log::SinkError>(())
//! ```

pub mod cli;

pub use logging::{
    Arg, ConfigError, Destination, FATAL_EXIT_CODE, LeveledLog, Logger, LoggerConfig,
    NAME_SEPARATOR, NamedLogger, ProcessExit, Terminate, Terminated, UnwindingTerminator,
    catch_termination, log_at, log_debug, log_error, log_fatal, log_info, log_trace, log_warning,
    template,
};
pub use logging_sink::{
    ConsoleSink, FileSink, LineMode, LogSink, NullSink, Record, RecordingSink, Severity,
    SeverityParseError, SinkError, WriterSink,
};

#[cfg(unix)]
pub use logging_sink::syslog;

#[cfg(feature = "tracing")]
pub use logging::{LoggerLayer, TracingSink, init_tracing, init_tracing_with_filter};
