#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` defines the output side of the leveled logging façade: the
//! ordered [`Severity`] scale, the [`LogSink`] capability that receives fully
//! rendered lines, and the destinations shipped with the workspace.
//!
//! # Design
//!
//! A sink exposes one method per severity plus an unconditional
//! [`LogSink::print`]. Loggers decide *whether* a message is emitted and
//! *what* it says; a sink only decides *where* it goes. Destinations:
//!
//! - [`WriterSink`] streams `"<LABEL> | <message>"` lines into any
//!   [`std::io::Write`] implementor, honouring a [`LineMode`].
//! - [`ConsoleSink`] and [`FileSink`] bind a writer sink to stdout/stderr or a
//!   file.
//! - [`NullSink`] discards everything; [`RecordingSink`] remembers every call
//!   for assertions.
//! - `syslog::SyslogSink` (unix only) routes lines to syslog(3).
//!
//! # Errors
//!
//! Every sink operation reports a [`SinkError`]. Loggers hand it back to
//! their caller unchanged.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LogSink, Severity, WriterSink};
//!
//! let sink = WriterSink::new(Vec::new());
//! sink.log(Severity::Error, "x=5")?;
//! assert_eq!(sink.into_inner(), b"ERR | x=5\n".to_vec());
//! # Ok::<(), logging_sink::SinkError>(())
//! ```

mod error;
mod line_mode;
mod severity;
mod sink;

#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;

pub use error::SinkError;
pub use line_mode::LineMode;
pub use severity::{Severity, SeverityParseError};
pub use sink::{
    ConsoleSink, ConsoleStream, FileSink, LABEL_SEPARATOR, LogSink, NullSink, Record,
    RecordingSink, WriterSink,
};
