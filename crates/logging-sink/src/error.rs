//! crates/logging-sink/src/error.rs
//! Failure reported when a sink cannot accept a rendered message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::severity::Severity;

/// A sink failed to accept a rendered message.
///
/// Loggers hand this error back to their caller untouched; nothing in the
/// workspace retries or buffers a rejected message.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the underlying destination failed.
    #[error("failed to write {} message: {source}", describe(.severity))]
    Write {
        /// Severity of the rejected message, `None` for raw prints.
        severity: Option<Severity>,
        /// The I/O error reported by the writer.
        #[source]
        source: io::Error,
    },
    /// Opening a file destination failed.
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        /// Path that could not be opened.
        path: PathBuf,
        /// The I/O error reported while opening.
        #[source]
        source: io::Error,
    },
    /// The sink refused the message.
    #[error("sink rejected message: {message}")]
    Rejected {
        /// Explanation supplied by the sink.
        message: String,
    },
    /// The message cannot be represented by the destination.
    #[error("message not supported by sink: {reason}")]
    Unsupported {
        /// Why the destination cannot carry the message.
        reason: &'static str,
    },
}

impl SinkError {
    /// Builds a [`SinkError::Write`] for a message of the given severity.
    pub fn write(severity: Option<Severity>, source: io::Error) -> Self {
        Self::Write { severity, source }
    }

    /// Builds a [`SinkError::Rejected`] carrying `message`.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

fn describe(severity: &Option<Severity>) -> &'static str {
    severity.map_or("raw", Severity::name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn write_error_names_the_severity() {
        let error = SinkError::write(
            Some(Severity::Warning),
            io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert_eq!(
            error.to_string(),
            "failed to write warning message: pipe closed"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn raw_write_error_is_described_as_raw() {
        let error = SinkError::write(None, io::Error::other("disk full"));
        assert_eq!(error.to_string(), "failed to write raw message: disk full");
    }

    #[test]
    fn rejected_error_has_no_source() {
        let error = SinkError::rejected("closed");
        assert_eq!(error.to_string(), "sink rejected message: closed");
        assert!(error.source().is_none());
    }
}
