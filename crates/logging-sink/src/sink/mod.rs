//! crates/logging-sink/src/sink/mod.rs
//! The sink capability and its concrete destinations.

use std::sync::Arc;

use crate::error::SinkError;
use crate::severity::Severity;

mod null;
mod recording;
mod writer;

pub use null::NullSink;
pub use recording::{Record, RecordingSink};
pub use writer::{ConsoleSink, ConsoleStream, FileSink, LABEL_SEPARATOR, WriterSink};

/// Destination that receives fully rendered log lines.
///
/// A sink exposes one method per [`Severity`] plus an unconditional
/// [`print`](Self::print). Filtering and template rendering happen before a
/// sink is reached, so implementations only decide how a finished string is
/// delivered. Each call reports whether the destination accepted the message;
/// callers never retry.
///
/// Only the per-level methods and `print` need to be provided.
/// [`log`](Self::log) dispatches on a runtime severity.
///
/// # Examples
///
/// ```
/// use logging_sink::{LogSink, RecordingSink, Severity};
///
/// let sink = RecordingSink::new();
/// sink.log(Severity::Error, "x=5")?;
/// sink.print("raw line")?;
///
/// let records = sink.records();
/// assert_eq!(records[0].severity, Some(Severity::Error));
/// assert_eq!(records[1].severity, None);
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub trait LogSink: Send + Sync {
    /// Delivers a trace-level message.
    fn trace(&self, message: &str) -> Result<(), SinkError>;

    /// Delivers a debug-level message.
    fn debug(&self, message: &str) -> Result<(), SinkError>;

    /// Delivers an info-level message.
    fn info(&self, message: &str) -> Result<(), SinkError>;

    /// Delivers a warning-level message.
    fn warning(&self, message: &str) -> Result<(), SinkError>;

    /// Delivers an error-level message.
    fn error(&self, message: &str) -> Result<(), SinkError>;

    /// Delivers a fatal message. The sink does not terminate the process.
    fn fatal(&self, message: &str) -> Result<(), SinkError>;

    /// Delivers a message verbatim, without any level decoration.
    fn print(&self, message: &str) -> Result<(), SinkError>;

    /// Routes `message` to the method matching `severity`.
    fn log(&self, severity: Severity, message: &str) -> Result<(), SinkError> {
        match severity {
            Severity::Trace => self.trace(message),
            Severity::Debug => self.debug(message),
            Severity::Info => self.info(message),
            Severity::Warning => self.warning(message),
            Severity::Error => self.error(message),
            Severity::Fatal => self.fatal(message),
        }
    }
}

macro_rules! forward_log_sink {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<S> LogSink for $wrapper
            where
                S: LogSink + ?Sized,
            {
                fn trace(&self, message: &str) -> Result<(), SinkError> {
                    (**self).trace(message)
                }

                fn debug(&self, message: &str) -> Result<(), SinkError> {
                    (**self).debug(message)
                }

                fn info(&self, message: &str) -> Result<(), SinkError> {
                    (**self).info(message)
                }

                fn warning(&self, message: &str) -> Result<(), SinkError> {
                    (**self).warning(message)
                }

                fn error(&self, message: &str) -> Result<(), SinkError> {
                    (**self).error(message)
                }

                fn fatal(&self, message: &str) -> Result<(), SinkError> {
                    (**self).fatal(message)
                }

                fn print(&self, message: &str) -> Result<(), SinkError> {
                    (**self).print(message)
                }

                fn log(&self, severity: Severity, message: &str) -> Result<(), SinkError> {
                    (**self).log(severity, message)
                }
            }
        )+
    };
}

forward_log_sink!(&S, Box<S>, Arc<S>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dispatches_to_the_matching_method() {
        let sink = RecordingSink::new();
        for level in Severity::ALL {
            sink.log(level, level.name()).expect("recording sink accepts");
        }

        let records = sink.records();
        assert_eq!(records.len(), Severity::ALL.len());
        for (record, level) in records.iter().zip(Severity::ALL) {
            assert_eq!(record.severity, Some(level));
            assert_eq!(record.message, level.name());
        }
    }

    #[test]
    fn shared_wrappers_forward_to_the_inner_sink() {
        let sink = Arc::new(RecordingSink::new());
        let boxed: Box<dyn LogSink> = Box::new(Arc::clone(&sink));

        boxed.warning("via box").expect("accepted");
        let by_ref: &RecordingSink = &sink;
        LogSink::print(&by_ref, "via reference").expect("accepted");

        assert_eq!(sink.messages(), vec!["via box", "via reference"]);
    }
}
