//! crates/logging/src/named.rs
//! Child loggers that prefix every line with a fixed name.

use std::sync::Arc;

use logging_sink::{Severity, SinkError};

use crate::leveled::LeveledLog;
use crate::logger::Logger;
use crate::template::{self, Arg};

/// Text placed between a child logger's name and the message.
pub const NAME_SEPARATOR: &str = ": ";

/// A logger that prefixes every message with `name` + [`NAME_SEPARATOR`].
///
/// The template is rendered first and the prefix added afterwards, so a `%`
/// inside the name is never interpreted. Filtering, sink delivery, and the
/// fatal path are those of the shared core [`Logger`]; changing the core's
/// threshold affects every child built from it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logging::{LeveledLog, Logger};
/// use logging_sink::{RecordingSink, Severity};
///
/// let sink = Arc::new(RecordingSink::new());
/// let core = Arc::new(Logger::new(sink.clone()));
/// core.set_level(Severity::Trace);
///
/// let worker = core.named("worker-1");
/// worker.debug("tick", &[])?;
///
/// assert_eq!(sink.messages(), vec!["worker-1: tick"]);
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
#[derive(Clone, Debug)]
pub struct NamedLogger {
    logger: Arc<Logger>,
    name: Arc<str>,
}

impl NamedLogger {
    /// Wraps `logger`, prefixing its output with `name`. Any name is accepted,
    /// including the empty string.
    pub fn new(logger: Arc<Logger>, name: impl Into<String>) -> Self {
        Self {
            logger,
            name: Arc::from(name.into()),
        }
    }

    /// Returns the prefix name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the core logger this child delegates to.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    fn decorate(&self, message: &str) -> String {
        let mut decorated =
            String::with_capacity(self.name.len() + NAME_SEPARATOR.len() + message.len());
        decorated.push_str(&self.name);
        decorated.push_str(NAME_SEPARATOR);
        decorated.push_str(message);
        decorated
    }
}

impl LeveledLog for NamedLogger {
    fn log(&self, severity: Severity, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        if !self.logger.enabled(severity) {
            return Ok(());
        }
        let rendered = template::render(template, args);
        self.logger.log_message(severity, &self.decorate(&rendered))
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        self.logger.print(&self.decorate(message))
    }

    fn fatal(&self, template: &str, args: &[Arg<'_>]) -> ! {
        let rendered = template::render(template, args);
        self.logger.fatal_message(&self.decorate(&rendered))
    }
}
