//! crates/logging/src/leveled.rs
//! Emission surface shared by the core logger and named child loggers.

use logging_sink::{Severity, SinkError};

use crate::template::Arg;

/// Leveled, template-based emission.
///
/// Implementors provide [`log`](Self::log), [`print`](Self::print) and
/// [`fatal`](Self::fatal); the per-level helpers forward to `log`.
/// Templates use printf-style directives (see [`crate::template`]).
///
/// A message below the logger's threshold is dropped without being rendered
/// and reported as `Ok(())`. Otherwise the sink's verdict is returned as is.
pub trait LeveledLog {
    /// Renders `template` and emits it at `severity` when the threshold allows.
    fn log(&self, severity: Severity, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError>;

    /// Writes `message` verbatim, bypassing the threshold.
    fn print(&self, message: &str) -> Result<(), SinkError>;

    /// Emits a fatal message regardless of the threshold and terminates the process.
    fn fatal(&self, template: &str, args: &[Arg<'_>]) -> !;

    /// Trace level logging.
    fn trace(&self, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        self.log(Severity::Trace, template, args)
    }

    /// Debug level logging.
    fn debug(&self, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        self.log(Severity::Debug, template, args)
    }

    /// Info level logging.
    fn info(&self, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        self.log(Severity::Info, template, args)
    }

    /// Warning level logging.
    fn warning(&self, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        self.log(Severity::Warning, template, args)
    }

    /// Error level logging.
    fn error(&self, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        self.log(Severity::Error, template, args)
    }

    /// Same as [`print`](Self::print).
    fn write(&self, message: &str) -> Result<(), SinkError> {
        self.print(message)
    }

    /// Same as [`print`](Self::print); line termination is the sink's concern.
    fn writeln(&self, message: &str) -> Result<(), SinkError> {
        self.print(message)
    }
}
