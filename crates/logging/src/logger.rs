//! crates/logging/src/logger.rs
//! The core logger: threshold filtering in front of a single sink.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use logging_sink::{LogSink, Severity, SinkError};

use crate::leveled::LeveledLog;
use crate::named::NamedLogger;
use crate::template::{self, Arg};
use crate::terminate::{FATAL_EXIT_CODE, ProcessExit, Terminate};

/// Filters messages by severity and forwards the survivors to a sink.
///
/// The threshold and the level-prefix flag are atomics, so a logger shared
/// through an [`Arc`] can be reconfigured while other threads emit. A change
/// applies to emissions that start after it; calls already past the
/// threshold check complete with the old value.
///
/// The sink is shared, never owned exclusively: dropping the logger leaves it
/// usable by anyone else holding a reference.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logging::{Arg, LeveledLog, Logger};
/// use logging_sink::{Record, RecordingSink, Severity};
///
/// let sink = Arc::new(RecordingSink::new());
/// let logger = Logger::new(sink.clone());
/// logger.set_level(Severity::Warning);
///
/// logger.info("x=%d", &[Arg::from(5)])?;
/// logger.error("x=%d", &[Arg::from(5)])?;
///
/// assert_eq!(sink.records(), vec![Record::leveled(Severity::Error, "x=5")]);
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub struct Logger {
    sink: Arc<dyn LogSink>,
    threshold: AtomicU8,
    show_level: AtomicBool,
    terminator: Arc<dyn Terminate>,
}

impl Logger {
    /// Creates a logger emitting at [`Severity::Info`] and above.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self::with_terminator(sink, Arc::new(ProcessExit))
    }

    /// Creates a logger whose fatal path ends through `terminator`.
    pub fn with_terminator(sink: Arc<dyn LogSink>, terminator: Arc<dyn Terminate>) -> Self {
        Self {
            sink,
            threshold: AtomicU8::new(Severity::Info.as_u8()),
            show_level: AtomicBool::new(true),
            terminator,
        }
    }

    /// Returns the current severity threshold.
    pub fn level(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Sets the minimum severity that will be emitted.
    pub fn set_level(&self, level: Severity) {
        let previous = self.threshold.swap(level.as_u8(), Ordering::Relaxed);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "levlog::logger",
            previous = Severity::from_u8(previous).unwrap_or_default().name(),
            current = level.name(),
            "severity threshold changed"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = previous;
    }

    /// Requests that emitted lines be shown without their level label.
    ///
    /// The flag this toggles is set to "shown" on every call, so the label is
    /// never actually hidden. Callers that rely on the label keep working;
    /// see [`level_prefix_shown`](Self::level_prefix_shown).
    pub fn hide_level_prefix(&self) {
        self.show_level.store(true, Ordering::Relaxed);
    }

    /// Reports whether lines carry their level label.
    pub fn level_prefix_shown(&self) -> bool {
        self.show_level.load(Ordering::Relaxed)
    }

    /// Reports whether a message at `severity` passes the threshold.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level()
    }

    /// Emits an already rendered `message` at `severity` when the threshold allows.
    pub fn log_message(&self, severity: Severity, message: &str) -> Result<(), SinkError> {
        if !self.enabled(severity) {
            return Ok(());
        }
        self.sink.log(severity, message)
    }

    /// Reports an already rendered fatal `message` and terminates.
    ///
    /// The message reaches the sink regardless of the threshold. When the sink
    /// rejects it, the failure is written to standard error instead, since the
    /// sink itself is what failed. Termination happens either way.
    pub fn fatal_message(&self, message: &str) -> ! {
        if let Err(error) = self.sink.fatal(message) {
            let _ = writeln!(io::stderr(), "failed to log fatal message: {error}");
        }
        self.terminator.terminate(FATAL_EXIT_CODE)
    }

    /// Creates a child logger that prefixes every message with `name`.
    pub fn named(self: &Arc<Self>, name: impl Into<String>) -> NamedLogger {
        NamedLogger::new(Arc::clone(self), name)
    }

    /// Returns the sink messages are forwarded to.
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }
}

impl LeveledLog for Logger {
    fn log(&self, severity: Severity, template: &str, args: &[Arg<'_>]) -> Result<(), SinkError> {
        if !self.enabled(severity) {
            return Ok(());
        }
        self.sink.log(severity, &template::render(template, args))
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        self.sink.print(message)
    }

    fn fatal(&self, template: &str, args: &[Arg<'_>]) -> ! {
        self.fatal_message(&template::render(template, args))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("show_level", &self.level_prefix_shown())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminate::{Terminated, UnwindingTerminator, catch_termination};
    use logging_sink::{Record, RecordingSink};

    fn recording_logger() -> (Arc<RecordingSink>, Arc<UnwindingTerminator>, Logger) {
        let sink = Arc::new(RecordingSink::new());
        let terminator = Arc::new(UnwindingTerminator::new());
        let logger = Logger::with_terminator(sink.clone(), terminator.clone());
        (sink, terminator, logger)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn new_logger_defaults_to_info_with_prefix() {
        let logger = Logger::new(Arc::new(RecordingSink::new()));
        assert_eq!(logger.level(), Severity::Info);
        assert!(logger.level_prefix_shown());
    }

    // ========================================================================
    // Threshold
    // ========================================================================

    #[test]
    fn emits_iff_severity_reaches_threshold() {
        for threshold in Severity::ALL {
            for level in Severity::ALL {
                let (sink, _, logger) = recording_logger();
                logger.set_level(threshold);

                logger.log(level, "m", &[]).expect("recording sink accepts");

                let expected = usize::from(level >= threshold);
                assert_eq!(sink.len(), expected, "level {level} threshold {threshold}");
            }
        }
    }

    #[test]
    fn filtered_message_reports_success_even_on_failing_sink() {
        let logger = Logger::new(Arc::new(RecordingSink::failing("closed")));
        logger.set_level(Severity::Error);
        assert!(logger.warning("ignored", &[]).is_ok());
    }

    #[test]
    fn threshold_change_affects_later_calls_only() {
        let (sink, _, logger) = recording_logger();
        logger.debug("before", &[]).expect("accepted");
        logger.set_level(Severity::Debug);
        logger.debug("after", &[]).expect("accepted");

        assert_eq!(sink.messages(), vec!["after"]);
        assert_eq!(logger.level(), Severity::Debug);
    }

    #[test]
    fn log_message_applies_threshold_without_rendering() {
        let (sink, _, logger) = recording_logger();
        logger.log_message(Severity::Debug, "dropped").expect("accepted");
        logger.log_message(Severity::Info, "100% literal").expect("accepted");

        assert_eq!(sink.messages(), vec!["100% literal"]);
    }

    // ========================================================================
    // Rendering and delivery
    // ========================================================================

    #[test]
    fn renders_template_before_forwarding() {
        let (sink, _, logger) = recording_logger();
        logger.set_level(Severity::Warning);

        logger.info("x=%d", &[Arg::from(5)]).expect("accepted");
        logger.error("x=%d", &[Arg::from(5)]).expect("accepted");

        assert_eq!(sink.records(), vec![Record::leveled(Severity::Error, "x=5")]);
    }

    #[test]
    fn sink_failure_is_returned_unchanged() {
        let logger = Logger::new(Arc::new(RecordingSink::failing("disk full")));
        let error = logger.error("boom", &[]).unwrap_err();
        assert!(matches!(error, SinkError::Rejected { ref message } if message == "disk full"));
    }

    #[test]
    fn print_bypasses_threshold() {
        let (sink, _, logger) = recording_logger();
        logger.set_level(Severity::Fatal);

        logger.print("raw %d").expect("accepted");
        logger.write("write").expect("accepted");
        logger.writeln("writeln").expect("accepted");

        assert_eq!(
            sink.records(),
            vec![Record::raw("raw %d"), Record::raw("write"), Record::raw("writeln")]
        );
    }

    // ========================================================================
    // Level prefix flag
    // ========================================================================

    #[test]
    fn hide_level_prefix_leaves_prefix_shown() {
        let (_, _, logger) = recording_logger();
        logger.hide_level_prefix();
        assert!(logger.level_prefix_shown());
    }

    // ========================================================================
    // Fatal path
    // ========================================================================

    #[test]
    fn fatal_forwards_regardless_of_threshold_and_terminates() {
        let (sink, terminator, logger) = recording_logger();
        logger.set_level(Severity::Fatal);

        let caught = catch_termination(|| logger.fatal("code %d", &[Arg::from(7)]));

        assert_eq!(caught, Some(Terminated { code: FATAL_EXIT_CODE }));
        assert_eq!(sink.records(), vec![Record::leveled(Severity::Fatal, "code 7")]);
        assert_eq!(terminator.calls(), 1);
    }

    #[test]
    fn fatal_terminates_even_when_sink_fails() {
        let sink = Arc::new(RecordingSink::failing("gone"));
        let terminator = Arc::new(UnwindingTerminator::new());
        let logger = Logger::with_terminator(sink.clone(), terminator.clone());

        let caught = catch_termination(|| logger.fatal_message("last words"));

        assert_eq!(caught, Some(Terminated { code: 1 }));
        assert_eq!(sink.messages(), vec!["last words"]);
        assert_eq!(terminator.last_code(), Some(1));
    }

    #[test]
    fn log_at_fatal_does_not_terminate() {
        let (sink, terminator, logger) = recording_logger();
        logger.log(Severity::Fatal, "reported", &[]).expect("accepted");

        assert_eq!(sink.len(), 1);
        assert_eq!(terminator.calls(), 0);
    }

    #[test]
    fn debug_output_shows_configuration() {
        let (_, _, logger) = recording_logger();
        logger.set_level(Severity::Error);
        let debug = format!("{logger:?}");
        assert!(debug.contains("Error"));
        assert!(debug.contains("show_level: true"));
    }
}
