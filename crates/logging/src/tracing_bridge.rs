//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the leveled logger.
//!
//! Two directions are supported:
//!
//! - [`TracingSink`] is a [`LogSink`] that re-emits every message as a
//!   `tracing` event under the `levlog` target, so a [`Logger`] can feed an
//!   application's existing subscriber.
//! - [`LoggerLayer`] is a `tracing-subscriber` layer that forwards events into
//!   a [`Logger`], letting the standard tracing macros share the logger's
//!   threshold and sink.
//!
//! Events whose target starts with `levlog` are ignored by the layer, which
//! keeps a logger wired both ways from feeding itself.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{Logger, init_tracing};
//! use logging_sink::ConsoleSink;
//!
//! let logger = Arc::new(Logger::new(Arc::new(ConsoleSink::stderr())));
//! init_tracing(logger)?;
//!
//! tracing::warn!(target: "app::db", "pool exhausted");
//! ```

use std::fmt;
use std::sync::Arc;

use logging_sink::{LogSink, Severity, SinkError};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::logger::Logger;

/// Target used for events emitted by [`TracingSink`].
pub const TRACING_TARGET: &str = "levlog";

/// A sink that turns every message into a `tracing` event.
///
/// Fatal messages become `error` events carrying `fatal = true`; raw writes
/// become `info` events carrying `raw = true`. Emission never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn trace(&self, message: &str) -> Result<(), SinkError> {
        tracing::trace!(target: "levlog", "{message}");
        Ok(())
    }

    fn debug(&self, message: &str) -> Result<(), SinkError> {
        tracing::debug!(target: "levlog", "{message}");
        Ok(())
    }

    fn info(&self, message: &str) -> Result<(), SinkError> {
        tracing::info!(target: "levlog", "{message}");
        Ok(())
    }

    fn warning(&self, message: &str) -> Result<(), SinkError> {
        tracing::warn!(target: "levlog", "{message}");
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        tracing::error!(target: "levlog", "{message}");
        Ok(())
    }

    fn fatal(&self, message: &str) -> Result<(), SinkError> {
        tracing::error!(target: "levlog", fatal = true, "{message}");
        Ok(())
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        tracing::info!(target: "levlog", raw = true, "{message}");
        Ok(())
    }
}

/// A tracing layer that forwards events into a [`Logger`].
///
/// The event level is mapped onto a [`Severity`] and checked against the
/// logger's threshold before the message field is extracted. Sink failures
/// are dropped: a layer has no caller to report them to.
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    /// Creates a layer that forwards into `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Returns the logger events are forwarded to.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Map a tracing level to a severity.
    const fn level_to_severity(level: &Level) -> Severity {
        match *level {
            Level::TRACE => Severity::Trace,
            Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Info,
            Level::WARN => Severity::Warning,
            Level::ERROR => Severity::Error,
        }
    }

    fn is_own_target(target: &str) -> bool {
        target
            .strip_prefix(TRACING_TARGET)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl fmt::Debug for LoggerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerLayer")
            .field("logger", &self.logger)
            .finish()
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_own_target(metadata.target()) {
            return;
        }

        let severity = Self::level_to_severity(metadata.level());
        if !self.logger.enabled(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            let _ = self.logger.log_message(severity, &message);
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber that forwards tracing events into `logger`.
///
/// Fails when a global subscriber is already set.
pub fn init_tracing(logger: Arc<Logger>) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .try_init()
}

/// Like [`init_tracing`], with an extra filter layer in front of the logger.
///
/// # Example
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(logger, EnvFilter::from_default_env())?;
/// ```
pub fn init_tracing_with_filter<F>(logger: Arc<Logger>, filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .try_init()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use logging_sink::{Record, RecordingSink};
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    fn layered_logger(threshold: Severity) -> (Arc<RecordingSink>, Arc<Logger>) {
        let sink = Arc::new(RecordingSink::new());
        let logger = Arc::new(Logger::new(sink.clone()));
        logger.set_level(threshold);
        (sink, logger)
    }

    #[test]
    fn test_level_to_severity() {
        assert_eq!(LoggerLayer::level_to_severity(&Level::TRACE), Severity::Trace);
        assert_eq!(LoggerLayer::level_to_severity(&Level::DEBUG), Severity::Debug);
        assert_eq!(LoggerLayer::level_to_severity(&Level::INFO), Severity::Info);
        assert_eq!(LoggerLayer::level_to_severity(&Level::WARN), Severity::Warning);
        assert_eq!(LoggerLayer::level_to_severity(&Level::ERROR), Severity::Error);
    }

    #[test]
    fn test_own_target_detection() {
        assert!(LoggerLayer::is_own_target("levlog"));
        assert!(LoggerLayer::is_own_target("levlog::logger"));
        assert!(!LoggerLayer::is_own_target("levlogger"));
        assert!(!LoggerLayer::is_own_target("app::levlog"));
    }

    #[test]
    fn layer_forwards_events_above_threshold() {
        let (sink, logger) = layered_logger(Severity::Warning);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "app", "below threshold");
            tracing::warn!(target: "app", "disk at {}%", 91);
            tracing::error!(target: "app::db", "connection lost");
        });

        assert_eq!(
            sink.records(),
            vec![
                Record::leveled(Severity::Warning, "disk at 91%"),
                Record::leveled(Severity::Error, "connection lost"),
            ]
        );
    }

    #[test]
    fn layer_ignores_its_own_target() {
        let (sink, logger) = layered_logger(Severity::Trace);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "levlog", "from a tracing sink");
            logger.set_level(Severity::Debug);
        });

        assert!(sink.is_empty());
    }

    /// Collects `(level, message, fatal)` for every event it sees.
    #[derive(Clone, Default)]
    struct Capture {
        events: Arc<Mutex<Vec<(Level, String, bool)>>>,
    }

    #[derive(Default)]
    struct CaptureVisitor {
        message: String,
        fatal: bool,
    }

    impl tracing::field::Visit for CaptureVisitor {
        fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
            if field.name() == "fatal" {
                self.fatal = value;
            }
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = CaptureVisitor::default();
            event.record(&mut visitor);
            assert_eq!(event.metadata().target(), TRACING_TARGET);
            self.events.lock().unwrap().push((
                *event.metadata().level(),
                visitor.message,
                visitor.fatal,
            ));
        }
    }

    #[test]
    fn tracing_sink_emits_events_under_levlog_target() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingSink;
            sink.warning("careful").unwrap();
            sink.fatal("gone").unwrap();
            sink.print("raw").unwrap();
        });

        let events = capture.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                (Level::WARN, "careful".to_owned(), false),
                (Level::ERROR, "gone".to_owned(), true),
                (Level::INFO, "raw".to_owned(), false),
            ]
        );
    }
}
