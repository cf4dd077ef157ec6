//! Integration tests for severity threshold filtering.
//!
//! These tests drive a shared [`Logger`] through its public surface and check
//! which messages reach the sink, including when the threshold changes while
//! other threads are emitting.

use std::sync::Arc;
use std::thread;

use logging::{Arg, LeveledLog, Logger};
use logging_sink::{Record, RecordingSink, Severity, WriterSink};

fn logger_at(threshold: Severity) -> (Arc<RecordingSink>, Arc<Logger>) {
    let sink = Arc::new(RecordingSink::new());
    let logger = Arc::new(Logger::new(sink.clone()));
    logger.set_level(threshold);
    (sink, logger)
}

// ============================================================================
// Threshold Comparison Tests
// ============================================================================

/// Verifies the default threshold drops trace and debug only.
#[test]
fn default_threshold_is_info() {
    let sink = Arc::new(RecordingSink::new());
    let logger = Logger::new(sink.clone());

    logger.trace("t", &[]).unwrap();
    logger.debug("d", &[]).unwrap();
    logger.info("i", &[]).unwrap();
    logger.warning("w", &[]).unwrap();
    logger.error("e", &[]).unwrap();

    assert_eq!(sink.messages(), vec!["i", "w", "e"]);
}

/// Verifies every helper routes to its own severity.
#[test]
fn helpers_route_to_matching_severity() {
    let (sink, logger) = logger_at(Severity::Trace);

    logger.trace("a", &[]).unwrap();
    logger.debug("b", &[]).unwrap();
    logger.info("c", &[]).unwrap();
    logger.warning("d", &[]).unwrap();
    logger.error("e", &[]).unwrap();

    let severities: Vec<_> = sink.records().into_iter().map(|r| r.severity).collect();
    assert_eq!(
        severities,
        vec![
            Some(Severity::Trace),
            Some(Severity::Debug),
            Some(Severity::Info),
            Some(Severity::Warning),
            Some(Severity::Error),
        ]
    );
}

/// Verifies the warning threshold example: info is dropped, error renders.
#[test]
fn warning_threshold_example() {
    let (sink, logger) = logger_at(Severity::Warning);

    assert!(logger.log(Severity::Info, "x=%d", &[Arg::from(5)]).is_ok());
    assert!(sink.is_empty());

    logger.log(Severity::Error, "x=%d", &[Arg::from(5)]).unwrap();
    assert_eq!(sink.records(), vec![Record::leveled(Severity::Error, "x=5")]);
}

/// Verifies a fatal threshold still lets `log(Fatal, ..)` through.
#[test]
fn fatal_threshold_keeps_fatal_severity() {
    let (sink, logger) = logger_at(Severity::Fatal);

    logger.error("dropped", &[]).unwrap();
    logger.log(Severity::Fatal, "kept", &[]).unwrap();

    assert_eq!(sink.records(), vec![Record::leveled(Severity::Fatal, "kept")]);
}

/// Verifies a dropped message does not touch a failing sink.
#[test]
fn filtered_messages_never_reach_failing_sink() {
    let sink = Arc::new(RecordingSink::failing("unplugged"));
    let logger = Logger::new(sink.clone());
    logger.set_level(Severity::Error);

    assert!(logger.info("quiet", &[]).is_ok());
    assert!(logger.error("loud", &[]).is_err());
    assert_eq!(sink.messages(), vec!["loud"]);
}

// ============================================================================
// Raw Output Tests
// ============================================================================

/// Verifies print, write and writeln bypass the threshold and the renderer.
#[test]
fn raw_output_is_unfiltered_and_verbatim() {
    let (sink, logger) = logger_at(Severity::Fatal);

    logger.print("50%").unwrap();
    logger.write("%d").unwrap();
    logger.writeln("done").unwrap();

    assert_eq!(
        sink.records(),
        vec![Record::raw("50%"), Record::raw("%d"), Record::raw("done")]
    );
}

/// Verifies a writer sink labels leveled lines and leaves raw lines bare.
#[test]
fn writer_sink_output_format() {
    let sink = Arc::new(WriterSink::new(Vec::new()));
    let logger = Logger::new(sink.clone());

    logger.warning("low disk: %d%%", &[Arg::from(7)]).unwrap();
    logger.print("plain").unwrap();

    let output = sink.with_writer(|buffer| String::from_utf8(buffer.clone()).unwrap());
    assert_eq!(output, "WAR | low disk: 7%\nplain\n");
}

// ============================================================================
// Concurrency Tests
// ============================================================================

/// Verifies concurrent emitters see a threshold change made mid-flight.
#[test]
fn threshold_change_is_visible_across_threads() {
    let (sink, logger) = logger_at(Severity::Error);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..25 {
                    logger
                        .error("worker %d item %d", &[Arg::from(worker), Arg::from(i)])
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(sink.len(), 100);

    logger.set_level(Severity::Fatal);
    let handle = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || logger.error("after", &[]).unwrap())
    };
    handle.join().unwrap();

    assert_eq!(sink.len(), 100);
}

/// Verifies the logger is shareable across threads by type.
#[test]
fn logger_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Logger>();
    assert_send_sync::<logging::NamedLogger>();
}
