//! Integration tests for named child loggers.
//!
//! Children share one core logger: they add a `name: ` prefix and otherwise
//! inherit the core's threshold and sink.

use std::sync::Arc;
use std::thread;

use logging::{Arg, LeveledLog, Logger, NAME_SEPARATOR, NamedLogger};
use logging_sink::{Record, RecordingSink, Severity};

fn core_at(threshold: Severity) -> (Arc<RecordingSink>, Arc<Logger>) {
    let sink = Arc::new(RecordingSink::new());
    let logger = Arc::new(Logger::new(sink.clone()));
    logger.set_level(threshold);
    (sink, logger)
}

// ============================================================================
// Prefix Tests
// ============================================================================

/// Verifies the worker example from the logger documentation.
#[test]
fn worker_debug_is_prefixed() {
    let (sink, core) = core_at(Severity::Trace);
    let worker = core.named("worker-1");

    worker.debug("tick", &[]).unwrap();

    assert_eq!(sink.records(), vec![Record::leveled(Severity::Debug, "worker-1: tick")]);
}

/// Verifies the emitted text is exactly name, separator, rendered message.
#[test]
fn emitted_text_is_name_separator_message() {
    let (sink, core) = core_at(Severity::Info);
    let child = NamedLogger::new(Arc::clone(&core), "cache");

    child.info("hit ratio %.2f", &[Arg::from(0.5)]).unwrap();

    let expected = format!("cache{NAME_SEPARATOR}hit ratio 0.50");
    assert_eq!(sink.messages(), vec![expected]);
}

/// Verifies siblings keep their own names over one sink.
#[test]
fn siblings_share_sink_with_distinct_prefixes() {
    let (sink, core) = core_at(Severity::Info);
    let http = core.named("http");
    let db = core.named("db");

    http.info("GET %s", &[Arg::from("/")]).unwrap();
    db.error("timeout after %dms", &[Arg::from(250)]).unwrap();
    core.info("core", &[]).unwrap();

    assert_eq!(sink.messages(), vec!["http: GET /", "db: timeout after 250ms", "core"]);
}

// ============================================================================
// Shared Threshold Tests
// ============================================================================

/// Verifies a child obeys threshold changes made through the core.
#[test]
fn child_follows_core_threshold_changes() {
    let (sink, core) = core_at(Severity::Error);
    let child = core.named("job");

    child.warning("first", &[]).unwrap();
    core.set_level(Severity::Warning);
    child.warning("second", &[]).unwrap();

    assert_eq!(sink.messages(), vec!["job: second"]);
}

/// Verifies raw writes from a child are prefixed but not filtered.
#[test]
fn child_print_is_prefixed() {
    let (sink, core) = core_at(Severity::Fatal);
    core.named("raw").print("bytes").unwrap();

    assert_eq!(sink.records(), vec![Record::raw("raw: bytes")]);
}

/// Verifies a child can outlive the handle it was created from.
#[test]
fn child_keeps_core_alive() {
    let (sink, core) = core_at(Severity::Info);
    let child = core.named("orphan");
    drop(core);

    child.info("still here", &[]).unwrap();
    assert_eq!(sink.messages(), vec!["orphan: still here"]);
}

/// Verifies children can be cloned into threads.
#[test]
fn children_emit_from_threads() {
    let (sink, core) = core_at(Severity::Info);

    let handles: Vec<_> = (0..3)
        .map(|n| {
            let child = core.named(format!("t{n}"));
            thread::spawn(move || child.info("up", &[]).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut messages = sink.messages();
    messages.sort();
    assert_eq!(messages, vec!["t0: up", "t1: up", "t2: up"]);
}
