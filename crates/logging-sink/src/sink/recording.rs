use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SinkError;
use crate::severity::Severity;
use crate::sink::LogSink;

/// A message captured by a [`RecordingSink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// Severity of the call, `None` for raw prints.
    pub severity: Option<Severity>,
    /// The rendered message exactly as the sink received it.
    pub message: String,
}

impl Record {
    /// Creates a record for a leveled message.
    pub fn leveled(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity: Some(severity),
            message: message.into(),
        }
    }

    /// Creates a record for a raw print.
    pub fn raw(message: impl Into<String>) -> Self {
        Self {
            severity: None,
            message: message.into(),
        }
    }
}

/// In-memory sink that remembers every call in order.
///
/// Intended as a test double: assertions inspect [`records`](Self::records)
/// after driving a logger. A sink built with [`failing`](Self::failing)
/// still records each attempt but reports [`SinkError::Rejected`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Record>>,
    failure: Option<String>,
}

impl RecordingSink {
    /// Creates a sink that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that records every message and then rejects it with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Returns a snapshot of the recorded calls.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Returns only the recorded message texts.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|record| record.message.clone()).collect()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Record> {
        mem::take(&mut *self.lock())
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, record: Record) -> Result<(), SinkError> {
        self.lock().push(record);
        match &self.failure {
            Some(reason) => Err(SinkError::rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

impl LogSink for RecordingSink {
    fn trace(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::leveled(Severity::Trace, message))
    }

    fn debug(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::leveled(Severity::Debug, message))
    }

    fn info(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::leveled(Severity::Info, message))
    }

    fn warning(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::leveled(Severity::Warning, message))
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::leveled(Severity::Error, message))
    }

    fn fatal(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::leveled(Severity::Fatal, message))
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        self.record(Record::raw(message))
    }
}
