//! crates/logging-sink/src/sink/writer.rs
//! Sinks that stream labelled lines into an [`io::Write`] destination.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SinkError;
use crate::line_mode::LineMode;
use crate::severity::Severity;
use crate::sink::LogSink;

/// Text placed between the severity label and the message.
pub const LABEL_SEPARATOR: &str = " | ";

/// Sink that writes each message as `"<LABEL> | <message>"` into a writer.
///
/// The writer sits behind a mutex so a single sink can be shared between
/// threads. Each message is assembled in full before one `write_all` call,
/// which keeps concurrent lines from interleaving mid-line. Raw prints are
/// written without a label. Whether a newline follows is decided by the
/// sink's [`LineMode`].
///
/// # Examples
///
/// ```
/// use logging_sink::{LineMode, LogSink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.warning("disk almost full")?;
/// sink.print("plain")?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output, "WAR | disk almost full\nplain\n");
///
/// let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.info("ready")?;
/// assert_eq!(sink.into_inner(), b"INF | ready".to_vec());
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that appends a newline after each message.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Runs `f` with shared access to the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.lock())
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        // A panic while holding the lock cannot leave a half-written line
        // behind: the buffer is written with a single call.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    fn emit(&self, severity: Option<Severity>, message: &str) -> Result<(), SinkError> {
        let mut line = String::with_capacity(message.len() + 8);
        if let Some(severity) = severity {
            line.push_str(severity.label());
            line.push_str(LABEL_SEPARATOR);
        }
        line.push_str(message);
        if self.line_mode.append_newline() {
            line.push('\n');
        }

        self.lock()
            .write_all(line.as_bytes())
            .map_err(|error| SinkError::write(severity, error))
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<W> Default for WriterSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &*self.lock())
            .field("line_mode", &self.line_mode)
            .finish()
    }
}

impl<W> LogSink for WriterSink<W>
where
    W: Write + Send,
{
    fn trace(&self, message: &str) -> Result<(), SinkError> {
        self.emit(Some(Severity::Trace), message)
    }

    fn debug(&self, message: &str) -> Result<(), SinkError> {
        self.emit(Some(Severity::Debug), message)
    }

    fn info(&self, message: &str) -> Result<(), SinkError> {
        self.emit(Some(Severity::Info), message)
    }

    fn warning(&self, message: &str) -> Result<(), SinkError> {
        self.emit(Some(Severity::Warning), message)
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        self.emit(Some(Severity::Error), message)
    }

    fn fatal(&self, message: &str) -> Result<(), SinkError> {
        self.emit(Some(Severity::Fatal), message)
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        self.emit(None, message)
    }
}

/// Standard stream a [`ConsoleSink`] writes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsoleStream {
    /// Process standard output.
    Stdout,
    /// Process standard error.
    Stderr,
}

impl Write for ConsoleStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout => io::stdout().lock().write(buf),
            Self::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().lock().write_all(buf),
            Self::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::Stderr => io::stderr().flush(),
        }
    }
}

/// Sink printing labelled lines to the console.
pub type ConsoleSink = WriterSink<ConsoleStream>;

impl WriterSink<ConsoleStream> {
    /// Console sink bound to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    /// Console sink bound to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }
}

/// Sink writing labelled lines to a file.
///
/// [`FileSink::create`] truncates an existing file; [`FileSink::append`] keeps it.
///
/// The file is written unbuffered so each line reaches the operating system
/// as soon as the call returns.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    inner: WriterSink<File>,
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Self::open(path.as_ref(), OpenOptions::new().write(true).create(true).truncate(true))
    }

    /// Opens the file at `path` for appending, creating it when missing.
    pub fn append(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Self::open(path.as_ref(), OpenOptions::new().append(true).create(true))
    }

    fn open(path: &Path, options: &OpenOptions) -> Result<Self, SinkError> {
        let file = options.open(path).map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: WriterSink::new(file),
        })
    }

    /// Path of the destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn trace(&self, message: &str) -> Result<(), SinkError> {
        self.inner.trace(message)
    }

    fn debug(&self, message: &str) -> Result<(), SinkError> {
        self.inner.debug(message)
    }

    fn info(&self, message: &str) -> Result<(), SinkError> {
        self.inner.info(message)
    }

    fn warning(&self, message: &str) -> Result<(), SinkError> {
        self.inner.warning(message)
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        self.inner.error(message)
    }

    fn fatal(&self, message: &str) -> Result<(), SinkError> {
        self.inner.fatal(message)
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        self.inner.print(message)
    }
}
