//! crates/logging-sink/src/syslog.rs
//! Syslog destination.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly rather than a dedicated
//! syslog crate. Messages are always passed as the argument of a fixed `"%s"`
//! format so a `%` inside a log line is never interpreted by syslog(3).

use ::core::str::FromStr;
use std::ffi::CString;
use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

use crate::error::SinkError;
use crate::severity::Severity;
use crate::sink::LogSink;

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER).
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

/// Error returned when a facility name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown syslog facility '{0}'")]
pub struct SyslogFacilityParseError(String);

impl SyslogFacility {
    /// Parses a facility name, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("kernel"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "auth" => Some(Self::Auth),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Returns the lowercase facility name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl Default for SyslogFacility {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyslogFacility {
    type Err = SyslogFacilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| SyslogFacilityParseError(s.to_owned()))
    }
}

/// Default ident passed to `openlog(3)`.
pub const DEFAULT_SYSLOG_TAG: &str = "levlog";

/// Facility and tag used when opening the syslog connection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and tag.
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Opens the syslog connection and returns a guard closing it on drop.
    ///
    /// syslog(3) keeps the ident pointer, so the first tag opened in the
    /// process is kept for the process lifetime; later calls reuse it.
    pub fn open(&self) -> SyslogGuard {
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(self.tag.as_str())
                .or_else(|_| CString::new(DEFAULT_SYSLOG_TAG))
                .unwrap_or_default()
        });

        // SAFETY: `ident` lives in a static and stays valid for the rest of
        // the process, as openlog requires.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
        }

        SyslogGuard { _private: () }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

/// Syslog priorities used by [`SyslogSink`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl SyslogPriority {
    /// Maps a [`Severity`] onto the closest syslog priority.
    ///
    /// Syslog has no level below `LOG_DEBUG`, so trace shares it.
    pub const fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Trace | Severity::Debug => Self::Debug,
            Severity::Info => Self::Info,
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
            Severity::Fatal => Self::Critical,
        }
    }
}

/// Sends `message` to syslog(3) with the given priority.
pub fn syslog_message(priority: SyslogPriority, message: &str) -> Result<(), SinkError> {
    let c_message = CString::new(message).map_err(|_| SinkError::Unsupported {
        reason: "syslog messages cannot contain NUL bytes",
    })?;

    // SAFETY: both pointers are valid NUL-terminated strings for the duration
    // of the call, and the fixed "%s" format consumes exactly one argument.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), c_message.as_ptr());
    }
    Ok(())
}

/// RAII guard that closes the syslog connection when dropped.
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions beyond a prior openlog, which
        // constructing the guard guarantees.
        unsafe {
            libc::closelog();
        }
    }
}

/// Sink routing messages to the system logger.
///
/// Raw prints use `LOG_NOTICE`; leveled messages follow
/// [`SyslogPriority::for_severity`]. Dropping the sink closes the connection.
#[derive(Debug)]
pub struct SyslogSink {
    config: SyslogConfig,
    _guard: SyslogGuard,
}

impl SyslogSink {
    /// Opens syslog with `config` and returns a sink writing to it.
    pub fn open(config: SyslogConfig) -> Self {
        let guard = config.open();
        Self {
            config,
            _guard: guard,
        }
    }

    /// Returns the configuration the sink was opened with.
    pub fn config(&self) -> &SyslogConfig {
        &self.config
    }
}

impl LogSink for SyslogSink {
    fn trace(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::for_severity(Severity::Trace), message)
    }

    fn debug(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::for_severity(Severity::Debug), message)
    }

    fn info(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::for_severity(Severity::Info), message)
    }

    fn warning(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::for_severity(Severity::Warning), message)
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::for_severity(Severity::Error), message)
    }

    fn fatal(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::for_severity(Severity::Fatal), message)
    }

    fn print(&self, message: &str) -> Result<(), SinkError> {
        syslog_message(SyslogPriority::Notice, message)
    }
}
