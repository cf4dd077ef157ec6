//! crates/logging/src/config.rs
//! Logger configuration from code, environment variables or serialized data.

use ::core::str::FromStr;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use logging_sink::{ConsoleSink, FileSink, LogSink, NullSink, Severity, SeverityParseError, SinkError};
use thiserror::Error;

use crate::logger::Logger;

/// Environment variable holding the severity threshold.
pub const LEVEL_ENV: &str = "LEVLOG_LEVEL";

/// Environment variable holding the destination.
pub const DESTINATION_ENV: &str = "LEVLOG_DESTINATION";

/// Where a configured logger writes.
///
/// The textual form accepted by [`FromStr`] and produced by [`Display`](fmt::Display):
/// `stdout`, `stderr`, `null`, `file:<path>`, and on unix `syslog` or
/// `syslog:<facility>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Destination {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// Discard everything.
    Null,
    /// Append to the file at the given path.
    File(PathBuf),
    /// The system logger with the given facility.
    #[cfg(unix)]
    Syslog(logging_sink::syslog::SyslogFacility),
}

impl Destination {
    /// Opens the sink described by this destination.
    pub fn open(&self) -> Result<Arc<dyn LogSink>, SinkError> {
        let sink: Arc<dyn LogSink> = match self {
            Self::Stdout => Arc::new(ConsoleSink::stdout()),
            Self::Stderr => Arc::new(ConsoleSink::stderr()),
            Self::Null => Arc::new(NullSink),
            Self::File(path) => Arc::new(FileSink::append(path)?),
            #[cfg(unix)]
            Self::Syslog(facility) => {
                use logging_sink::syslog::{DEFAULT_SYSLOG_TAG, SyslogConfig, SyslogSink};
                Arc::new(SyslogSink::open(SyslogConfig::new(*facility, DEFAULT_SYSLOG_TAG)))
            }
        };
        Ok(sink)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
            Self::Null => f.write_str("null"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            #[cfg(unix)]
            Self::Syslog(facility) => write!(f, "syslog:{facility}"),
        }
    }
}

impl FromStr for Destination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (kind, argument) = match trimmed.split_once(':') {
            Some((kind, argument)) => (kind, Some(argument)),
            None => (trimmed, None),
        };

        match (kind.to_ascii_lowercase().as_str(), argument) {
            ("stdout", None) => Ok(Self::Stdout),
            ("stderr", None) => Ok(Self::Stderr),
            ("null" | "none", None) => Ok(Self::Null),
            ("file", Some(path)) if !path.is_empty() => Ok(Self::File(PathBuf::from(path))),
            #[cfg(unix)]
            ("syslog", None) => Ok(Self::Syslog(Default::default())),
            #[cfg(unix)]
            ("syslog", Some(facility)) => Ok(Self::Syslog(facility.parse().map_err(
                |_| ConfigError::UnknownFacility(facility.to_owned()),
            )?)),
            _ => Err(ConfigError::InvalidDestination(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Destination {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.to_string()
    }
}

/// Errors raised while reading a [`LoggerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A severity value could not be parsed.
    #[error("invalid value for {var}: {source}")]
    InvalidLevel {
        /// Name of the variable or field that held the value.
        var: &'static str,
        /// Parse failure.
        #[source]
        source: SeverityParseError,
    },
    /// A destination string did not match any known form.
    #[error("invalid destination '{0}'; expected stdout, stderr, null, file:<path> or syslog[:<facility>]")]
    InvalidDestination(String),
    /// A syslog facility name was not recognised.
    #[error("unknown syslog facility '{0}'")]
    UnknownFacility(String),
}

/// Settings used to build a [`Logger`].
///
/// # Examples
///
/// ```
/// use logging::{Destination, LoggerConfig};
/// use logging_sink::Severity;
///
/// let config = LoggerConfig::from_lookup(|key| match key {
///     "LEVLOG_LEVEL" => Some("warn".to_owned()),
///     "LEVLOG_DESTINATION" => Some("null".to_owned()),
///     _ => None,
/// })?;
/// assert_eq!(config.level, Severity::Warning);
/// assert_eq!(config.destination, Destination::Null);
///
/// let logger = config.build()?;
/// assert_eq!(logger.level(), Severity::Warning);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Minimum severity that is emitted.
    pub level: Severity,
    /// Where messages go.
    pub destination: Destination,
}

impl LoggerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables keep their defaults (`info`, `stdout`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(LEVEL_ENV) {
            config.level = value.parse().map_err(|source| ConfigError::InvalidLevel {
                var: LEVEL_ENV,
                source,
            })?;
        }

        if let Some(value) = lookup(DESTINATION_ENV) {
            config.destination = value.parse()?;
        }

        Ok(config)
    }

    /// Opens the destination and returns a logger at the configured level.
    pub fn build(&self) -> Result<Logger, SinkError> {
        let logger = Logger::new(self.destination.open()?);
        logger.set_level(self.level);
        Ok(logger)
    }
}
