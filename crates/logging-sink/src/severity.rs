//! crates/logging-sink/src/severity.rs
//! Ordered severity levels shared by loggers and sinks.

use ::core::str::FromStr;
use std::fmt;

use thiserror::Error;

/// Severity attached to every leveled message.
///
/// Variants are declared in ascending order so the derived [`Ord`]
/// implementation doubles as the threshold comparison used by loggers:
/// a message is emitted when `severity >= threshold`.
///
/// The default is [`Severity::Info`], the threshold a new logger starts with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Fine-grained tracing output.
    Trace,
    /// Diagnostic output intended for developers.
    Debug,
    /// Routine operational messages.
    #[default]
    Info,
    /// Something unexpected that does not stop the operation.
    Warning,
    /// A failed operation.
    Error,
    /// An unrecoverable condition; the process terminates after reporting it.
    Fatal,
}

/// Error returned when parsing a [`Severity`] from an unrecognised string fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown severity '{input}'; expected trace, debug, info, warning, error or fatal")]
pub struct SeverityParseError {
    input: String,
}

impl SeverityParseError {
    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    /// Returns the lowercase name of the level.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Returns the three-letter tag console and file sinks put in front of each line.
    ///
    /// ```
    /// use logging_sink::Severity;
    ///
    /// assert_eq!(Severity::Warning.label(), "WAR");
    /// assert_eq!(Severity::Fatal.label(), "FAT");
    /// ```
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRA",
            Self::Debug => "DEB",
            Self::Info => "INF",
            Self::Warning => "WAR",
            Self::Error => "ERR",
            Self::Fatal => "FAT",
        }
    }

    /// Returns the stable numeric code of the level (`1` for trace up to `6` for fatal).
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Trace => 1,
            Self::Debug => 2,
            Self::Info => 3,
            Self::Warning => 4,
            Self::Error => 5,
            Self::Fatal => 6,
        }
    }

    /// Converts a numeric code produced by [`as_u8`](Self::as_u8) back into a level.
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Trace),
            2 => Some(Self::Debug),
            3 => Some(Self::Info),
            4 => Some(Self::Warning),
            5 => Some(Self::Error),
            6 => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_u8(code).ok_or_else(|| SeverityParseError {
                input: s.to_owned(),
            });
        }

        if trimmed.eq_ignore_ascii_case("warn") {
            return Ok(Self::Warning);
        }

        Self::ALL
            .into_iter()
            .find(|level| {
                trimmed.eq_ignore_ascii_case(level.name())
                    || trimmed.eq_ignore_ascii_case(level.label())
            })
            .ok_or_else(|| SeverityParseError {
                input: s.to_owned(),
            })
    }
}
