//! crates/logging-sink/src/line_mode.rs
//! Newline policy for writer-backed sinks.

/// Controls whether a [`WriterSink`](crate::WriterSink) terminates each message with a newline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator after each message.
    #[default]
    WithNewline,
    /// Emit the message without a trailing newline.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

impl From<bool> for LineMode {
    /// `true` selects [`LineMode::WithNewline`], `false` selects [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}
