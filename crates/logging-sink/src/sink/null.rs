use crate::error::SinkError;
use crate::sink::LogSink;

/// Sink that accepts and discards every message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NullSink;

impl LogSink for NullSink {
    fn trace(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn debug(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn info(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn warning(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn error(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn fatal(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn print(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn every_level_succeeds() {
        for level in Severity::ALL {
            assert!(NullSink.log(level, "dropped").is_ok());
        }
        assert!(NullSink.print("dropped").is_ok());
    }
}
