//! Error types for plugin output

use std::fmt;

/// Result type alias for reporting
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug)]
pub enum ReportError {
    /// Writing output or accessing the tempfile failed
    IoError(std::io::Error),

    /// Graph definitions or tempfile contents could not be (de)serialized
    SerializationError(serde_json::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::IoError(err) => write!(f, "I/O error: {}", err),
            ReportError::SerializationError(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::IoError(err) => Some(err),
            ReportError::SerializationError(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::IoError(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::SerializationError(err)
    }
}
