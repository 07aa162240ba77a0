//! # Error Types Module
//!
//! This module defines the error type used at the edges of the analyzer:
//! configuration loading, reading OCR text from a source, loading message
//! resources and serializing results. The extraction pipeline itself never
//! returns these errors; malformed label text simply produces absent fields.

use std::fmt;

/// Errors raised outside the pure extraction pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum LabelError {
    /// Configuration parsing or validation errors
    Config(String),
    /// Text source (OCR collaborator) failures
    Source(String),
    /// Input validation errors (bad path, oversized file, ...)
    Validation(String),
    /// Message resource loading errors
    Localization(String),
    /// Result serialization or output errors
    Output(String),
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::Config(msg) => write!(f, "[CONFIG] {msg}"),
            LabelError::Source(msg) => write!(f, "[SOURCE] Text extraction failed: {msg}"),
            LabelError::Validation(msg) => write!(f, "[VALIDATION] {msg}"),
            LabelError::Localization(msg) => write!(f, "[LOCALIZATION] {msg}"),
            LabelError::Output(msg) => write!(f, "[OUTPUT] {msg}"),
        }
    }
}

impl std::error::Error for LabelError {}

impl From<anyhow::Error> for LabelError {
    fn from(err: anyhow::Error) -> Self {
        LabelError::Source(err.to_string())
    }
}

impl From<std::io::Error> for LabelError {
    fn from(err: std::io::Error) -> Self {
        LabelError::Source(err.to_string())
    }
}

impl From<serde_json::Error> for LabelError {
    fn from(err: serde_json::Error) -> Self {
        LabelError::Output(err.to_string())
    }
}

/// Result type alias for convenience
pub type LabelResult<T> = Result<T, LabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_category_tag() {
        let err = LabelError::Config("bad threshold".to_string());
        assert_eq!(err.to_string(), "[CONFIG] bad threshold");

        let err = LabelError::Source("no text".to_string());
        assert!(err.to_string().starts_with("[SOURCE]"));
    }

    #[test]
    fn test_io_error_becomes_source_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LabelError = io.into();
        assert!(matches!(err, LabelError::Source(msg) if msg.contains("missing")));
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let err: LabelError = anyhow::anyhow!("engine crashed").into();
        assert_eq!(err, LabelError::Source("engine crashed".to_string()));
    }
}
