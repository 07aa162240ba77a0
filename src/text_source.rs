//! # Text Source Module
//!
//! Collaborators that hand raw OCR text to the analyzer. Running an OCR
//! engine is out of scope for this crate; a source supplies text that was
//! already recognized, from a transcript file, a reader (stdin) or memory.

use crate::config::{SourceConfig, MAX_FILE_SIZE};
use crate::errors::{LabelError, LabelResult};
use anyhow::Context;
use std::cell::RefCell;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Something that can produce raw OCR text for a label
pub trait TextSource {
    /// Return the recognized text
    fn extract_text(&self) -> LabelResult<String>;

    /// Short description used in log messages
    fn describe(&self) -> String {
        "text source".to_string()
    }
}

/// OCR transcript stored in a file
#[derive(Debug, Clone)]
pub struct FileTextSource {
    path: PathBuf,
    max_file_size: u64,
}

impl FileTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_config(path: impl Into<PathBuf>, config: &SourceConfig) -> Self {
        Self {
            path: path.into(),
            max_file_size: config.max_file_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the path names a readable, non-empty file within the size limit
    pub fn validate(&self) -> LabelResult<()> {
        let path = self.path();

        if !path.exists() {
            return Err(LabelError::Validation(format!(
                "Transcript file does not exist: {}",
                path.display()
            )));
        }

        let metadata = fs::metadata(path)?;

        if !metadata.is_file() {
            return Err(LabelError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        let file_size = metadata.len();
        if file_size == 0 {
            return Err(LabelError::Validation(format!(
                "Transcript file is empty: {}",
                path.display()
            )));
        }

        if file_size > self.max_file_size {
            return Err(LabelError::Validation(format!(
                "Transcript file too large: {} bytes (maximum allowed: {} bytes)",
                file_size, self.max_file_size
            )));
        }

        debug!("Transcript file validated: {} ({} bytes)", path.display(), file_size);
        Ok(())
    }
}

impl TextSource for FileTextSource {
    fn extract_text(&self) -> LabelResult<String> {
        self.validate()?;

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read transcript {}", self.path.display()))?;

        info!(
            "Read {} characters of OCR text from {}",
            text.chars().count(),
            self.path.display()
        );
        Ok(text)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path().display())
    }
}

/// OCR text read once from any reader, such as stdin
pub struct ReaderTextSource<R: Read> {
    reader: RefCell<R>,
    max_bytes: u64,
}

impl<R: Read> ReaderTextSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &SourceConfig::default())
    }

    pub fn with_config(reader: R, config: &SourceConfig) -> Self {
        Self {
            reader: RefCell::new(reader),
            max_bytes: config.max_file_size,
        }
    }
}

impl<R: Read> TextSource for ReaderTextSource<R> {
    fn extract_text(&self) -> LabelResult<String> {
        let mut reader = self.reader.try_borrow_mut().map_err(|_| {
            LabelError::Source("Reader is already being consumed".to_string())
        })?;

        // Read one byte past the limit so oversized input is detected
        let mut buffer = String::new();
        (&mut *reader)
            .take(self.max_bytes.saturating_add(1))
            .read_to_string(&mut buffer)
            .context("Failed to read OCR text from input")?;

        if buffer.len() as u64 > self.max_bytes {
            return Err(LabelError::Validation(format!(
                "Input too large (maximum allowed: {} bytes)",
                self.max_bytes
            )));
        }

        info!("Read {} characters of OCR text from input", buffer.chars().count());
        Ok(buffer)
    }

    fn describe(&self) -> String {
        "reader".to_string()
    }
}

/// OCR text already held in memory
#[derive(Debug, Clone)]
pub struct InlineTextSource {
    text: String,
}

impl InlineTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for InlineTextSource {
    fn extract_text(&self) -> LabelResult<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "inline text".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_reads_transcript() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Calories 120").unwrap();

        let source = FileTextSource::new(file.path());
        assert_eq!(source.extract_text().unwrap(), "Calories 120");
        assert_eq!(source.path(), file.path());
        assert!(source.describe().starts_with("file "));
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileTextSource::new("/nonexistent/label.txt");
        assert!(matches!(source.extract_text(), Err(LabelError::Validation(_))));
    }

    #[test]
    fn test_file_source_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileTextSource::new(dir.path());
        let err = source.validate().unwrap_err();
        assert!(err.to_string().contains("not a file"));
    }

    #[test]
    fn test_file_source_rejects_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let err = FileTextSource::new(file.path()).validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_file_source_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Serving Size 1 cup").unwrap();

        let config = SourceConfig { max_file_size: 4 };
        let err = FileTextSource::with_config(file.path(), &config)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_reader_source() {
        let source = ReaderTextSource::new(Cursor::new("Sodium 45mg"));
        assert_eq!(source.extract_text().unwrap(), "Sodium 45mg");
    }

    #[test]
    fn test_reader_source_size_limit() {
        let config = SourceConfig { max_file_size: 3 };
        let source = ReaderTextSource::with_config(Cursor::new("Sodium 45mg"), &config);
        assert!(matches!(source.extract_text(), Err(LabelError::Validation(_))));
    }

    #[test]
    fn test_reader_source_unbounded_limit() {
        let config = SourceConfig {
            max_file_size: u64::MAX,
        };
        assert!(AnalyzerConfig {
            source: config.clone(),
            ..Default::default()
        }
        .validate()
        .is_ok());

        let source = ReaderTextSource::with_config(Cursor::new("Calories 90"), &config);
        assert_eq!(source.extract_text().unwrap(), "Calories 90");
    }

    #[test]
    fn test_reader_source_invalid_utf8() {
        let source = ReaderTextSource::new(Cursor::new(vec![0xff, 0xfe, 0xfd]));
        assert!(matches!(source.extract_text(), Err(LabelError::Source(_))));
    }

    #[test]
    fn test_inline_source() {
        let source = InlineTextSource::new("Protein 3g");
        assert_eq!(source.extract_text().unwrap(), "Protein 3g");
    }
}
