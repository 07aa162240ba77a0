//! # Analyzer Configuration Module
//!
//! This module defines configuration structures for label analysis,
//! including extraction heuristics, concern thresholds, text source limits,
//! logging and CLI output settings. Every structure has sensible defaults;
//! `AnalyzerConfig::from_env()` applies overrides from environment variables
//! (optionally loaded from a `.env` file).

use crate::errors::{LabelError, LabelResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

// Constants for analyzer configuration
pub const DEFAULT_MIN_INGREDIENTS_CHARS: usize = 10;
pub const DEFAULT_SODIUM_THRESHOLD_MG: f64 = 500.0;
pub const DEFAULT_SUGARS_THRESHOLD_G: f64 = 20.0;
pub const DEFAULT_TOTAL_FAT_THRESHOLD_G: f64 = 15.0;
pub const MAX_FILE_SIZE: u64 = 1024 * 1024; // 1MB limit for OCR transcripts
pub const DEFAULT_EXCERPT_CHARS: usize = 500;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Options for the field extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// A header-delimited ingredients block must be strictly longer than this (in characters)
    pub min_ingredients_chars: usize,
    /// Whether to look for a comma-separated ingredient line when no header is found
    pub enable_line_fallback: bool,
    /// Whether to fall back to a "Contains: ..." clause as the ingredients value
    pub enable_contains_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_ingredients_chars: DEFAULT_MIN_INGREDIENTS_CHARS,
            enable_line_fallback: true,
            enable_contains_fallback: true,
        }
    }
}

/// Threshold table used to flag nutritional concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcernThresholds {
    /// Sodium per serving in milligrams
    pub sodium_mg: f64,
    /// Sugars per serving in grams
    pub sugars_g: f64,
    /// Total fat per serving in grams
    pub total_fat_g: f64,
}

impl Default for ConcernThresholds {
    fn default() -> Self {
        Self {
            sodium_mg: DEFAULT_SODIUM_THRESHOLD_MG,
            sugars_g: DEFAULT_SUGARS_THRESHOLD_G,
            total_fat_g: DEFAULT_TOTAL_FAT_THRESHOLD_G,
        }
    }
}

/// Limits applied when reading OCR text from a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Maximum accepted transcript size in bytes
    pub max_file_size: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line output
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(LabelError::Config(format!(
                "Unknown log format '{other}'. Expected 'pretty' or 'json'"
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for the crate's own events (off, error, warn, info, debug, trace)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// CLI output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Number of characters of extracted text echoed in text mode
    pub excerpt_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

/// Top-level configuration for the analyzer and its binary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub extraction: ExtractionConfig,
    pub thresholds: ConcernThresholds,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

impl AnalyzerConfig {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> LabelResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// Missing keys keep their defaults. Used by `from_env` and by tests,
    /// which pass a closure over a map instead of touching the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> LabelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("NUTRITION_LOG_LEVEL") {
            config.logging.level = level.trim().to_lowercase();
        }
        if let Some(format) = lookup("NUTRITION_LOG_FORMAT") {
            config.logging.format = format.parse()?;
        }
        if let Some(size) = parse_var(&lookup, "NUTRITION_MAX_FILE_SIZE")? {
            config.source.max_file_size = size;
        }
        if let Some(chars) = parse_var(&lookup, "NUTRITION_EXCERPT_CHARS")? {
            config.output.excerpt_chars = chars;
        }
        if let Some(chars) = parse_var(&lookup, "NUTRITION_MIN_INGREDIENTS_CHARS")? {
            config.extraction.min_ingredients_chars = chars;
        }
        if let Some(value) = parse_var(&lookup, "NUTRITION_SODIUM_THRESHOLD_MG")? {
            config.thresholds.sodium_mg = value;
        }
        if let Some(value) = parse_var(&lookup, "NUTRITION_SUGARS_THRESHOLD_G")? {
            config.thresholds.sugars_g = value;
        }
        if let Some(value) = parse_var(&lookup, "NUTRITION_FAT_THRESHOLD_G")? {
            config.thresholds.total_fat_g = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> LabelResult<()> {
        if self.source.max_file_size == 0 {
            return Err(LabelError::Config(
                "Maximum file size cannot be 0".to_string(),
            ));
        }

        if self.output.excerpt_chars == 0 {
            return Err(LabelError::Config(
                "Excerpt length cannot be 0".to_string(),
            ));
        }

        let thresholds = [
            ("sodium", self.thresholds.sodium_mg),
            ("sugars", self.thresholds.sugars_g),
            ("total fat", self.thresholds.total_fat_g),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(LabelError::Config(format!(
                    "Invalid {name} threshold: {value}"
                )));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(LabelError::Config(format!(
                "Unknown log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> LabelResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| LabelError::Config(format!("Invalid value for {key} ('{raw}'): {e}"))),
        None => Ok(None),
    }
}
