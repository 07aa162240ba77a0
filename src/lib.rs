//! # Nutrition Label Analyzer
//!
//! Turns OCR text from a photographed food package into structured
//! nutrition facts, allergen groups, nutritional concerns and a short
//! human-readable summary.
//!
//! ```rust
//! use nutrition_label::{AnalyzerConfig, LabelAnalyzer};
//!
//! let analyzer = LabelAnalyzer::new(AnalyzerConfig::default()).unwrap();
//! let analysis = analyzer.analyze_text("Serving Size 1 cup (240mL) Calories 110 Sodium 75mg");
//! assert_eq!(analysis.nutrition.calories.as_deref(), Some("110"));
//! assert!(analysis.response.ends_with("How much did you eat (whole package, half can, etc.)?"));
//! ```

pub mod allergens;
pub mod analyzer;
pub mod concerns;
pub mod config;
pub mod errors;
pub mod label_parser;
pub mod localization;
pub mod nutrition_model;
pub mod nutrition_patterns;
pub mod observability;
pub mod response;
pub mod text_source;
pub mod unit_normalizer;

// Re-export commonly used types
pub use allergens::{find_allergens, AllergenGroup, AllergenSet};
pub use analyzer::{LabelAnalysis, LabelAnalyzer};
pub use concerns::{find_concerns, find_concerns_with, Concern, ConcernList};
pub use config::AnalyzerConfig;
pub use errors::{LabelError, LabelResult};
pub use label_parser::{extract, NutritionExtractor};
pub use nutrition_model::{NutritionField, NutritionRecord};
pub use response::{compose, ResponseComposer};
pub use text_source::{FileTextSource, InlineTextSource, ReaderTextSource, TextSource};
pub use unit_normalizer::normalize;
