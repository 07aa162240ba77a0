//! # Label Analyzer Module
//!
//! Runs the whole pipeline for one label:
//! normalize → extract → allergens / concerns → compose.

use crate::allergens::{find_allergens, AllergenSet};
use crate::concerns::{find_concerns_with, ConcernList};
use crate::config::AnalyzerConfig;
use crate::errors::LabelResult;
use crate::label_parser::NutritionExtractor;
use crate::nutrition_model::NutritionRecord;
use crate::response::{ResponseComposer, NO_DATA_MESSAGE};
use crate::text_source::TextSource;
use crate::unit_normalizer::normalize;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Everything produced for one analyzed label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnalysis {
    /// OCR text after unit normalization
    pub extracted_text: String,
    pub nutrition: NutritionRecord,
    pub allergens: AllergenSet,
    pub concerns: ConcernList,
    /// Human-readable summary
    pub response: String,
}

impl LabelAnalysis {
    /// The result for text that carries no usable label data
    pub fn no_data(text: impl Into<String>) -> Self {
        Self {
            extracted_text: text.into(),
            nutrition: NutritionRecord::empty(),
            allergens: AllergenSet::new(),
            concerns: ConcernList::new(),
            response: NO_DATA_MESSAGE.to_string(),
        }
    }

    /// Whether any nutrition fact was extracted
    pub fn has_data(&self) -> bool {
        self.nutrition.has_nutrition_facts()
    }
}

/// Nutrition label analyzer
pub struct LabelAnalyzer {
    config: AnalyzerConfig,
    extractor: NutritionExtractor,
    composer: ResponseComposer,
}

impl LabelAnalyzer {
    /// Create an analyzer for the given configuration
    pub fn new(config: AnalyzerConfig) -> LabelResult<Self> {
        config.validate()?;
        let extractor = NutritionExtractor::with_config(config.extraction.clone());
        let composer = ResponseComposer::new()?;
        Ok(Self {
            config,
            extractor,
            composer,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze raw OCR text
    pub fn analyze_text(&self, raw_text: &str) -> LabelAnalysis {
        if raw_text.trim().is_empty() {
            warn!("No text to analyze");
            return LabelAnalysis::no_data(raw_text);
        }

        let normalized = normalize(raw_text);
        debug!("Normalized OCR text ({} chars)", normalized.len());

        let nutrition = self.extractor.extract(&normalized);
        let allergens = find_allergens(nutrition.ingredients.as_deref());
        let concerns = find_concerns_with(&nutrition, &self.config.thresholds);
        let response = self.composer.compose(&nutrition, &allergens, &concerns);

        info!(
            "Label analyzed: {} fields, {} allergen groups, {} concerns",
            nutrition.present_count(),
            allergens.len(),
            concerns.len()
        );

        LabelAnalysis {
            extracted_text: normalized,
            nutrition,
            allergens,
            concerns,
            response,
        }
    }

    /// Pull text from `source` and analyze it
    ///
    /// A failing source yields the "no data" result instead of an error.
    pub fn analyze_source(&self, source: &dyn TextSource) -> LabelAnalysis {
        match source.extract_text() {
            Ok(text) => self.analyze_text(&text),
            Err(e) => {
                warn!("Could not get text from {}: {}", source.describe(), e);
                LabelAnalysis::no_data(String::new())
            }
        }
    }
}
