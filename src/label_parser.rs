//! # Label Parser Module
//!
//! This module turns normalized OCR text from a food label into a
//! [`NutritionRecord`].
//!
//! ## Features
//!
//! - First-match-wins pattern batteries for serving size and calories
//! - One pattern per nutrient, tolerant of optional qualifier words
//!   ("Total Carbohydrate", "Dietary Fiber")
//! - Ingredients block isolation: header split, earliest boundary marker cut,
//!   then two fallbacks (comma-separated line, "Contains:" clause)
//!
//! Extraction never fails. A field whose patterns do not match stays absent.

use crate::config::ExtractionConfig;
use crate::nutrition_model::{NutritionField, NutritionRecord};
use crate::nutrition_patterns::{
    CALORIE_REGEXES, CONTAINS_REGEX, INGREDIENTS_HEADER_REGEX, INGREDIENT_END_MARKERS,
    INGREDIENT_INDICATORS, NUTRIENT_REGEXES, NUTRITION_KEYWORD_REGEX, SERVING_SIZE_REGEXES,
};
use regex::Regex;
use tracing::{debug, info, trace, warn};

/// Field extractor for nutrition label text
#[derive(Debug, Clone, Default)]
pub struct NutritionExtractor {
    config: ExtractionConfig,
}

impl NutritionExtractor {
    /// Create an extractor with the default configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_label::label_parser::NutritionExtractor;
    ///
    /// let extractor = NutritionExtractor::new();
    /// let record = extractor.extract("Calories 120 Sodium 45mg");
    /// assert_eq!(record.calories.as_deref(), Some("120"));
    /// assert_eq!(record.sodium.as_deref(), Some("45mg"));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom configuration
    pub fn with_config(config: ExtractionConfig) -> Self {
        debug!(
            "Creating NutritionExtractor: min_ingredients_chars={}, line_fallback={}, contains_fallback={}",
            config.min_ingredients_chars, config.enable_line_fallback, config.enable_contains_fallback
        );
        Self { config }
    }

    /// Extract every known field from `text`
    pub fn extract(&self, text: &str) -> NutritionRecord {
        if !looks_like_nutrition_label(text) {
            warn!("Extracted text doesn't appear to contain nutrition information");
        }

        let mut record = NutritionRecord::empty();

        if let Some(value) = first_match(&SERVING_SIZE_REGEXES, text) {
            record.set(NutritionField::ServingSize, value);
        }
        if let Some(value) = first_match(&CALORIE_REGEXES, text) {
            record.set(NutritionField::Calories, value);
        }
        for (field, pattern) in NUTRIENT_REGEXES.iter() {
            if let Some(value) = capture_value(pattern, text) {
                trace!("Matched {} = '{}'", field, value);
                record.set(*field, value);
            }
        }
        if let Some(value) = self.extract_ingredients(text) {
            record.set(NutritionField::Ingredients, value);
        }

        info!(
            "Extracted {} of {} nutrition fields",
            record.present_count(),
            NutritionField::ALL.len()
        );
        trace!("Extracted record:\n{}", record);
        record
    }

    /// Locate the ingredients list, trying each strategy in order
    pub fn extract_ingredients(&self, text: &str) -> Option<String> {
        if let Some(block) = self.ingredients_after_header(text) {
            debug!("Ingredients found after header ({} chars)", block.len());
            return Some(block);
        }

        if self.config.enable_line_fallback {
            if let Some(line) = ingredient_like_line(text) {
                debug!("Ingredients found as comma-separated line");
                return Some(line);
            }
        }

        if self.config.enable_contains_fallback {
            if let Some(clause) = contains_clause(text) {
                debug!("Ingredients taken from 'Contains' statement");
                return Some(clause);
            }
        }

        trace!("No ingredients found");
        None
    }

    fn ingredients_after_header(&self, text: &str) -> Option<String> {
        // Segment between the first header and the next one (or end of text)
        let candidate = INGREDIENTS_HEADER_REGEX.split(text).nth(1)?.trim();
        let block = truncate_at_boundary(candidate).trim();

        if block.chars().count() > self.config.min_ingredients_chars {
            Some(block.to_string())
        } else {
            debug!(
                "Ingredients candidate too short ({} chars), ignoring",
                block.chars().count()
            );
            None
        }
    }
}

/// Extract a nutrition record with the default configuration
///
/// # Examples
///
/// ```rust
/// use nutrition_label::label_parser::extract;
///
/// let record = extract("Serving Size 1 cup (240mL) Amount Per Serving Calories 110");
/// assert_eq!(record.serving_size.as_deref(), Some("1 cup (240mL)"));
/// assert_eq!(record.calories.as_deref(), Some("110"));
/// assert!(record.ingredients.is_none());
/// ```
pub fn extract(text: &str) -> NutritionRecord {
    NutritionExtractor::new().extract(text)
}

/// Whether `text` mentions any word typically printed on a nutrition label
pub fn looks_like_nutrition_label(text: &str) -> bool {
    NUTRITION_KEYWORD_REGEX.is_match(text)
}

/// Cut `candidate` at the earliest boundary marker, by position
///
/// Every marker is searched; the one occurring first in the text wins,
/// regardless of its place in the marker list.
pub fn truncate_at_boundary(candidate: &str) -> &str {
    // ASCII lowercasing keeps byte offsets valid for the original string
    let haystack = candidate.to_ascii_lowercase();

    let earliest = INGREDIENT_END_MARKERS
        .iter()
        .filter_map(|marker| {
            haystack
                .find(&marker.to_ascii_lowercase())
                .map(|pos| (pos, *marker))
        })
        .min_by_key(|(pos, _)| *pos);

    match earliest {
        Some((pos, marker)) => {
            trace!("Ingredients block cut at marker {:?} (byte {})", marker, pos);
            &candidate[..pos]
        }
        None => candidate,
    }
}

fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|pattern| capture_value(pattern, text))
}

fn capture_value(pattern: &Regex, text: &str) -> Option<String> {
    let value = pattern.captures(text)?.name("value")?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn ingredient_like_line(text: &str) -> Option<String> {
    text.lines()
        .find(|line| {
            let lower = line.to_lowercase();
            line.matches(',').count() >= 2
                && line.chars().count() > 30
                && INGREDIENT_INDICATORS
                    .iter()
                    .any(|indicator| lower.contains(indicator))
        })
        .map(|line| line.trim().to_string())
}

fn contains_clause(text: &str) -> Option<String> {
    let clause = CONTAINS_REGEX.captures(text)?.name("value")?.as_str().trim();
    Some(format!("Contains: {clause}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving_size_stops_at_next_section() {
        let record = extract("Serving Size 2/3 cup (55g) Amount Per Serving");
        assert_eq!(record.serving_size.as_deref(), Some("2/3 cup (55g)"));
    }

    #[test]
    fn test_serving_size_falls_through_empty_capture() {
        let record = extract("Serving Size: 2 pieces");
        assert_eq!(record.serving_size.as_deref(), Some("2 pieces"));

        // First pattern captures nothing before "Per", so the last pattern wins
        let record = extract("Serving Size Per Container 2 Serving 30g");
        assert_eq!(record.serving_size.as_deref(), Some("30g"));
    }

    #[test]
    fn test_calorie_pattern_order() {
        assert_eq!(extract("Calories 250").calories.as_deref(), Some("250"));
        assert_eq!(extract("Energy 480 kcal").calories.as_deref(), Some("480"));
        assert_eq!(extract("Cal: 90").calories.as_deref(), Some("90"));
        assert!(extract("Calories from fat").calories.is_none());
    }

    #[test]
    fn test_qualifier_group_is_not_the_value() {
        let record = extract("Total Carbohydrate 37g Dietary Fiber 4g");
        assert_eq!(record.total_carbohydrate.as_deref(), Some("37g"));
        assert_eq!(record.dietary_fiber.as_deref(), Some("4g"));

        let record = extract("Carbohydrate: 12.5 g Fiber 1g");
        assert_eq!(record.total_carbohydrate.as_deref(), Some("12.5 g"));
        assert_eq!(record.dietary_fiber.as_deref(), Some("1g"));
    }

    #[test]
    fn test_trans_fat() {
        let record = extract("Total Fat 8g Saturated Fat 1g Trans Fat 0g");
        assert_eq!(record.total_fat.as_deref(), Some("8g"));
        assert_eq!(record.saturated_fat.as_deref(), Some("1g"));
        assert_eq!(record.trans_fat.as_deref(), Some("0g"));
    }

    #[test]
    fn test_milligram_fields_require_mg() {
        let record = extract("Sodium 5% Cholesterol 10 mg");
        assert!(record.sodium.is_none());
        assert_eq!(record.cholesterol.as_deref(), Some("10 mg"));
    }

    #[test]
    fn test_truncate_picks_earliest_marker() {
        // "Contains" is listed before "Calories" but appears later in the text
        let candidate = "Water, Sugar, Salt Calories 100 Contains: Milk";
        assert_eq!(truncate_at_boundary(candidate), "Water, Sugar, Salt ");

        let candidate = "Oats, Honey\n\nNutrition Facts";
        assert_eq!(truncate_at_boundary(candidate), "Oats, Honey");

        assert_eq!(truncate_at_boundary("Oats, Honey"), "Oats, Honey");
    }

    #[test]
    fn test_truncate_is_case_insensitive() {
        assert_eq!(
            truncate_at_boundary("rice, beans, KEEP refrigerated after opening"),
            "rice, beans, "
        );
    }

    #[test]
    fn test_short_ingredient_block_is_rejected() {
        let record = extract("Ingredients: Salt.");
        assert!(record.ingredients.is_none());

        let extractor = NutritionExtractor::with_config(ExtractionConfig {
            min_ingredients_chars: 3,
            ..Default::default()
        });
        assert_eq!(
            extractor.extract_ingredients("Ingredients: Salt."),
            Some("Salt.".to_string())
        );
    }

    #[test]
    fn test_line_fallback() {
        let text = "NUTRITION\nCarbonated water, sugar, natural flavors, citric acid\nNet 12 fl oz";
        assert_eq!(
            extract(text).ingredients.as_deref(),
            Some("Carbonated water, sugar, natural flavors, citric acid")
        );
    }

    #[test]
    fn test_line_fallback_needs_indicator_word() {
        let text = "Red, green, blue, yellow and purple colored boxes";
        assert!(extract(text).ingredients.is_none());
    }

    #[test]
    fn test_contains_fallback() {
        let text = "Calories 100. Contains: Milk, Soy. Made in a facility";
        assert_eq!(
            extract(text).ingredients.as_deref(),
            Some("Contains: Milk, Soy")
        );
    }

    #[test]
    fn test_fallbacks_can_be_disabled() {
        let extractor = NutritionExtractor::with_config(ExtractionConfig {
            enable_contains_fallback: false,
            ..Default::default()
        });
        assert!(extractor
            .extract_ingredients("Contains: Milk, Soy.")
            .is_none());
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        assert_eq!(extract(""), NutritionRecord::empty());
    }

    #[test]
    fn test_nutrition_keyword_detection() {
        assert!(looks_like_nutrition_label("Nutrition Facts"));
        assert!(looks_like_nutrition_label("per serving"));
        assert!(!looks_like_nutrition_label("Recyclable bottle"));
    }
}
