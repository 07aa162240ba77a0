//! # Nutrition Patterns Module
//!
//! This module contains the regex patterns and word lists used by the field
//! extractor. Every field pattern exposes the extracted text through a
//! capture group named `value`, so a pattern may carry extra groups (an
//! optional qualifier word, a terminator) without affecting what is stored.

use crate::nutrition_model::NutritionField;
use lazy_static::lazy_static;
use regex::Regex;

/// Serving size patterns, tried in order
pub const SERVING_SIZE_PATTERNS: [&str; 3] = [
    r"(?i)Serving\s+Size[:\s]*(?P<value>[^.]*?)(Serving|Amount|Calories|Per)",
    r"(?i)Serving\s+Size[:\s]*(?P<value>[0-9]+\s*[a-zA-Z]*)",
    r"(?i)Serving[:\s]*(?P<value>[0-9]+\s*[a-zA-Z]*)",
];

/// Calorie patterns, tried in order
pub const CALORIE_PATTERNS: [&str; 3] = [
    r"(?i)Calories\s+(?P<value>\d+)",
    r"(?i)Energy\s+(?P<value>\d+)\s*kcal",
    r"(?i)Cal[:\s]*(?P<value>\d+)",
];

/// One pattern per nutrient that is reported as an amount per serving
pub const NUTRIENT_PATTERNS: [(NutritionField, &str); 9] = [
    (
        NutritionField::TotalFat,
        r"(?i)Total\s+Fat\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
    (
        NutritionField::SaturatedFat,
        r"(?i)Saturated\s+Fat\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
    (
        NutritionField::TransFat,
        r"(?i)Trans\s+Fat\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
    (
        NutritionField::Cholesterol,
        r"(?i)Cholesterol\s*[:\s]*\s*(?P<value>\d+\s*mg)",
    ),
    (
        NutritionField::Sodium,
        r"(?i)Sodium\s*[:\s]*\s*(?P<value>\d+\s*mg)",
    ),
    (
        NutritionField::TotalCarbohydrate,
        r"(?i)(Total\s+)?Carbohydrate\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
    (
        NutritionField::DietaryFiber,
        r"(?i)(Dietary\s+)?Fiber\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
    (
        NutritionField::Sugars,
        r"(?i)Sugars\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
    (
        NutritionField::Protein,
        r"(?i)Protein\s*[:\s]*\s*(?P<value>\d+\.?\d*\s*[g%])",
    ),
];

/// Header that opens the ingredients block
pub const INGREDIENTS_HEADER_PATTERN: &str = r"(?i)ingredients?[:\s]";

/// "Contains: ..." allergen statement, up to the next period
pub const CONTAINS_PATTERN: &str = r"(?i)Contains[:\s]\s*(?P<value>[^.]*)";

/// Substrings that end the ingredients block (matched case-insensitively)
pub const INGREDIENT_END_MARKERS: [&str; 23] = [
    "\n\n",
    "Nutrition Facts",
    "Nutritional",
    "Allergen",
    "Contains",
    "Storage",
    "Best before",
    "Dist.",
    "Distributed by",
    "KEEP REFRIGERATED",
    "how2recycle",
    "PLASTIC",
    "BOTTLE",
    "CA CRV",
    "CTRV",
    "HI 5¢",
    "ME 5¢",
    "% Daily Value",
    "Serving size",
    "Amount per serving",
    "Calories",
    "Total Fat",
    "Cholesterol",
];

/// Words that suggest a comma-separated line is an ingredient list
pub const INGREDIENT_INDICATORS: [&str; 10] = [
    "water",
    "sugar",
    "salt",
    "oil",
    "extract",
    "acid",
    "flour",
    "starch",
    "natural",
    "artificial",
];

/// Words expected somewhere on a nutrition label
pub const NUTRITION_KEYWORDS: [&str; 10] = [
    "nutrition",
    "serving",
    "calories",
    "fat",
    "protein",
    "carbohydrate",
    "sodium",
    "sugar",
    "vitamin",
    "mineral",
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Nutrition pattern should be valid")
}

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref SERVING_SIZE_REGEXES: Vec<Regex> =
        SERVING_SIZE_PATTERNS.iter().map(|p| compile(p)).collect();
    pub static ref CALORIE_REGEXES: Vec<Regex> =
        CALORIE_PATTERNS.iter().map(|p| compile(p)).collect();
    pub static ref NUTRIENT_REGEXES: Vec<(NutritionField, Regex)> = NUTRIENT_PATTERNS
        .iter()
        .map(|(field, p)| (*field, compile(p)))
        .collect();
    pub static ref INGREDIENTS_HEADER_REGEX: Regex = compile(INGREDIENTS_HEADER_PATTERN);
    pub static ref CONTAINS_REGEX: Regex = compile(CONTAINS_PATTERN);
    pub static ref NUTRITION_KEYWORD_REGEX: Regex = compile(&format!(
        r"(?i)\b(?:{})\b",
        NUTRITION_KEYWORDS.join("|")
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile_with_value_group() {
        let all = SERVING_SIZE_REGEXES
            .iter()
            .chain(CALORIE_REGEXES.iter())
            .chain(NUTRIENT_REGEXES.iter().map(|(_, re)| re))
            .chain(std::iter::once(&*CONTAINS_REGEX));

        for re in all {
            assert!(
                re.capture_names().flatten().any(|name| name == "value"),
                "pattern without value group: {}",
                re.as_str()
            );
        }
    }

    #[test]
    fn test_nutrient_patterns_cover_numeric_fields_once() {
        let mut fields: Vec<NutritionField> = NUTRIENT_PATTERNS.iter().map(|(f, _)| *f).collect();
        fields.sort();
        fields.dedup();
        assert_eq!(fields.len(), NUTRIENT_PATTERNS.len());
        assert!(!fields.contains(&NutritionField::ServingSize));
        assert!(!fields.contains(&NutritionField::Calories));
        assert!(!fields.contains(&NutritionField::Ingredients));
    }

    #[test]
    fn test_header_pattern_casings() {
        assert!(INGREDIENTS_HEADER_REGEX.is_match("Ingredients: water"));
        assert!(INGREDIENTS_HEADER_REGEX.is_match("INGREDIENTS water"));
        assert!(INGREDIENTS_HEADER_REGEX.is_match("ingredient: water"));
        assert!(!INGREDIENTS_HEADER_REGEX.is_match("Ingredients"));
    }

    #[test]
    fn test_nutrition_keywords_are_whole_words() {
        assert!(NUTRITION_KEYWORD_REGEX.is_match("Total FAT 3g"));
        assert!(!NUTRITION_KEYWORD_REGEX.is_match("fatigue sugary"));
    }
}
