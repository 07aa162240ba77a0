//! # Concern Evaluator Module
//!
//! Flags nutrients whose amount per serving exceeds a threshold.

use crate::config::ConcernThresholds;
use crate::nutrition_model::{NutritionField, NutritionRecord};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A nutritional concern raised for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concern {
    #[serde(rename = "high sodium")]
    HighSodium,
    #[serde(rename = "high sugar")]
    HighSugar,
    #[serde(rename = "high fat")]
    HighFat,
}

impl Concern {
    pub fn label(&self) -> &'static str {
        match self {
            Concern::HighSodium => "high sodium",
            Concern::HighSugar => "high sugar",
            Concern::HighFat => "high fat",
        }
    }

    /// The record field this concern is computed from
    pub fn field(&self) -> NutritionField {
        match self {
            Concern::HighSodium => NutritionField::Sodium,
            Concern::HighSugar => NutritionField::Sugars,
            Concern::HighFat => NutritionField::TotalFat,
        }
    }

    fn threshold(&self, thresholds: &ConcernThresholds) -> f64 {
        match self {
            Concern::HighSodium => thresholds.sodium_mg,
            Concern::HighSugar => thresholds.sugars_g,
            Concern::HighFat => thresholds.total_fat_g,
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Concerns raised for one product, in reporting order
pub type ConcernList = Vec<Concern>;

/// Concerns are evaluated, and reported, in this order
const MONITORED: [Concern; 3] = [Concern::HighSodium, Concern::HighSugar, Concern::HighFat];

lazy_static! {
    static ref LEADING_NUMBER_REGEX: Regex =
        Regex::new(r"(\d+\.?\d*)").expect("Numeric pattern should be valid");
}

/// First number in a stored value, ignoring any unit
///
/// ```rust
/// use nutrition_label::concerns::leading_number;
///
/// assert_eq!(leading_number("12.5 g"), Some(12.5));
/// assert_eq!(leading_number("160mg"), Some(160.0));
/// assert_eq!(leading_number("trace"), None);
/// ```
pub fn leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER_REGEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Concerns for `record` using the default threshold table
pub fn find_concerns(record: &NutritionRecord) -> ConcernList {
    find_concerns_with(record, &ConcernThresholds::default())
}

/// Concerns for `record` using a custom threshold table
///
/// A value must be strictly greater than its threshold. Absent fields and
/// values without a number are skipped.
pub fn find_concerns_with(record: &NutritionRecord, thresholds: &ConcernThresholds) -> ConcernList {
    let concerns: ConcernList = MONITORED
        .iter()
        .copied()
        .filter(|concern| {
            record
                .get(concern.field())
                .and_then(leading_number)
                .is_some_and(|amount| amount > concern.threshold(thresholds))
        })
        .collect();

    debug!("Nutritional concerns: {:?}", concerns);
    concerns
}
