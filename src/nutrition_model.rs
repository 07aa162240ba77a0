//! # Nutrition Record Data Model
//!
//! This module defines the structured record produced by the field extractor.
//! A record holds one optional raw string per nutrition-facts field; a field
//! that was not found on the label is `None`, never an empty string or zero.
//!
//! ## Usage
//!
//! ```rust
//! use nutrition_label::nutrition_model::{NutritionField, NutritionRecord};
//!
//! let record = NutritionRecord {
//!     calories: Some("230".to_string()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(record.get(NutritionField::Calories), Some("230"));
//! assert!(record.has_nutrition_facts());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of fields a nutrition record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionField {
    ServingSize,
    Calories,
    TotalFat,
    SaturatedFat,
    TransFat,
    Cholesterol,
    Sodium,
    TotalCarbohydrate,
    DietaryFiber,
    Sugars,
    Protein,
    Ingredients,
}

impl NutritionField {
    /// Every field, in record order
    pub const ALL: [NutritionField; 12] = [
        NutritionField::ServingSize,
        NutritionField::Calories,
        NutritionField::TotalFat,
        NutritionField::SaturatedFat,
        NutritionField::TransFat,
        NutritionField::Cholesterol,
        NutritionField::Sodium,
        NutritionField::TotalCarbohydrate,
        NutritionField::DietaryFiber,
        NutritionField::Sugars,
        NutritionField::Protein,
        NutritionField::Ingredients,
    ];

    /// The serialized key of this field
    pub fn as_str(&self) -> &'static str {
        match self {
            NutritionField::ServingSize => "serving_size",
            NutritionField::Calories => "calories",
            NutritionField::TotalFat => "total_fat",
            NutritionField::SaturatedFat => "saturated_fat",
            NutritionField::TransFat => "trans_fat",
            NutritionField::Cholesterol => "cholesterol",
            NutritionField::Sodium => "sodium",
            NutritionField::TotalCarbohydrate => "total_carbohydrate",
            NutritionField::DietaryFiber => "dietary_fiber",
            NutritionField::Sugars => "sugars",
            NutritionField::Protein => "protein",
            NutritionField::Ingredients => "ingredients",
        }
    }
}

impl fmt::Display for NutritionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrition facts extracted from label text
///
/// Values are the raw matched substrings (e.g. `"8g"`, `"160mg"`,
/// `"2/3 cup (55g)"`), trimmed. Serializes as a flat object with exactly the
/// twelve field keys; absent fields become `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NutritionRecord {
    pub serving_size: Option<String>,
    pub calories: Option<String>,
    pub total_fat: Option<String>,
    pub saturated_fat: Option<String>,
    pub trans_fat: Option<String>,
    pub cholesterol: Option<String>,
    pub sodium: Option<String>,
    pub total_carbohydrate: Option<String>,
    pub dietary_fiber: Option<String>,
    pub sugars: Option<String>,
    pub protein: Option<String>,
    pub ingredients: Option<String>,
}

impl NutritionRecord {
    /// A record with every field absent
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a field by name
    pub fn get(&self, field: NutritionField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Iterate over every field in record order, present or not
    pub fn iter(&self) -> impl Iterator<Item = (NutritionField, Option<&str>)> + '_ {
        NutritionField::ALL
            .iter()
            .map(move |&field| (field, self.get(field)))
    }

    /// Number of fields that hold a value
    pub fn present_count(&self) -> usize {
        self.iter().filter(|(_, value)| value.is_some()).count()
    }

    /// Whether any field other than `ingredients` was extracted
    pub fn has_nutrition_facts(&self) -> bool {
        self.iter()
            .any(|(field, value)| field != NutritionField::Ingredients && value.is_some())
    }

    pub(crate) fn set(&mut self, field: NutritionField, value: String) {
        *self.slot_mut(field) = Some(value);
    }

    fn slot(&self, field: NutritionField) -> &Option<String> {
        match field {
            NutritionField::ServingSize => &self.serving_size,
            NutritionField::Calories => &self.calories,
            NutritionField::TotalFat => &self.total_fat,
            NutritionField::SaturatedFat => &self.saturated_fat,
            NutritionField::TransFat => &self.trans_fat,
            NutritionField::Cholesterol => &self.cholesterol,
            NutritionField::Sodium => &self.sodium,
            NutritionField::TotalCarbohydrate => &self.total_carbohydrate,
            NutritionField::DietaryFiber => &self.dietary_fiber,
            NutritionField::Sugars => &self.sugars,
            NutritionField::Protein => &self.protein,
            NutritionField::Ingredients => &self.ingredients,
        }
    }

    fn slot_mut(&mut self, field: NutritionField) -> &mut Option<String> {
        match field {
            NutritionField::ServingSize => &mut self.serving_size,
            NutritionField::Calories => &mut self.calories,
            NutritionField::TotalFat => &mut self.total_fat,
            NutritionField::SaturatedFat => &mut self.saturated_fat,
            NutritionField::TransFat => &mut self.trans_fat,
            NutritionField::Cholesterol => &mut self.cholesterol,
            NutritionField::Sodium => &mut self.sodium,
            NutritionField::TotalCarbohydrate => &mut self.total_carbohydrate,
            NutritionField::DietaryFiber => &mut self.dietary_fiber,
            NutritionField::Sugars => &mut self.sugars,
            NutritionField::Protein => &mut self.protein,
            NutritionField::Ingredients => &mut self.ingredients,
        }
    }
}

impl fmt::Display for NutritionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in self.iter() {
            writeln!(f, "{}: {}", field, value.unwrap_or("-"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record = NutritionRecord::empty();
        assert_eq!(record.present_count(), 0);
        assert!(!record.has_nutrition_facts());
        assert!(record.iter().all(|(_, value)| value.is_none()));
    }

    #[test]
    fn test_ingredients_alone_are_not_nutrition_facts() {
        let record = NutritionRecord {
            ingredients: Some("Water, Sugar, Salt".to_string()),
            ..Default::default()
        };
        assert!(!record.has_nutrition_facts());
        assert_eq!(record.present_count(), 1);
    }

    #[test]
    fn test_set_and_get_round_through_every_field() {
        let mut record = NutritionRecord::empty();
        for field in NutritionField::ALL {
            record.set(field, field.as_str().to_uppercase());
        }
        for field in NutritionField::ALL {
            assert_eq!(record.get(field), Some(field.as_str().to_uppercase().as_str()));
        }
    }

    #[test]
    fn test_serialized_keys_match_field_names() {
        let json = serde_json::to_value(NutritionRecord::empty()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), NutritionField::ALL.len());
        for field in NutritionField::ALL {
            assert_eq!(object.get(field.as_str()), Some(&serde_json::Value::Null));
        }
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<NutritionRecord, _> =
            serde_json::from_str(r#"{"calories": "100", "vitamin_c": "2mg"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_lists_every_field() {
        let record = NutritionRecord {
            sodium: Some("160mg".to_string()),
            ..Default::default()
        };
        let text = record.to_string();
        assert!(text.contains("sodium: 160mg"));
        assert!(text.contains("protein: -"));
        assert_eq!(text.lines().count(), 12);
    }
}
