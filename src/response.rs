//! # Response Composer Module
//!
//! Builds the short human-readable summary returned after a label has been
//! analyzed. Sentences come from the Fluent resource loaded by
//! [`LocalizationManager`] and are emitted in a fixed order:
//!
//! 1. allergen alert (or the "no allergens" note)
//! 2. nutritional concerns, when any
//! 3. serving size, when known
//! 4. calories, when known
//! 5. the portion question

use crate::allergens::AllergenSet;
use crate::concerns::Concern;
use crate::errors::LabelResult;
use crate::localization::LocalizationManager;
use crate::nutrition_model::NutritionRecord;
use tracing::debug;

/// Message returned when a label carries no usable nutrition facts
pub const NO_DATA_MESSAGE: &str = "Sorry, I couldn't detect clear nutrition information from the image. Please try a clearer photo of the nutrition label.";

/// Closing question of every successful response
pub const PORTION_QUESTION: &str = "How much did you eat (whole package, half can, etc.)?";

/// Composes the analysis summary from extracted facts
pub struct ResponseComposer {
    messages: LocalizationManager,
}

impl ResponseComposer {
    /// Create a composer backed by the embedded messages
    pub fn new() -> LabelResult<Self> {
        Ok(Self::with_messages(LocalizationManager::new()?))
    }

    /// Create a composer backed by an existing message set
    pub fn with_messages(messages: LocalizationManager) -> Self {
        Self { messages }
    }

    /// Compose the summary for one analyzed label
    pub fn compose(
        &self,
        record: &NutritionRecord,
        allergens: &AllergenSet,
        concerns: &[Concern],
    ) -> String {
        if !record.has_nutrition_facts() {
            debug!("No nutrition facts in record, using fallback message");
            return self.no_data();
        }

        let mut sentences = Vec::with_capacity(5);

        if allergens.is_empty() {
            sentences.push(self.messages.get_message("no-allergens", None));
        } else {
            let labels: Vec<&str> = allergens.iter().map(|group| group.label()).collect();
            let allergens = labels.join(", ");
            sentences.push(
                self.messages
                    .get_message_with_args("allergen-alert", &[("allergens", allergens.as_str())]),
            );
        }

        if !concerns.is_empty() {
            let labels: Vec<&str> = concerns.iter().map(|concern| concern.label()).collect();
            let concerns = capitalize_first(&labels.join(", "));
            sentences.push(
                self.messages
                    .get_message_with_args("nutritional-note", &[("concerns", concerns.as_str())]),
            );
        }

        if let Some(serving_size) = record.serving_size.as_deref() {
            sentences.push(
                self.messages
                    .get_message_with_args("serving-size", &[("serving_size", serving_size)]),
            );
        }

        if let Some(calories) = record.calories.as_deref() {
            sentences.push(
                self.messages
                    .get_message_with_args("calories-per-serving", &[("calories", calories)]),
            );
        }

        sentences.push(self.messages.get_message("portion-question", None));

        let response = sentences.join(" ");
        debug!("Composed response with {} sentences", sentences.len());
        response
    }

    /// The fallback message for labels without nutrition facts
    pub fn no_data(&self) -> String {
        self.messages.get_message("no-nutrition-data", None)
    }
}

/// Compose a summary with the embedded English messages
///
/// # Examples
///
/// ```rust
/// use nutrition_label::allergens::AllergenSet;
/// use nutrition_label::nutrition_model::NutritionRecord;
/// use nutrition_label::response::{compose, NO_DATA_MESSAGE};
///
/// let response = compose(&NutritionRecord::empty(), &AllergenSet::new(), &[]).unwrap();
/// assert_eq!(response, NO_DATA_MESSAGE);
/// ```
pub fn compose(
    record: &NutritionRecord,
    allergens: &AllergenSet,
    concerns: &[Concern],
) -> LabelResult<String> {
    Ok(ResponseComposer::new()?.compose(record, allergens, concerns))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
