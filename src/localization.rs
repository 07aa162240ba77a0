//! # Localization Module
//!
//! Loads the Fluent messages used to compose the analysis summary. The
//! English resource is embedded in the binary so message lookup does not
//! depend on the working directory.

use crate::errors::{LabelError, LabelResult};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Default language of the embedded resource
pub const DEFAULT_LANGUAGE: &str = "en";

const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for analysis messages
pub struct LocalizationManager {
    language: String,
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a manager backed by the embedded English messages
    pub fn new() -> LabelResult<Self> {
        Self::from_source(DEFAULT_LANGUAGE, EN_MESSAGES)
    }

    /// Create a manager from Fluent source text
    pub fn from_source(language: &str, source: &str) -> LabelResult<Self> {
        let locale: LanguageIdentifier = language.parse().map_err(|e| {
            LabelError::Localization(format!("Invalid language identifier '{language}': {e}"))
        })?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            LabelError::Localization(format!("Failed to parse messages for '{language}': {errors:?}"))
        })?;

        let mut bundle = FluentBundle::new(vec![locale]);
        // Placeables are interpolated into plain sentences, not bidi text
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            LabelError::Localization(format!("Failed to load messages for '{language}': {errors:?}"))
        })?;

        Ok(Self {
            language: language.to_string(),
            bundle,
        })
    }

    /// Language of the loaded messages
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether a message with this key exists
    pub fn has_message(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }

    /// Format the message `key`, substituting `args` into its placeables
    ///
    /// Unknown keys yield `"Missing translation: <key>"`.
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let Some(pattern) = self.bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {key}");
        };

        let fluent_args: Option<FluentArgs> = args.map(|args| {
            args.iter()
                .map(|(name, value)| (*name, FluentValue::from(*value)))
                .collect()
        });

        let mut formatted = String::new();
        let mut errors = Vec::new();
        if self
            .bundle
            .write_pattern(&mut formatted, pattern, fluent_args.as_ref(), &mut errors)
            .is_err()
            || !errors.is_empty()
        {
            tracing::warn!("Errors formatting message '{}': {:?}", key, errors);
        }

        formatted
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }
}
