//! # Unit Normalizer Module
//!
//! Rewrites common OCR misreads of units into canonical units before field
//! extraction runs. The most frequent confusion on nutrition labels is the
//! letter `g` read as the digit `9` ("129" for "12g", "160m9" for "160mg").

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, trace};

/// A single rewrite rule: a digit run followed by a misread unit token
struct UnitRule {
    name: &'static str,
    pattern: Regex,
    unit: &'static str,
}

impl UnitRule {
    fn new(name: &'static str, pattern: &str, unit: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Unit normalization pattern should be valid"),
            unit,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                // A canonical unit already follows the match, so this is a real number
                if caps.name("unit").is_some() {
                    return caps[0].to_string();
                }
                format!("{} {}", &caps["amount"], self.unit)
            })
            .into_owned()
    }
}

// Multi-character tokens come before the bare "9" so "160m9" becomes "160 mg", not "160m g"
lazy_static! {
    static ref UNIT_RULES: Vec<UnitRule> = vec![
        UnitRule::new("m9", r"(?i)\b(?P<amount>\d+)\s*m9\b", "mg"),
        UnitRule::new(
            "9",
            r"(?i)\b(?P<amount>\d+)\s*9\b(?P<unit>\s*(?:kcal|cal|mg|oz|g)\b)?",
            "g",
        ),
        UnitRule::new("ozz", r"(?i)\b(?P<amount>\d+)\s*ozz\b", "oz"),
        UnitRule::new("cal", r"(?i)\b(?P<amount>\d+)\s*cal\b", "Cal"),
    ];
}

/// Normalize OCR unit misreads in `text`
///
/// Rules run in a fixed order, each rewriting every non-overlapping match in
/// the output of the previous rule.
///
/// # Examples
///
/// ```rust
/// use nutrition_label::unit_normalizer::normalize;
///
/// assert_eq!(normalize("Sodium 160m9"), "Sodium 160 mg");
/// assert_eq!(normalize("Sugars 129"), "Sugars 12 g");
/// assert_eq!(normalize("Net Wt 12ozz"), "Net Wt 12 oz");
/// ```
pub fn normalize(text: &str) -> String {
    let mut result = text.to_string();
    for rule in UNIT_RULES.iter() {
        let rewritten = rule.apply(&result);
        if rewritten != result {
            trace!("Unit rule '{}' rewrote text", rule.name);
            result = rewritten;
        }
    }
    debug!(
        "Normalized {} characters of OCR text (changed: {})",
        text.len(),
        result != text
    );
    result
}
