//! # Allergen Matcher Module
//!
//! Scans ingredient text for common allergens and collapses synonyms
//! ("whey", "casein", "dairy", ...) into canonical allergen groups.
//!
//! The lexicon is built from the group table itself, so every term that can
//! match maps to exactly one group.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

/// Canonical allergen groups, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AllergenGroup {
    #[serde(rename = "milk")]
    Milk,
    #[serde(rename = "eggs")]
    Eggs,
    #[serde(rename = "peanuts")]
    Peanuts,
    #[serde(rename = "tree nuts")]
    TreeNuts,
    #[serde(rename = "soy")]
    Soy,
    #[serde(rename = "wheat/gluten")]
    WheatGluten,
    #[serde(rename = "fish")]
    Fish,
    #[serde(rename = "shellfish")]
    Shellfish,
    #[serde(rename = "sulfites")]
    Sulfites,
    #[serde(rename = "sesame")]
    Sesame,
    #[serde(rename = "mustard")]
    Mustard,
}

impl AllergenGroup {
    /// Human-readable group label
    pub fn label(&self) -> &'static str {
        match self {
            AllergenGroup::Milk => "milk",
            AllergenGroup::Eggs => "eggs",
            AllergenGroup::Peanuts => "peanuts",
            AllergenGroup::TreeNuts => "tree nuts",
            AllergenGroup::Soy => "soy",
            AllergenGroup::WheatGluten => "wheat/gluten",
            AllergenGroup::Fish => "fish",
            AllergenGroup::Shellfish => "shellfish",
            AllergenGroup::Sulfites => "sulfites",
            AllergenGroup::Sesame => "sesame",
            AllergenGroup::Mustard => "mustard",
        }
    }
}

impl fmt::Display for AllergenGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct allergen groups found in a product
pub type AllergenSet = BTreeSet<AllergenGroup>;

/// Term → group table
pub const ALLERGEN_GROUPS: [(AllergenGroup, &[&str]); 11] = [
    (AllergenGroup::Milk, &["milk", "dairy", "lactose", "whey", "casein"]),
    (AllergenGroup::Eggs, &["egg", "eggs"]),
    (AllergenGroup::Peanuts, &["peanut", "peanuts"]),
    (
        AllergenGroup::TreeNuts,
        &[
            "tree nut", "tree nuts", "almond", "almonds", "walnut", "walnuts", "cashew",
            "cashews", "pistachio", "pistachios", "hazelnut", "hazelnuts", "pecan", "pecans",
        ],
    ),
    (AllergenGroup::Soy, &["soy", "soya", "tofu", "edamame"]),
    (
        AllergenGroup::WheatGluten,
        &["wheat", "gluten", "barley", "rye", "spelt", "triticale"],
    ),
    (AllergenGroup::Fish, &["fish"]),
    (
        AllergenGroup::Shellfish,
        &["shellfish", "crustacean", "crustaceans", "shrimp", "crab", "lobster"],
    ),
    (AllergenGroup::Sulfites, &["sulfite", "sulfites"]),
    (AllergenGroup::Sesame, &["sesame"]),
    (AllergenGroup::Mustard, &["mustard"]),
];

/// A lexicon entry: the term, its whole-word matcher and its group
struct AllergenTerm {
    term: &'static str,
    pattern: Regex,
    group: AllergenGroup,
}

lazy_static! {
    static ref ALLERGEN_LEXICON: Vec<AllergenTerm> = ALLERGEN_GROUPS
        .iter()
        .flat_map(|(group, terms)| {
            terms.iter().map(move |term| AllergenTerm {
                term: *term,
                pattern: Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                    .expect("Allergen term pattern should be valid"),
                group: *group,
            })
        })
        .collect();
    static ref MAY_CONTAIN_REGEX: Regex =
        Regex::new(r"may\s+contain\s+([^.]*)").expect("May-contain pattern should be valid");
}

/// Lexicon terms matched in `text`, in lexicon order
///
/// Terms found inside a "may contain" clause are listed a second time after
/// the general scan; callers that need groups should use [`find_allergens`].
pub fn find_allergen_terms(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let mut found = scan_terms(&lower);

    if let Some(caps) = MAY_CONTAIN_REGEX.captures(&lower) {
        let clause = caps.get(1).map_or("", |m| m.as_str());
        trace!("Scanning 'may contain' clause: '{}'", clause);
        found.extend(scan_terms(clause));
    }

    found
}

/// Allergen groups present in the ingredients text
///
/// Returns an empty set when there is no ingredients text.
///
/// # Examples
///
/// ```rust
/// use nutrition_label::allergens::{find_allergens, AllergenGroup};
///
/// let groups = find_allergens(Some("Sugar, whey powder, almonds. May contain peanuts."));
/// let labels: Vec<&str> = groups.iter().map(|g| g.label()).collect();
/// assert_eq!(labels, vec!["milk", "peanuts", "tree nuts"]);
///
/// assert!(find_allergens(None).is_empty());
/// ```
pub fn find_allergens(ingredients: Option<&str>) -> AllergenSet {
    let Some(text) = ingredients else {
        return AllergenSet::new();
    };

    let groups: AllergenSet = find_allergen_terms(text)
        .into_iter()
        .filter_map(group_for_term)
        .collect();

    debug!(
        "Found {} allergen groups: {:?}",
        groups.len(),
        groups.iter().map(|g| g.label()).collect::<Vec<_>>()
    );
    groups
}

/// The group a lexicon term belongs to
pub fn group_for_term(term: &str) -> Option<AllergenGroup> {
    ALLERGEN_LEXICON
        .iter()
        .find(|entry| entry.term == term)
        .map(|entry| entry.group)
}

fn scan_terms(lower: &str) -> Vec<&'static str> {
    ALLERGEN_LEXICON
        .iter()
        .filter(|entry| entry.pattern.is_match(lower))
        .map(|entry| entry.term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_covers_group_table() {
        let term_count: usize = ALLERGEN_GROUPS.iter().map(|(_, terms)| terms.len()).sum();
        assert_eq!(ALLERGEN_LEXICON.len(), term_count);
        assert_eq!(term_count, 44);
    }

    #[test]
    fn test_synonyms_collapse_to_group() {
        let groups = find_allergens(Some("whey protein concentrate"));
        assert_eq!(groups.into_iter().collect::<Vec<_>>(), vec![AllergenGroup::Milk]);
    }

    #[test]
    fn test_whole_word_matching() {
        // "eggplant" and "ryegrass" are not eggs or rye, "fishy" is not fish
        assert!(find_allergens(Some("eggplant, ryegrass, fishy flavor")).is_empty());
        assert_eq!(
            find_allergens(Some("EGG whites")).into_iter().collect::<Vec<_>>(),
            vec![AllergenGroup::Eggs]
        );
    }

    #[test]
    fn test_may_contain_terms_recorded_twice() {
        let terms = find_allergen_terms("Oats. May contain sesame.");
        assert_eq!(terms, vec!["sesame", "sesame"]);
        assert_eq!(
            find_allergens(Some("Oats. May contain sesame.")).len(),
            1
        );
    }

    #[test]
    fn test_multi_word_terms() {
        let groups = find_allergens(Some("Processed in a facility with tree nuts"));
        assert!(groups.contains(&AllergenGroup::TreeNuts));
    }

    #[test]
    fn test_group_for_term() {
        assert_eq!(group_for_term("casein"), Some(AllergenGroup::Milk));
        assert_eq!(group_for_term("lobster"), Some(AllergenGroup::Shellfish));
        assert_eq!(group_for_term("celery"), None);
    }

    #[test]
    fn test_labels_serialize_as_strings() {
        let set: AllergenSet = [AllergenGroup::WheatGluten, AllergenGroup::TreeNuts]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["tree nuts","wheat/gluten"]"#);
    }
}
