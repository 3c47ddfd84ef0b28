//! The item-name field of a flyer deal and its canonical forms.
//!
//! OCR extraction is loose about shape: a deal's item field may arrive as a single name, a
//! comma-joined string, or a list of names. `ItemNames` is the typed sum that resolves the shape
//! once at ingestion, so nothing downstream re-sniffs it.

use serde::{Deserialize, Serialize};

/// Joins the lowercased, sorted names of a token key.
pub const TOKEN_KEY_DELIMITER: &str = " ||| ";

/// Joins names for human-readable display.
const DISPLAY_DELIMITER: &str = " + ";

/// The item field of a deal: one name, or a bundle of names (a "combo" when more than one).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemNames {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for ItemNames {
    fn default() -> Self {
        ItemNames::Single(String::new())
    }
}

impl From<&str> for ItemNames {
    fn from(value: &str) -> Self {
        ItemNames::Single(value.to_string())
    }
}

impl From<Vec<String>> for ItemNames {
    fn from(value: Vec<String>) -> Self {
        ItemNames::Multiple(value)
    }
}

impl ItemNames {
    /// Produces the canonical ordered list of individual item names: non-empty, trimmed, original
    /// casing retained.
    ///
    /// Shapes are resolved as follows:
    /// - a list with exactly one element containing a comma is split on commas (the ingestion
    ///   service sometimes wraps a comma-joined string in a one-element array),
    /// - a list with multiple elements is trimmed and filtered, with no further splitting,
    /// - a comma-containing string is split on commas,
    /// - a plain string becomes a one-element list.
    ///
    /// Empty or whitespace-only input degrades to an empty list; this never fails.
    pub fn normalized(&self) -> Vec<String> {
        match self {
            ItemNames::Single(s) => split_and_trim(s),
            ItemNames::Multiple(list) => match list.as_slice() {
                [only] if only.contains(',') => split_and_trim(only),
                _ => list
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
        }
    }

    /// The canonical identity of this name set: lowercase every normalized name, sort
    /// lexicographically, join with `" ||| "`.
    ///
    /// Two inputs that normalize to the same multiset of lowercase names produce the same key
    /// regardless of original order or casing.
    pub fn token_key(&self) -> String {
        let mut tokens: Vec<String> = self
            .normalized()
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        tokens.sort();
        tokens.join(TOKEN_KEY_DELIMITER)
    }

    /// Human-readable join of the normalized names, e.g. `Rice + Oil`.
    pub fn display_name(&self) -> String {
        self.normalized().join(DISPLAY_DELIMITER)
    }

    /// The number of individual names.
    pub fn count(&self) -> usize {
        self.normalized().len()
    }

    /// True when the name set bundles more than one item.
    pub fn is_combo(&self) -> bool {
        self.count() > 1
    }
}

fn split_and_trim(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple(names: &[&str]) -> ItemNames {
        ItemNames::Multiple(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_single_plain_string() {
        let names = ItemNames::from("Basmati Rice 2kg");
        assert_eq!(names.normalized(), vec!["Basmati Rice 2kg"]);
        assert!(!names.is_combo());
    }

    #[test]
    fn test_single_comma_joined_string() {
        let names = ItemNames::from("Bread, Milk , Butter");
        assert_eq!(names.normalized(), vec!["Bread", "Milk", "Butter"]);
        assert!(names.is_combo());
    }

    #[test]
    fn test_list_with_one_comma_joined_element() {
        let names = multiple(&["Bread,Milk"]);
        assert_eq!(names.normalized(), vec!["Bread", "Milk"]);
    }

    #[test]
    fn test_list_with_multiple_elements_is_not_split_further() {
        // A comma inside a multi-element list is part of the name, not a separator
        let names = multiple(&[" Rice ", "Beans, dried "]);
        assert_eq!(names.normalized(), vec!["Rice", "Beans, dried"]);
    }

    #[test]
    fn test_empty_input_degrades_to_empty_list() {
        assert!(ItemNames::from("").normalized().is_empty());
        assert!(ItemNames::from("   ").normalized().is_empty());
        assert!(multiple(&[]).normalized().is_empty());
        assert!(multiple(&["", "  "]).normalized().is_empty());
        assert!(ItemNames::from(",, ,").normalized().is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let names = ItemNames::from("Bread, Milk,Butter");
        let once = names.normalized();
        let again = ItemNames::Multiple(once.clone()).normalized();
        assert_eq!(once, again);
    }

    #[test]
    fn test_token_key_ignores_order_and_casing() {
        let a = multiple(&["Rice", "Oil"]);
        let b = multiple(&["oil", "RICE"]);
        assert_eq!(a.token_key(), "oil ||| rice");
        assert_eq!(a.token_key(), b.token_key());
    }

    #[test]
    fn test_token_key_of_single() {
        assert_eq!(ItemNames::from("Rice").token_key(), "rice");
        assert_eq!(ItemNames::from("").token_key(), "");
    }

    #[test]
    fn test_display_name() {
        let names = multiple(&["Rice", "Oil"]);
        assert_eq!(names.display_name(), "Rice + Oil");
        assert_eq!(ItemNames::from("Rice").display_name(), "Rice");
    }

    #[test]
    fn test_deserialize_string_or_list() {
        let single: ItemNames = serde_json::from_str("\"Rice\"").unwrap();
        assert_eq!(single, ItemNames::from("Rice"));

        let list: ItemNames = serde_json::from_str(r#"["Rice","Oil"]"#).unwrap();
        assert_eq!(list.normalized(), vec!["Rice", "Oil"]);
    }
}
