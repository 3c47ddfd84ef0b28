//! Types that represent catalog listings: `Deal` and `PickedItem`.

use crate::model::{Amount, ItemNames};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The unit-of-sale shown when a deal carries none.
pub const DEFAULT_UNIT: &str = "each";

/// Sort key assigned to deals whose price text cannot be parsed, so that they sort after every
/// real price. A sentinel keeps the ordering total and deterministic where NaN would not.
const UNPARSEABLE_PRICE_SENTINEL: i64 = 999_999;

/// A single priced listing extracted from a scanned store flyer.
///
/// Every field except `id` is OCR-derived and untrusted: prices are free-form text, the item
/// field has a loose shape, and `type` is advisory. Accessors apply the defensive defaults so
/// call sites never re-implement them.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Deal {
    /// Unique identifier assigned at ingestion. The feed sometimes emits numeric ids, so
    /// deserialization accepts either form and stores a string.
    #[serde(deserialize_with = "deserialize_id")]
    pub(crate) id: String,

    /// One item name or a bundle of names (see `ItemNames`).
    #[serde(default)]
    pub(crate) item: ItemNames,

    /// The price exactly as extracted, e.g. `"$45.00"`, `"R 45,00"` or worse.
    #[serde(default)]
    pub(crate) price: String,

    /// The retailer name, free text.
    #[serde(default)]
    pub(crate) store: String,

    /// Free-text classification, expected to contain "single" or "combo" but not enforced.
    #[serde(rename = "type", default)]
    pub(crate) kind: String,

    /// Optional unit-of-sale descriptor, e.g. "each", "per kg".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) unit: Option<String>,
}

impl Deal {
    pub fn new(
        id: impl Into<String>,
        item: impl Into<ItemNames>,
        price: impl Into<String>,
        store: impl Into<String>,
        kind: impl Into<String>,
        unit: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item: item.into(),
            price: price.into(),
            store: store.into(),
            kind: kind.into(),
            unit,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn item(&self) -> &ItemNames {
        &self.item
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// The unit-of-sale for display, defaulting to `"each"` when absent.
    pub fn unit_or_default(&self) -> &str {
        self.unit.as_deref().unwrap_or(DEFAULT_UNIT)
    }

    /// True when this deal bundles more than one item, or its declared type says so.
    pub fn is_combo(&self) -> bool {
        self.item.is_combo() || self.kind.to_lowercase().contains("combo")
    }

    /// The parsed price with the fallback policy applied: malformed text renders as `0.00`.
    pub fn price_amount(&self) -> Amount {
        Amount::parse_or_zero(&self.price)
    }

    /// The price used for ordering within a comparison group. Unparseable prices sort last via a
    /// large sentinel, never through NaN.
    pub fn price_sort_key(&self) -> Decimal {
        Amount::parse_money(&self.price)
            .map(|a| a.value())
            .unwrap_or_else(|_| Decimal::from(UNPARSEABLE_PRICE_SENTINEL))
    }

    /// Human-readable name of the deal's item set.
    pub fn display_name(&self) -> String {
        self.item.display_name()
    }
}

/// A deal the user has marked as a representative item to compare, along with the store they
/// picked it from.
///
/// Two picks whose item fields normalize to the same token key are one comparison group; the
/// group assembler deduplicates, not this type.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PickedItem {
    #[serde(flatten)]
    pub(crate) deal: Deal,
    pub(crate) selected_store: String,
}

impl PickedItem {
    /// Creates a pick from a catalog deal, recording the store it was picked from.
    pub fn from_deal(deal: Deal) -> Self {
        let selected_store = deal.store.clone();
        Self {
            deal,
            selected_store,
        }
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn selected_store(&self) -> &str {
        &self.selected_store
    }

    /// The pick's normalized tokens, lowercased, as consumed by the matcher.
    pub fn tokens(&self) -> Vec<String> {
        self.deal
            .item
            .normalized()
            .iter()
            .map(|s| s.to_lowercase())
            .collect()
    }
}

/// Accepts a string or a number for the `id` field.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_id() {
        let json = r#"{"id": 42, "item": "Rice", "price": "$45", "store": "A", "type": "single"}"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.id(), "42");
    }

    #[test]
    fn test_deserialize_string_id_and_missing_unit() {
        let json = r#"{"id": "d-1", "item": ["Rice","Oil"], "price": "$80", "store": "C", "type": "combo"}"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.id(), "d-1");
        assert_eq!(deal.unit(), None);
        assert_eq!(deal.unit_or_default(), DEFAULT_UNIT);
        assert!(deal.is_combo());
    }

    #[test]
    fn test_missing_item_field_degrades_to_empty() {
        let json = r#"{"id": "d-2", "price": "$5", "store": "A", "type": "single"}"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert!(deal.item().normalized().is_empty());
    }

    #[test]
    fn test_is_combo_from_kind_text() {
        let deal = Deal::new("1", "Family Pack", "$20", "A", "Mega Combo", None);
        assert!(deal.is_combo());
        let deal = Deal::new("2", "Rice", "$20", "A", "single", None);
        assert!(!deal.is_combo());
    }

    #[test]
    fn test_price_amount_fallback() {
        let deal = Deal::new("1", "Rice", "two for one", "A", "single", None);
        assert_eq!(deal.price_amount().to_price_string(), "0.00");
    }

    #[test]
    fn test_price_sort_key_sentinel() {
        let good = Deal::new("1", "Rice", "$45.00", "A", "single", None);
        let bad = Deal::new("2", "Rice", "abc", "A", "single", None);
        assert_eq!(good.price_sort_key(), Decimal::from(45));
        assert_eq!(bad.price_sort_key(), Decimal::from(999_999));
        assert!(bad.price_sort_key() > good.price_sort_key());
    }

    #[test]
    fn test_picked_item_records_store() {
        let deal = Deal::new("1", "Rice", "$45", "Store A", "single", None);
        let pick = PickedItem::from_deal(deal);
        assert_eq!(pick.selected_store(), "Store A");
        assert_eq!(pick.tokens(), vec!["rice"]);
    }

    #[test]
    fn test_picked_item_roundtrip_flattened() {
        let pick = PickedItem::from_deal(Deal::new("1", "Rice", "$45", "A", "single", None));
        let json = serde_json::to_string(&pick).unwrap();
        let back: PickedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(pick, back);
    }
}
