//! Implements the `CatalogSource` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the
//! whole app, top-to-bottom, without an ingestion service dropping files.

use crate::model::Deal;
use crate::source::CatalogSource;
use crate::Result;
use anyhow::Context;

/// A `CatalogSource` that holds its deals in memory and, by default, is seeded with a small
/// realistic flyer catalog.
pub(crate) struct TestSource {
    deals: Vec<Deal>,
}

impl TestSource {
    /// Create a new `TestSource` holding `deals`.
    pub(crate) fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }
}

impl Default for TestSource {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::new(seed_deals().expect("seed catalog data must parse"))
    }
}

#[async_trait::async_trait]
impl CatalogSource for TestSource {
    async fn fetch(&self) -> Result<Vec<Deal>> {
        Ok(self.deals.clone())
    }
}

/// Parses the seed catalog.
fn seed_deals() -> Result<Vec<Deal>> {
    serde_json::from_str(SEED_CATALOG).context("Unable to parse seed catalog JSON")
}

/// Seed catalog data: a plausible OCR extraction across three stores, including noisy prices,
/// a comma-joined combo and a numeric id.
const SEED_CATALOG: &str = r##"[
    {"id": "fg-001", "item": "Basmati Rice 2kg", "price": "$48.99", "store": "FreshGrocer", "type": "single", "unit": "each"},
    {"id": "fg-002", "item": "Sunflower Oil 1L", "price": "$31.50", "store": "FreshGrocer", "type": "single", "unit": "each"},
    {"id": "fg-003", "item": ["White Bread", "Full Cream Milk 2L"], "price": "$34.00", "store": "FreshGrocer", "type": "combo"},
    {"id": "mm-101", "item": "Jasmine Rice 2kg", "price": "$45.00", "store": "MegaMart", "type": "single", "unit": "each"},
    {"id": "mm-102", "item": "Bread,Milk,Butter", "price": "$52.90", "store": "MegaMart", "type": "combo"},
    {"id": "mm-103", "item": "Long Grain Rice 5kg", "price": "95,00", "store": "MegaMart", "type": "single", "unit": "per bag"},
    {"id": 204, "item": "Brown Bread 700g", "price": "$18.50", "store": "ValueSave", "type": "single"},
    {"id": "vs-205", "item": "Rice 2kg", "price": "two for 80", "store": "ValueSave", "type": "single", "unit": "each"},
    {"id": "vs-206", "item": ["Rice 2kg", "Cooking Oil 750ml"], "price": "$72.00", "store": "ValueSave", "type": "combo"}
]"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_catalog_parses_and_fetches() {
        let source = TestSource::default();
        let deals = source.fetch().await.unwrap();
        assert_eq!(deals.len(), 9);

        // The numeric id is normalized to a string
        assert!(deals.iter().any(|d| d.id() == "204"));

        // The comma-joined combo normalizes to three names
        let combo = deals.iter().find(|d| d.id() == "mm-102").unwrap();
        assert_eq!(combo.item().count(), 3);
    }
}
