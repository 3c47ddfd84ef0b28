//! Builds price-sorted comparison groups from picks and the catalog.

use crate::engine::{dedup, matcher};
use crate::model::{Deal, PickedItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One comparison table: everything in the catalog that sells the same item(s) as one pick.
///
/// Derived on every run from the current picks and catalog; never persisted.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComparisonGroup {
    /// The pick's token key; the group's identity.
    item_key: String,
    /// Human-readable join of the pick's item names.
    display_name: String,
    /// True when this group compares a bundle rather than a single item.
    is_combo: bool,
    /// Deduplicated matches, ascending by parsed price; unparseable prices last.
    deals: Vec<Deal>,
}

impl ComparisonGroup {
    pub fn item_key(&self) -> &str {
        &self.item_key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_combo(&self) -> bool {
        self.is_combo
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// The best price in the group, if it has any deals at all.
    pub fn cheapest_deal(&self) -> Option<&Deal> {
        self.deals.first()
    }
}

/// Assembles one group per distinct pick.
///
/// Picks deduplicate by token key, first-seen wins, so the group order follows the order in
/// which the user picked. Within a group, deals keep catalog order among equal prices (stable
/// sort), which makes repeated runs over the same inputs byte-for-byte identical.
pub fn assemble_groups(picks: &[PickedItem], catalog: &[Deal]) -> Vec<ComparisonGroup> {
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut groups = Vec::new();

    for pick in picks {
        let item_key = pick.deal().item().token_key();
        if !seen_keys.insert(item_key.clone()) {
            continue;
        }

        let matches = matcher::find_matches(pick, catalog);
        let deduped = dedup::collapse(matches);

        let mut deals: Vec<Deal> = deduped.into_iter().cloned().collect();
        deals.sort_by_key(Deal::price_sort_key);

        let tokens = pick.tokens();
        groups.push(ComparisonGroup {
            item_key,
            display_name: pick.deal().item().display_name(),
            is_combo: matcher::is_combo_pick(pick, &tokens),
            deals,
        });
    }

    groups
}
