//! Collapses near-duplicate catalog matches down to one entry per physical listing.
//!
//! The same flyer listing can be ingested twice, or re-keyed with different casing, and would
//! otherwise show up as two rows in a comparison group.

use crate::model::Deal;
use std::collections::HashSet;

/// Separates the fields of a dedup key. Unlikely to appear in scraped text.
const KEY_SEPARATOR: char = '\u{1f}';

/// Keeps the first occurrence of each distinct listing, preserving input order.
///
/// Two deals are the same listing when store, normalized item names, parsed price, type and unit
/// all agree case-insensitively; `id` deliberately does not participate.
pub fn collapse<'a>(deals: Vec<&'a Deal>) -> Vec<&'a Deal> {
    let mut seen: HashSet<String> = HashSet::new();
    deals
        .into_iter()
        .filter(|deal| seen.insert(dedup_key(deal)))
        .collect()
}

/// The identity of a physical listing.
///
/// Missing `unit` and `type` contribute empty strings; the display-only `"each"` default must
/// not leak in here, or a listing with an explicit "each" and one without would stop collapsing
/// the moment either is re-scanned. The price field uses the defensively parsed two-digit form
/// so that formatting differences ("$45" vs "45.00") collapse too.
pub fn dedup_key(deal: &Deal) -> String {
    let names = deal
        .item()
        .normalized()
        .join(",")
        .to_lowercase();
    [
        deal.store().to_lowercase(),
        names,
        deal.price_amount().to_price_string(),
        deal.kind().to_lowercase(),
        deal.unit().unwrap_or("").to_lowercase(),
    ]
    .join(&KEY_SEPARATOR.to_string())
}
