//! Decides whether a catalog deal is "the same product(s)" as a picked item.

use crate::model::{Deal, PickedItem};

/// How many more item names a catalog combo may carry than the pick before it stops matching.
///
/// A tolerance of one lets "bread + milk + butter" show up when comparing a "bread + milk" pick
/// without dragging in unrelated larger bundles. Tunable; it directly trades match recall against
/// precision.
pub const COMBO_EXTRA_ITEMS_ALLOWED: usize = 1;

/// Returns the catalog deals matching `pick`, in catalog order.
pub fn find_matches<'a>(pick: &PickedItem, catalog: &'a [Deal]) -> Vec<&'a Deal> {
    let tokens = pick.tokens();
    let combo = is_combo_pick(pick, &tokens);
    catalog
        .iter()
        .filter(|deal| deal_matches(pick, &tokens, combo, deal))
        .collect()
}

/// Single test of one deal against one pick.
///
/// `tokens` must be `pick.tokens()` and `combo` must be `is_combo_pick(..)`; they are passed in
/// so that a catalog scan normalizes the pick once.
pub fn deal_matches(pick: &PickedItem, tokens: &[String], combo: bool, deal: &Deal) -> bool {
    // The deal the pick came from is always visible in its own group
    if deal.id() == pick.deal().id() {
        return true;
    }

    // An unmatchable pick (e.g. a null item field from OCR) matches nothing but itself
    if tokens.is_empty() {
        return false;
    }

    let names: Vec<String> = deal
        .item()
        .normalized()
        .iter()
        .map(|n| n.to_lowercase())
        .collect();

    if combo {
        // Every picked token must appear in some name, the deal may carry at most one extra
        // item, and the deal must itself be a combo
        tokens
            .iter()
            .all(|token| names.iter().any(|name| name.contains(token.as_str())))
            && names.len() <= tokens.len() + COMBO_EXTRA_ITEMS_ALLOWED
            && names.len() > 1
    } else {
        // Substring containment against single-item deals only; combos are never folded into a
        // single-item group
        names.len() == 1 && names[0].contains(tokens[0].as_str())
    }
}

/// A pick compares in combo mode when it carries more than one token or its declared type says
/// combo.
pub fn is_combo_pick(pick: &PickedItem, tokens: &[String]) -> bool {
    tokens.len() > 1 || pick.deal().kind().to_lowercase().contains("combo")
}
