//! Pure formatting of engine output and basket snapshots.
//!
//! Comparison results render in the requested output form (text, JSON, CSV) and saved baskets
//! render as a flat text summary suitable for sharing. Nothing here touches the filesystem.

use crate::engine::ComparisonGroup;
use crate::model::{Amount, Deal};
use crate::Result;
use anyhow::Context;

/// A flat, shareable text summary of basket items: one `store, item name(s), price` line per
/// item, then the total.
pub fn share_text(items: &[Deal], total: Amount) -> String {
    let mut lines: Vec<String> = items
        .iter()
        .map(|deal| {
            format!(
                "{}, {}, {}",
                deal.store(),
                deal.display_name(),
                deal.price_amount().to_price_string()
            )
        })
        .collect();
    lines.push(format!("Total: {}", total.to_price_string()));
    lines.join("\n")
}

/// Renders comparison groups as readable text, flagging the cheapest deal in each group.
pub fn groups_text(groups: &[ComparisonGroup]) -> String {
    if groups.is_empty() {
        return "No picked items to compare.".to_string();
    }

    let mut out = String::new();
    for group in groups {
        let kind = if group.is_combo() { "combo" } else { "single" };
        out.push_str(&format!("{} ({kind})\n", group.display_name()));

        if group.deals().is_empty() {
            out.push_str("  no matching deals\n");
        }
        for (ix, deal) in group.deals().iter().enumerate() {
            let marker = if ix == 0 { " *" } else { "" };
            out.push_str(&format!(
                "  {} @ {} {} / {}{marker}\n",
                deal.display_name(),
                deal.store(),
                deal.price_amount(),
                deal.unit_or_default(),
            ));
        }
        out.push('\n');
    }
    out.push_str("* cheapest in group");
    out
}

/// Renders comparison groups as pretty-printed JSON.
pub fn groups_json(groups: &[ComparisonGroup]) -> Result<String> {
    serde_json::to_string_pretty(groups).context("Unable to serialize comparison groups")
}

/// Renders comparison groups as CSV, one row per deal.
pub fn groups_csv(groups: &[ComparisonGroup]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["item_key", "store", "items", "price", "unit", "cheapest"])
        .context("Unable to write CSV header")?;

    for group in groups {
        for (ix, deal) in group.deals().iter().enumerate() {
            let items = deal.display_name();
            let price = deal.price_amount().to_price_string();
            writer
                .write_record([
                    group.item_key(),
                    deal.store(),
                    items.as_str(),
                    price.as_str(),
                    deal.unit_or_default(),
                    if ix == 0 { "true" } else { "false" },
                ])
                .context("Unable to write CSV record")?;
        }
    }

    let bytes = writer.into_inner().context("Unable to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assemble_groups;
    use crate::model::PickedItem;

    fn deal(id: &str, item: &str, price: &str, store: &str) -> Deal {
        Deal::new(id, item, price, store, "single", None)
    }

    fn groups() -> Vec<ComparisonGroup> {
        let catalog = vec![
            deal("1", "Rice", "$50.00", "A"),
            deal("2", "Rice", "$45.00", "B"),
        ];
        let picks = vec![PickedItem::from_deal(deal("1", "Rice", "$50.00", "A"))];
        assemble_groups(&picks, &catalog)
    }

    #[test]
    fn test_share_text() {
        let items = vec![
            deal("1", "Rice", "$45.00", "B"),
            deal("2", "Olive Oil", "junk", "A"),
        ];
        let total = Amount::parse_or_zero("45.00");
        let text = share_text(&items, total);
        assert_eq!(
            text,
            "B, Rice, 45.00\nA, Olive Oil, 0.00\nTotal: 45.00"
        );
    }

    #[test]
    fn test_share_text_empty_basket_still_shows_total() {
        let text = share_text(&[], Amount::default());
        assert_eq!(text, "Total: 0.00");
    }

    #[test]
    fn test_groups_text_flags_cheapest() {
        let text = groups_text(&groups());
        assert!(text.contains("Rice (single)"));
        assert!(text.contains("Rice @ B $45.00 / each *"));
        assert!(text.contains("Rice @ A $50.00 / each\n"));
    }

    #[test]
    fn test_groups_text_empty() {
        assert_eq!(groups_text(&[]), "No picked items to compare.");
    }

    #[test]
    fn test_groups_csv() {
        let csv = groups_csv(&groups()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "item_key,store,items,price,unit,cheapest"
        );
        assert_eq!(lines.next().unwrap(), "rice,B,Rice,45.00,each,true");
        assert_eq!(lines.next().unwrap(), "rice,A,Rice,50.00,each,false");
    }

    #[test]
    fn test_groups_json() {
        let json = groups_json(&groups()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["item_key"], "rice");
    }
}
