//! The shopping basket: deals the user has committed to buy.

use crate::model::{Amount, Deal};
use serde::{Deserialize, Serialize};

/// The outcome of toggling a deal in the basket.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    Added,
    Removed,
}

serde_plain::derive_display_from_serialize!(Toggle);

/// An ordered collection of deals, toggled on and off by deal id: toggling an absent deal adds
/// it, toggling a present one removes it.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Basket {
    items: Vec<Deal>,
}

impl Basket {
    /// Toggles a deal by id and reports what happened.
    pub fn toggle(&mut self, deal: &Deal) -> Toggle {
        match self.items.iter().position(|d| d.id() == deal.id()) {
            Some(ix) => {
                self.items.remove(ix);
                Toggle::Removed
            }
            None => {
                self.items.push(deal.clone());
                Toggle::Added
            }
        }
    }

    /// True when a deal with this id is currently in the basket.
    pub fn is_in_basket(&self, deal: &Deal) -> bool {
        self.contains_id(deal.id())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|d| d.id() == id)
    }

    /// The running total of the basket, summing defensively parsed prices.
    pub fn total(&self) -> Amount {
        self.items
            .iter()
            .fold(Amount::default(), |acc, d| acc.plus(d.price_amount()))
    }

    pub fn items(&self) -> &[Deal] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(id: &str, price: &str) -> Deal {
        Deal::new(id, "Rice", price, "Store A", "single", None)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut basket = Basket::default();
        let d = deal("1", "$10.00");

        assert_eq!(basket.toggle(&d), Toggle::Added);
        assert!(basket.is_in_basket(&d));
        assert_eq!(basket.len(), 1);

        assert_eq!(basket.toggle(&d), Toggle::Removed);
        assert!(!basket.is_in_basket(&d));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_toggle_keys_by_id_only() {
        let mut basket = Basket::default();
        basket.toggle(&deal("1", "$10.00"));

        // Same id, different price text: still the same basket entry
        let variant = deal("1", "$12.00");
        assert_eq!(basket.toggle(&variant), Toggle::Removed);
        assert!(basket.is_empty());
    }

    #[test]
    fn test_total_sums_parsed_prices() {
        let mut basket = Basket::default();
        basket.toggle(&deal("1", "$10.00"));
        basket.toggle(&deal("2", "$5.50"));
        basket.toggle(&deal("3", "garbled"));
        assert_eq!(basket.total().to_price_string(), "15.50");
    }

    #[test]
    fn test_clear() {
        let mut basket = Basket::default();
        basket.toggle(&deal("1", "$10.00"));
        basket.clear();
        assert!(basket.is_empty());
        assert_eq!(basket.total().to_price_string(), "0.00");
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut basket = Basket::default();
        basket.toggle(&deal("b", "$2.00"));
        basket.toggle(&deal("a", "$1.00"));
        let ids: Vec<&str> = basket.items().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
