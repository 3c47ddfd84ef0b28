//! The optional spending ceiling for a basket session.

use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// Tracks a user-set spending ceiling and computes the remaining balance against a running total.
///
/// The ceiling is optional; while unset there is no remaining-balance figure to show. Invalid
/// input is rejected at this boundary as a no-op, never an error: the previous ceiling survives.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetTracker {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<Amount>,
}

impl BudgetTracker {
    /// Sets the ceiling. Returns `false` without changing state when `amount` is not positive.
    pub fn set(&mut self, amount: Amount) -> bool {
        if !amount.is_positive() {
            return false;
        }
        self.limit = Some(amount);
        true
    }

    /// Parses and sets the ceiling from raw text. Unparseable or non-positive input is rejected
    /// with `false` and the previous value retained.
    pub fn set_from_str(&mut self, raw: &str) -> bool {
        match Amount::parse_money(raw) {
            Ok(amount) => self.set(amount),
            Err(_) => false,
        }
    }

    /// Clears the ceiling. Always succeeds.
    pub fn clear(&mut self) {
        self.limit = None;
    }

    pub fn limit(&self) -> Option<Amount> {
        self.limit
    }

    pub fn is_set(&self) -> bool {
        self.limit.is_some()
    }

    /// The balance left under the ceiling, or `None` while no ceiling is set. Goes negative when
    /// the basket exceeds the budget.
    pub fn remaining(&self, spent: Amount) -> Option<Amount> {
        self.limit.map(|limit| limit.minus(spent))
    }
}
