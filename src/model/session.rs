//! The comparison session: picks, basket and budget for one shopping run.

use crate::model::{Amount, Basket, BudgetTracker, PickedItem};
use crate::{utils, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// All mutable per-session state, passed explicitly to the commands that need it rather than
/// living in ambient globals. Persisted to `session.json` for the life of the basket session and
/// deleted when the session is cleared.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Session {
    /// Representative items the user picked to compare.
    picks: Vec<PickedItem>,
    /// Deals committed to buy.
    basket: Basket,
    /// Optional spending ceiling.
    budget: BudgetTracker,
}

impl Session {
    /// Loads the session file, or starts a fresh session when none exists yet.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!("No session file at {}, starting fresh", path.display());
            return Ok(Session::default());
        }
        utils::deserialize(path).await
    }

    /// Saves the session as pretty-printed JSON.
    pub async fn save(&self, path: &Path) -> Result<()> {
        utils::serialize_pretty(path, self).await
    }

    /// Records a pick. Duplicate token keys are kept here; the group assembler deduplicates
    /// first-seen-wins at comparison time.
    pub fn add_pick(&mut self, pick: PickedItem) {
        self.picks.push(pick);
    }

    pub fn clear_picks(&mut self) {
        self.picks.clear();
    }

    pub fn picks(&self) -> &[PickedItem] {
        &self.picks
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn basket_mut(&mut self) -> &mut Basket {
        &mut self.basket
    }

    pub fn budget(&self) -> &BudgetTracker {
        &self.budget
    }

    pub fn budget_mut(&mut self) -> &mut BudgetTracker {
        &mut self.budget
    }

    /// The running basket total.
    pub fn spent(&self) -> Amount {
        self.basket.total()
    }

    /// The balance left under the budget ceiling, while one is set.
    pub fn remaining(&self) -> Option<Amount> {
        self.budget.remaining(self.spent())
    }
}
