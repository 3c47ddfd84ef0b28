//! The local copy of the deal catalog and the change notifications that maintain it.

use crate::model::Deal;
use crate::{utils, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// An incremental change notification from the ingestion collaborator, keyed by deal id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CatalogEvent {
    Insert(Deal),
    Update(Deal),
    Delete { id: String },
}

/// The ordered, in-memory catalog of deals.
///
/// The catalog is read-only from the comparison engine's perspective; this type exists to apply
/// the ingestion service's bulk refreshes and incremental notifications, and to load/save the
/// local `catalog.json` copy. It tolerates being stale or empty: every consumer must keep
/// working against whatever is here.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Catalog {
    deals: Vec<Deal>,
}

impl Catalog {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    /// Loads the catalog file, or an empty catalog when none exists yet.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!("No catalog file at {}, starting empty", path.display());
            return Ok(Catalog::default());
        }
        utils::deserialize(path).await
    }

    /// Saves the catalog as pretty-printed JSON.
    pub async fn save(&self, path: &Path) -> Result<()> {
        utils::serialize_pretty(path, self).await
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id() == id)
    }

    /// Applies one change notification.
    ///
    /// The notification stream from the ingestion service can be replayed, so every operation is
    /// idempotent: inserting an existing id replaces it in place, updating an unknown id appends,
    /// and deleting an unknown id does nothing.
    pub fn apply(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Insert(deal) => match self.position(deal.id()) {
                Some(ix) => {
                    debug!("Insert for existing deal {}, replacing", deal.id());
                    self.deals[ix] = deal;
                }
                None => self.deals.push(deal),
            },
            CatalogEvent::Update(deal) => match self.position(deal.id()) {
                Some(ix) => self.deals[ix] = deal,
                None => {
                    debug!("Update for unknown deal {}, appending", deal.id());
                    self.deals.push(deal);
                }
            },
            CatalogEvent::Delete { id } => match self.position(&id) {
                Some(ix) => {
                    self.deals.remove(ix);
                }
                None => warn!("Delete for unknown deal {id}, ignoring"),
            },
        }
    }

    /// Applies a batch of notifications in order.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = CatalogEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.deals.iter().position(|d| d.id() == id)
    }
}
