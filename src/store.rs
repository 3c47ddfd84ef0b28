//! Persistence of saved basket snapshots ("lists").
//!
//! Each saved list is one JSON file under `$FLYER_HOME/lists/`, keyed by a generated id plus a
//! timestamp. This is deliberately a dumb blob store: no schema beyond the snapshot itself.

use crate::model::{Amount, Basket, Deal};
use crate::{utils, Result};
use anyhow::bail;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// A basket snapshot frozen at save time.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SavedList {
    /// Generated identifier, also the filename stem.
    id: String,
    /// RFC 3339 timestamp of the save.
    saved_at: String,
    /// The basket contents at save time.
    items: Vec<Deal>,
    /// The basket total at save time.
    total: Amount,
}

impl SavedList {
    /// Snapshots the current basket.
    pub fn from_basket(basket: &Basket) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            saved_at: Local::now().to_rfc3339(),
            items: basket.items().to_vec(),
            total: basket.total(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn saved_at(&self) -> &str {
        &self.saved_at
    }

    pub fn items(&self) -> &[Deal] {
        &self.items
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// Reads and writes `SavedList` files in the lists directory.
#[derive(Debug, Clone)]
pub struct ListStore {
    dir: PathBuf,
}

impl ListStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes a snapshot as `list.<id>.json` and returns it.
    pub async fn save(&self, basket: &Basket) -> Result<SavedList> {
        if basket.is_empty() {
            bail!("The basket is empty, there is nothing to save");
        }
        let list = SavedList::from_basket(basket);
        let path = self.path_for(list.id());
        utils::serialize_pretty(&path, &list).await?;
        Ok(list)
    }

    /// Loads every saved list, most recent save first.
    pub async fn load_all(&self) -> Result<Vec<SavedList>> {
        let mut lists: Vec<SavedList> = Vec::new();

        let mut dir = utils::read_dir(&self.dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with("list.") && name.ends_with(".json") {
                lists.push(utils::deserialize(&entry.path()).await?);
            }
        }

        lists.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(lists)
    }

    /// Finds a saved list by full id or unique id prefix.
    pub async fn find(&self, id_prefix: &str) -> Result<SavedList> {
        let lists = self.load_all().await?;
        let mut matches = lists.into_iter().filter(|l| l.id.starts_with(id_prefix));

        let Some(found) = matches.next() else {
            bail!("No saved list matches '{id_prefix}'")
        };
        if matches.next().is_some() {
            bail!("More than one saved list matches '{id_prefix}', use a longer prefix");
        }
        Ok(found)
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("list.{id}.json"))
    }
}
