//! Reads the ingestion service's JSON output from disk.

use crate::model::Deal;
use crate::source::CatalogSource;
use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// A `CatalogSource` backed by the JSON file the OCR/ingestion pipeline drops, configured as
/// `catalog_source` in `config.json`. The file is a plain JSON array of deals.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Deal>> {
        utils::deserialize(&self.path)
            .await
            .with_context(|| format!("Unable to fetch catalog from {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_reads_deal_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drop.json");
        let json = r#"[
            {"id": 1, "item": "Rice", "price": "$50", "store": "A", "type": "single"},
            {"id": 2, "item": ["Rice","Oil"], "price": "$80", "store": "C", "type": "combo"}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let deals = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].id(), "1");
        assert!(deals[1].is_combo());
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = FileSource::new(dir.path().join("absent.json")).fetch().await;
        assert!(result.is_err());
    }
}
