//! Fetch command handler: bulk-refresh the local catalog from the configured source.

use crate::backup::CATALOG;
use crate::commands::Out;
use crate::source;
use crate::{Catalog, Config, Mode, Result};
use tracing::debug;

/// Fetches the complete catalog from the ingestion source and replaces the local copy.
///
/// The previous local catalog is backed up first, so a bad drop from the ingestion service can
/// always be recovered. A failed fetch leaves the local catalog untouched; the comparison
/// commands keep working against the stale copy.
pub async fn fetch(config: Config, mode: Mode) -> Result<Out<usize>> {
    let deals = source::source(&config, mode).fetch().await?;

    // Back up whatever we had before overwriting it
    let previous = Catalog::load(&config.catalog_path()).await?;
    if !previous.is_empty() {
        let backup_path = config.backup().save_json(CATALOG, &previous).await?;
        debug!("Saved catalog backup to {}", backup_path.display());
    }

    let catalog = Catalog::new(deals);
    catalog.save(&config.catalog_path()).await?;

    let message = format!("Fetched {} deals into the local catalog", catalog.len());
    Ok(Out::new(message, catalog.len()))
}
