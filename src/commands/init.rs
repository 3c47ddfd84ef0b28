//! Init command handler.

use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;
use tracing::warn;

/// Creates the flyer home directory, its subdirectories and an initial `config.json` pointing at
/// the ingestion service's catalog drop.
pub async fn init(home: &Path, args: &InitArgs) -> Result<Out<String>> {
    if !args.catalog_source().is_file() {
        // Not fatal: the ingestion service may simply not have produced output yet
        warn!(
            "The catalog source '{}' does not exist yet, 'flyer fetch' will fail until it does",
            args.catalog_source().display()
        );
    }

    let config = Config::create(home, args.catalog_source()).await?;

    let message = format!(
        "Initialized flyer home at '{}', reading deals from '{}'",
        config.root().display(),
        config.catalog_source().display()
    );
    Ok(Out::new(
        message,
        config.root().to_string_lossy().to_string(),
    ))
}
