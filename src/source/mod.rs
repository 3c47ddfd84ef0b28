//! The seam to the external catalog-fetch collaborator.
//!
//! The OCR/ingestion pipeline that actually scans flyers lives outside this tool; all we see is
//! its output. `CatalogSource` abstracts where that output comes from so the whole app can run
//! top-to-bottom in tests without a real ingestion drop.

mod file;
mod test_source;

use crate::model::Deal;
use crate::{Config, Result};
pub use file::FileSource;
pub(crate) use test_source::TestSource;

/// A provider of the full scanned-deal catalog.
#[async_trait::async_trait]
pub trait CatalogSource {
    /// Fetches the complete current catalog. Incremental notifications are applied separately
    /// via `CatalogEvent`; this is the bulk-refresh path.
    async fn fetch(&self) -> Result<Vec<Deal>>;
}

/// Determines whether catalog fetches read the configured ingestion drop or in-memory test data.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    #[default]
    File,
    Test,
}

impl Mode {
    /// When `FLYER_IN_TEST_MODE` is set and non-zero in length, fetches use the in-memory
    /// `TestSource`, which allows exercising the program without an ingestion service.
    pub fn from_env() -> Mode {
        match std::env::var("FLYER_IN_TEST_MODE") {
            Ok(val) if !val.is_empty() => Mode::Test,
            _ => Mode::File,
        }
    }
}

/// Creates the catalog source for the given mode.
pub fn source(config: &Config, mode: Mode) -> Box<dyn CatalogSource + Send + Sync> {
    match mode {
        Mode::File => Box::new(FileSource::new(config.catalog_source())),
        Mode::Test => Box::new(TestSource::default()),
    }
}
