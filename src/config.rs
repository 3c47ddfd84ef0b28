//! Configuration file handling.
//!
//! The configuration file is stored at `$FLYER_HOME/config.json` and contains settings for the
//! application including the catalog source path and backup settings.

use crate::backup::Backup;
use crate::store::ListStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "flyer";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const LISTS: &str = "lists";
const CONFIG_JSON: &str = "config.json";
const CATALOG_JSON: &str = "catalog.json";
const SESSION_JSON: &str = "session.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FLYER_HOME` and from there it loads `$FLYER_HOME/config.json`. It provides
/// paths to the other items that are expected in certain locations within the flyer home
/// directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    lists: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its subdirectories and an initial `config.json` using
    /// `catalog_source` along with default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/flyer`
    /// - `catalog_source` - The path where the OCR/ingestion service drops its scanned-deal JSON.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, catalog_source: &Path) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the flyer home directory")?;

        // Canonicalize the directory path
        let root = utils::canonicalize(&maybe_relative).await?;

        // Create the subdirectories
        let backups_dir = root.join(BACKUPS);
        utils::make_dir(&backups_dir).await?;
        let lists_dir = root.join(LISTS);
        utils::make_dir(&lists_dir).await?;

        // Create and save an initial ConfigFile in the data directory
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            catalog_source: catalog_source.to_path_buf(),
            backup_copies: BACKUP_COPIES,
        };
        config_file.save(&config_path).await?;

        // Return a new `Config` object that represents a data directory that is ready to use
        Ok(Self {
            root,
            backups: backups_dir,
            lists: lists_dir,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the `flyer_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups and lists directories exist
    /// - return the loaded configuration object
    pub async fn load(flyer_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = flyer_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Flyer home is missing, run 'flyer init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            lists: root.join(LISTS),
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        if !config.lists.is_dir() {
            bail!(
                "The lists directory is missing '{}'",
                config.lists.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn lists(&self) -> &Path {
        &self.lists
    }

    pub fn catalog_source(&self) -> &Path {
        &self.config_file.catalog_source
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The local catalog copy maintained by `flyer fetch` and the catalog subcommands.
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_JSON)
    }

    /// The current comparison session (picks, basket, budget).
    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_JSON)
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }

    /// Creates a new `ListStore` for saved basket snapshots.
    pub fn list_store(&self) -> ListStore {
        ListStore::new(&self.lists)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "flyer",
///   "config_version": 1,
///   "catalog_source": "/var/ingest/flyer-deals.json",
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "flyer"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the JSON file the OCR/ingestion service writes scanned deals to
    catalog_source: PathBuf,

    /// Number of backup copies to keep
    backup_copies: u32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            catalog_source: PathBuf::new(),
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize_pretty(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("flyer_home");
        let source = dir.path().join("deals.json");

        let config = Config::create(&home_dir, &source).await.unwrap();

        assert_eq!(config.catalog_source(), source);
        assert_eq!(config.backup_copies(), BACKUP_COPIES);
        assert!(config.backups().is_dir());
        assert!(config.lists().is_dir());
        assert!(config.config_path().is_file());
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("flyer_home");
        let source = dir.path().join("deals.json");
        Config::create(&home_dir, &source).await.unwrap();

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.catalog_source(), source);
        assert_eq!(
            loaded.catalog_path(),
            loaded.root().join(CATALOG_JSON)
        );
    }

    #[tokio::test]
    async fn test_config_load_missing_home_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");

        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "catalog_source": "/tmp/deals.json",
            "backup_copies": 5
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let original = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            catalog_source: PathBuf::from("/var/ingest/deals.json"),
            backup_copies: 7,
        };
        original.save(&path).await.unwrap();

        let loaded = ConfigFile::load(&path).await.unwrap();
        assert_eq!(original, loaded);
    }
}
