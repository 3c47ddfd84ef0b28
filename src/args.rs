//! These structs provide the CLI interface for the flyer CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// flyer: A command-line tool for comparing scanned store-flyer deals.
///
/// The purpose of this program is to take the deal catalog that an OCR/ingestion service
/// extracts from store flyers, and let you compare prices of the items you care about across
/// stores, keep a shopping basket with a budget, and save/share shopping lists.
///
/// Point the tool at the ingestion service's output file with 'flyer init', refresh your local
/// catalog with 'flyer fetch', pick items with 'flyer pick', then run 'flyer compare'.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. Decide what directory you want to store data
    /// in and pass it as --flyer-home (defaults to $HOME/flyer), and pass the path of the JSON
    /// file your flyer-scanning/ingestion service writes as --catalog-source.
    Init(InitArgs),
    /// Refresh the local catalog from the configured catalog source.
    ///
    /// The previous local catalog is backed up to $FLYER_HOME/.backups before being replaced.
    Fetch,
    /// Insert, update, delete or list deals in the local catalog copy.
    ///
    /// These apply the same insert/update/delete notifications the ingestion service emits,
    /// which is also handy for correcting OCR mistakes by hand.
    Catalog(CatalogArgs),
    /// Pick a catalog deal as a representative item to compare, or list/clear current picks.
    Pick(PickArgs),
    /// Build price-comparison groups for the current picks.
    Compare(CompareArgs),
    /// Toggle deals in and out of the shopping basket, show it, or clear the session.
    Basket(BasketArgs),
    /// Set, clear or show the session budget ceiling.
    Budget(BudgetArgs),
    /// Save the current basket as a shopping list snapshot.
    Save,
    /// Show saved shopping lists.
    Lists,
    /// Print a saved list (or the current basket) as shareable plain text.
    Share(ShareArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where flyer data and configuration is held. Defaults to ~/flyer
    #[arg(long, env = "FLYER_HOME", default_value_t = default_flyer_home())]
    flyer_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, flyer_home: PathBuf) -> Self {
        Self {
            log_level,
            flyer_home: flyer_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn flyer_home(&self) -> &DisplayPath {
        &self.flyer_home
    }
}

/// Args for the `flyer init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The path to the JSON file where the OCR/ingestion service drops scanned deals.
    #[arg(long)]
    catalog_source: PathBuf,
}

impl InitArgs {
    pub fn new(catalog_source: impl Into<PathBuf>) -> Self {
        Self {
            catalog_source: catalog_source.into(),
        }
    }

    pub fn catalog_source(&self) -> &Path {
        &self.catalog_source
    }
}

/// Args for the `flyer catalog` command.
#[derive(Debug, Parser, Clone)]
pub struct CatalogArgs {
    #[command(subcommand)]
    entity: CatalogSubcommand,
}

impl CatalogArgs {
    pub fn entity(&self) -> &CatalogSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogSubcommand {
    /// Add a deal to the local catalog.
    Insert(InsertDealArgs),
    /// Update a deal in the local catalog by id.
    Update(UpdateDealArgs),
    /// Remove a deal from the local catalog by id.
    Delete(DeleteDealArgs),
    /// Print the local catalog.
    List(ListDealsArgs),
}

/// The fields of a deal to insert. A deal with more than one --item is a combo.
#[derive(Debug, Default, Clone, Parser, Serialize, Deserialize)]
pub struct InsertDealArgs {
    /// An item name; repeat the flag for combo deals.
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,

    /// The price text, e.g. "$45.00". Kept as-is and parsed defensively.
    #[arg(long)]
    pub price: String,

    /// The retailer name.
    #[arg(long)]
    pub store: String,

    /// Free-text classification, normally "single" or "combo". Derived from the item count when
    /// omitted.
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Optional unit-of-sale descriptor, e.g. "each", "per kg".
    #[arg(long)]
    pub unit: Option<String>,
}

/// The fields to change on an existing deal. Only set values will be changed.
#[derive(Debug, Default, Clone, Parser, Serialize, Deserialize)]
pub struct UpdateDealArgs {
    /// The id of the deal to update.
    pub id: String,

    /// Replacement item names; repeat the flag for combo deals.
    #[arg(long = "item")]
    pub items: Vec<String>,

    /// Replacement price text.
    #[arg(long)]
    pub price: Option<String>,

    /// Replacement retailer name.
    #[arg(long)]
    pub store: Option<String>,

    /// Replacement classification.
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Replacement unit-of-sale descriptor.
    #[arg(long)]
    pub unit: Option<String>,
}

/// Args for `flyer catalog delete`.
#[derive(Debug, Parser, Clone)]
pub struct DeleteDealArgs {
    /// The id of the deal to delete.
    id: String,
}

impl DeleteDealArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for `flyer catalog list`.
#[derive(Debug, Parser, Clone)]
pub struct ListDealsArgs {
    /// The output format.
    #[arg(long, default_value_t)]
    format: OutputFormat,
}

impl ListDealsArgs {
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `flyer pick` command.
#[derive(Debug, Parser, Clone)]
pub struct PickArgs {
    /// The id of the catalog deal to pick.
    deal_id: Option<String>,

    /// Remove all current picks.
    #[arg(long, conflicts_with = "deal_id")]
    clear: bool,

    /// Show the current picks.
    #[arg(long, conflicts_with_all = ["deal_id", "clear"])]
    list: bool,
}

impl PickArgs {
    pub fn deal_id(&self) -> Option<&str> {
        self.deal_id.as_deref()
    }

    pub fn clear(&self) -> bool {
        self.clear
    }

    pub fn list(&self) -> bool {
        self.list
    }
}

/// Args for the `flyer compare` command.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// The output format.
    #[arg(long, default_value_t)]
    format: OutputFormat,
}

impl CompareArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `flyer basket` command.
#[derive(Debug, Parser, Clone)]
pub struct BasketArgs {
    #[command(subcommand)]
    action: BasketSubcommand,
}

impl BasketArgs {
    pub fn action(&self) -> &BasketSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum BasketSubcommand {
    /// Add the deal to the basket, or remove it if it is already there.
    Toggle {
        /// The id of the catalog deal to toggle.
        deal_id: String,
    },
    /// Show the basket contents, total and remaining budget.
    Show,
    /// Empty the basket and end the session (picks and budget included).
    Clear,
}

/// Args for the `flyer budget` command.
#[derive(Debug, Parser, Clone)]
pub struct BudgetArgs {
    #[command(subcommand)]
    action: BudgetSubcommand,
}

impl BudgetArgs {
    pub fn action(&self) -> &BudgetSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum BudgetSubcommand {
    /// Set the spending ceiling. Non-positive or non-numeric values are rejected.
    Set {
        /// The ceiling, e.g. "200" or "$200.00".
        amount: String,
    },
    /// Remove the spending ceiling.
    Clear,
    /// Show the ceiling, basket total and remaining balance.
    Show,
}

/// Args for the `flyer share` command.
#[derive(Debug, Parser, Clone)]
pub struct ShareArgs {
    /// The id (or unique id prefix) of a saved list. Shares the current basket when omitted.
    list_id: Option<String>,
}

impl ShareArgs {
    pub fn list_id(&self) -> Option<&str> {
        self.list_id.as_deref()
    }
}

/// The rendering of tabular command output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values.
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

fn default_flyer_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("flyer"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --flyer-home or FLYER_HOME instead of relying on the default \
                flyer home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("flyer")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare_with_format() {
        let args = Args::try_parse_from(["flyer", "compare", "--format", "csv"]).unwrap();
        match args.command() {
            Command::Compare(compare) => assert_eq!(compare.format(), OutputFormat::Csv),
            other => panic!("Expected Compare, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_catalog_insert_combo() {
        let args = Args::try_parse_from([
            "flyer", "catalog", "insert", "--item", "Bread", "--item", "Milk", "--price", "$34",
            "--store", "FreshGrocer", "--type", "combo",
        ])
        .unwrap();
        match args.command() {
            Command::Catalog(catalog) => match catalog.entity() {
                CatalogSubcommand::Insert(insert) => {
                    assert_eq!(insert.items, vec!["Bread", "Milk"]);
                    assert_eq!(insert.kind.as_deref(), Some("combo"));
                }
                other => panic!("Expected Insert, got {other:?}"),
            },
            other => panic!("Expected Catalog, got {other:?}"),
        }
    }

    #[test]
    fn test_pick_flags_conflict() {
        assert!(Args::try_parse_from(["flyer", "pick", "some-id", "--clear"]).is_err());
        assert!(Args::try_parse_from(["flyer", "pick", "--clear"]).is_ok());
    }

    #[test]
    fn test_output_format_display_fromstr() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_budget_set_amount_is_free_text() {
        // Validation happens at the budget boundary, not in clap
        let args = Args::try_parse_from(["flyer", "budget", "set", "abc"]).unwrap();
        match args.command() {
            Command::Budget(budget) => match budget.action() {
                BudgetSubcommand::Set { amount } => assert_eq!(amount, "abc"),
                other => panic!("Expected Set, got {other:?}"),
            },
            other => panic!("Expected Budget, got {other:?}"),
        }
    }
}
