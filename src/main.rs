use clap::Parser;
use flyer_compare::args::{Args, BasketSubcommand, BudgetSubcommand, CatalogSubcommand, Command};
use flyer_compare::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().flyer_home().path();

    // This allows for testing the program without an ingestion service. When FLYER_IN_TEST_MODE
    // is set and non-zero in length, then the mode will be Mode::Test, otherwise Mode::File.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args).await?.print(),

        Command::Fetch => {
            let config = Config::load(home).await?;
            commands::fetch(config, mode).await?.print()
        }

        Command::Catalog(catalog_args) => {
            let config = Config::load(home).await?;
            match catalog_args.entity() {
                CatalogSubcommand::Insert(args) => {
                    commands::catalog_insert(config, args.clone()).await?.print()
                }
                CatalogSubcommand::Update(args) => {
                    commands::catalog_update(config, args.clone()).await?.print()
                }
                CatalogSubcommand::Delete(args) => {
                    commands::catalog_delete(config, args.clone()).await?.print()
                }
                CatalogSubcommand::List(args) => {
                    commands::catalog_list(config, args.clone()).await?.print()
                }
            }
        }

        Command::Pick(pick_args) => {
            let config = Config::load(home).await?;
            commands::pick(config, pick_args.clone()).await?.print()
        }

        Command::Compare(compare_args) => {
            let config = Config::load(home).await?;
            commands::compare(config, compare_args.clone()).await?.print()
        }

        Command::Basket(basket_args) => {
            let config = Config::load(home).await?;
            match basket_args.action() {
                BasketSubcommand::Toggle { deal_id } => {
                    commands::basket_toggle(config, deal_id).await?.print()
                }
                BasketSubcommand::Show => commands::basket_show(config).await?.print(),
                BasketSubcommand::Clear => commands::basket_clear(config).await?.print(),
            }
        }

        Command::Budget(budget_args) => {
            let config = Config::load(home).await?;
            match budget_args.action() {
                BudgetSubcommand::Set { amount } => {
                    commands::budget_set(config, amount).await?.print()
                }
                BudgetSubcommand::Clear => commands::budget_clear(config).await?.print(),
                BudgetSubcommand::Show => commands::budget_show(config).await?.print(),
            }
        }

        Command::Save => {
            let config = Config::load(home).await?;
            commands::save(config).await?.print()
        }

        Command::Lists => {
            let config = Config::load(home).await?;
            commands::lists(config).await?.print()
        }

        Command::Share(share_args) => {
            let config = Config::load(home).await?;
            commands::share(config, share_args.clone()).await?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
