//! Catalog command handlers: apply insert/update/delete notifications to the local catalog copy.

use crate::args::{DeleteDealArgs, InsertDealArgs, ListDealsArgs, OutputFormat, UpdateDealArgs};
use crate::commands::Out;
use crate::model::{Deal, ItemNames};
use crate::utils::generate_deal_id;
use crate::{Catalog, CatalogEvent, Config, Result};
use anyhow::{bail, Context};

/// Inserts a new deal into the local catalog.
///
/// A unique deal id is automatically generated with a `user-` prefix to distinguish it from
/// ingestion-created deals. The generated id is returned on success.
pub async fn catalog_insert(config: Config, args: InsertDealArgs) -> Result<Out<String>> {
    let id = generate_deal_id();

    let kind = args
        .kind
        .clone()
        .unwrap_or_else(|| derive_kind(args.items.len()));
    let deal = Deal::new(
        id.clone(),
        item_names(args.items),
        args.price,
        args.store,
        kind,
        args.unit,
    );

    let mut catalog = Catalog::load(&config.catalog_path()).await?;
    catalog.apply(CatalogEvent::Insert(deal));
    catalog.save(&config.catalog_path()).await?;

    let message = format!("Inserted deal with ID: {id}");
    Ok(Out::new(message, id))
}

/// Updates an existing deal in the local catalog. Only the provided fields are changed.
pub async fn catalog_update(config: Config, args: UpdateDealArgs) -> Result<Out<String>> {
    let mut catalog = Catalog::load(&config.catalog_path()).await?;

    let existing = catalog
        .find(&args.id)
        .with_context(|| format!("No deal with id '{}' in the local catalog", args.id))?;

    let items = if args.items.is_empty() {
        existing.item().clone()
    } else {
        item_names(args.items)
    };
    let updated = Deal::new(
        args.id.clone(),
        items,
        args.price.unwrap_or_else(|| existing.price().to_string()),
        args.store.unwrap_or_else(|| existing.store().to_string()),
        args.kind.unwrap_or_else(|| existing.kind().to_string()),
        args.unit.or_else(|| existing.unit().map(str::to_string)),
    );

    catalog.apply(CatalogEvent::Update(updated));
    catalog.save(&config.catalog_path()).await?;

    let message = format!("Updated deal: {}", args.id);
    Ok(Out::new(message, args.id))
}

/// Deletes a deal from the local catalog by id.
pub async fn catalog_delete(config: Config, args: DeleteDealArgs) -> Result<Out<String>> {
    let mut catalog = Catalog::load(&config.catalog_path()).await?;

    if catalog.find(args.id()).is_none() {
        bail!("No deal with id '{}' in the local catalog", args.id());
    }
    catalog.apply(CatalogEvent::Delete {
        id: args.id().to_string(),
    });
    catalog.save(&config.catalog_path()).await?;

    let message = format!("Deleted deal: {}", args.id());
    Ok(Out::new(message, args.id().to_string()))
}

/// Prints the local catalog.
pub async fn catalog_list(config: Config, args: ListDealsArgs) -> Result<Out<Vec<Deal>>> {
    let catalog = Catalog::load(&config.catalog_path()).await?;

    let message = match args.format() {
        OutputFormat::Text => {
            if catalog.is_empty() {
                "The local catalog is empty, run 'flyer fetch' first".to_string()
            } else {
                catalog
                    .deals()
                    .iter()
                    .map(|d| {
                        format!(
                            "{}  {} @ {} {} / {}",
                            d.id(),
                            d.display_name(),
                            d.store(),
                            d.price_amount(),
                            d.unit_or_default()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        OutputFormat::Json => serde_json::to_string_pretty(catalog.deals())
            .context("Unable to serialize the catalog")?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["id", "items", "price", "store", "type", "unit"])
                .context("Unable to write CSV header")?;
            for d in catalog.deals() {
                let items = d.display_name();
                writer
                    .write_record([
                        d.id(),
                        items.as_str(),
                        d.price(),
                        d.store(),
                        d.kind(),
                        d.unit().unwrap_or(""),
                    ])
                    .context("Unable to write CSV record")?;
            }
            let bytes = writer.into_inner().context("Unable to flush CSV writer")?;
            String::from_utf8(bytes).context("CSV output was not valid UTF-8")?
        }
    };

    Ok(Out::new(message, catalog.deals().to_vec()))
}

/// A deal entered with one --item is a single, more than one is a combo.
fn derive_kind(item_count: usize) -> String {
    let kind = if item_count > 1 { "combo" } else { "single" };
    kind.to_string()
}

fn item_names(items: Vec<String>) -> ItemNames {
    match <[String; 1]>::try_from(items) {
        Ok([only]) => ItemNames::Single(only),
        Err(items) => ItemNames::Multiple(items),
    }
}
