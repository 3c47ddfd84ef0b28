//! Compare command handler: run the comparison engine over the current picks.

use crate::args::{CompareArgs, OutputFormat};
use crate::commands::Out;
use crate::engine::{assemble_groups, ComparisonGroup};
use crate::export;
use crate::model::Session;
use crate::{Catalog, Config, Result};

/// Assembles comparison groups for the session's picks against the local catalog and renders
/// them in the requested format.
///
/// Everything here is a pure recomputation: stale catalog, empty catalog and empty picks are all
/// fine and produce an empty (or partial) result rather than an error.
pub async fn compare(config: Config, args: CompareArgs) -> Result<Out<Vec<ComparisonGroup>>> {
    let session = Session::load(&config.session_path()).await?;
    let catalog = Catalog::load(&config.catalog_path()).await?;

    let groups = assemble_groups(session.picks(), catalog.deals());

    let message = match args.format() {
        OutputFormat::Text => export::groups_text(&groups),
        OutputFormat::Json => export::groups_json(&groups)?,
        OutputFormat::Csv => export::groups_csv(&groups)?,
    };

    Ok(Out::new(message, groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{fetch, pick};
    use crate::test::TestEnv;
    use crate::Mode;
    use clap::Parser;

    async fn env_with_pick(deal_id: &str) -> TestEnv {
        let env = TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();
        let args = crate::args::PickArgs::parse_from(["pick", deal_id]);
        pick(env.config(), args).await.unwrap();
        env
    }

    #[tokio::test]
    async fn test_compare_groups_rice_across_stores() {
        // "Rice 2kg" is a substring of the rice names at the other two stores
        let env = env_with_pick("vs-205").await;

        let out = compare(env.config(), CompareArgs::new(OutputFormat::Text))
            .await
            .unwrap();
        let groups = out.structure().unwrap();
        assert_eq!(groups.len(), 1);

        let ids: Vec<&str> = groups[0].deals().iter().map(|d| d.id()).collect();
        // mm-101 $45.00, fg-001 $48.99, then the pick's own "two for 80" (parses to 80.00);
        // the vs-206 combo stays out of a single-item group
        assert_eq!(ids, vec!["mm-101", "fg-001", "vs-205"]);
        assert_eq!(groups[0].cheapest_deal().unwrap().id(), "mm-101");
    }

    #[tokio::test]
    async fn test_compare_with_no_picks_is_empty_not_error() {
        let env = TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();

        let out = compare(env.config(), CompareArgs::new(OutputFormat::Text))
            .await
            .unwrap();
        assert!(out.structure().unwrap().is_empty());
        assert!(out.message().contains("No picked items"));
    }

    #[tokio::test]
    async fn test_compare_with_empty_catalog_keeps_self_pick_group() {
        // Pick something, then lose the catalog: the group survives with no matches
        let env = env_with_pick("fg-001").await;
        std::fs::remove_file(env.config().catalog_path()).unwrap();

        let out = compare(env.config(), CompareArgs::new(OutputFormat::Text))
            .await
            .unwrap();
        let groups = out.structure().unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].deals().is_empty());
    }

    #[tokio::test]
    async fn test_compare_csv_format() {
        let env = env_with_pick("fg-001").await;

        let out = compare(env.config(), CompareArgs::new(OutputFormat::Csv))
            .await
            .unwrap();
        assert!(out
            .message()
            .starts_with("item_key,store,items,price,unit,cheapest"));
    }
}
