//! Pick command handler: manage the session's representative items.

use crate::args::PickArgs;
use crate::commands::Out;
use crate::model::{PickedItem, Session};
use crate::{Catalog, Config, Result};
use anyhow::Context;

/// Adds a catalog deal to the session picks, or lists/clears the current picks.
pub async fn pick(config: Config, args: PickArgs) -> Result<Out<Vec<PickedItem>>> {
    let session_path = config.session_path();
    let mut session = Session::load(&session_path).await?;

    if args.clear() {
        session.clear_picks();
        session.save(&session_path).await?;
        return Ok(Out::new_message("Cleared all picks"));
    }

    if args.list() {
        let message = if session.picks().is_empty() {
            "No picks yet, run 'flyer pick <deal-id>'".to_string()
        } else {
            session
                .picks()
                .iter()
                .map(|p| {
                    format!(
                        "{}  {} (picked from {})",
                        p.deal().id(),
                        p.deal().display_name(),
                        p.selected_store()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        return Ok(Out::new(message, session.picks().to_vec()));
    }

    let deal_id = args
        .deal_id()
        .context("Provide a deal id to pick, or --list / --clear")?;

    let catalog = Catalog::load(&config.catalog_path()).await?;
    let deal = catalog
        .find(deal_id)
        .with_context(|| format!("No deal with id '{deal_id}' in the local catalog"))?;

    let picked = PickedItem::from_deal(deal.clone());
    let message = format!(
        "Picked '{}' from {}",
        picked.deal().display_name(),
        picked.selected_store()
    );
    session.add_pick(picked);
    session.save(&session_path).await?;

    Ok(Out::new(message, session.picks().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fetch;
    use crate::Mode;

    fn pick_args(deal_id: Option<&str>, clear: bool, list: bool) -> PickArgs {
        use clap::Parser;
        let mut argv = vec!["pick".to_string()];
        if let Some(id) = deal_id {
            argv.push(id.to_string());
        }
        if clear {
            argv.push("--clear".to_string());
        }
        if list {
            argv.push("--list".to_string());
        }
        PickArgs::parse_from(argv)
    }

    #[tokio::test]
    async fn test_pick_adds_to_session() {
        let env = crate::test::TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();

        let out = pick(env.config(), pick_args(Some("fg-001"), false, false))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);

        let session = Session::load(&env.config().session_path()).await.unwrap();
        assert_eq!(session.picks()[0].deal().id(), "fg-001");
        assert_eq!(session.picks()[0].selected_store(), "FreshGrocer");
    }

    #[tokio::test]
    async fn test_pick_unknown_id_is_an_error() {
        let env = crate::test::TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();

        let result = pick(env.config(), pick_args(Some("nope"), false, false)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pick_clear() {
        let env = crate::test::TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();

        pick(env.config(), pick_args(Some("fg-001"), false, false))
            .await
            .unwrap();
        pick(env.config(), pick_args(None, true, false))
            .await
            .unwrap();

        let session = Session::load(&env.config().session_path()).await.unwrap();
        assert!(session.picks().is_empty());
    }

    #[tokio::test]
    async fn test_pick_list_with_no_picks() {
        let env = crate::test::TestEnv::new().await;
        let out = pick(env.config(), pick_args(None, false, true))
            .await
            .unwrap();
        assert!(out.message().contains("No picks yet"));
    }
}
