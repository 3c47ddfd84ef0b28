//! Basket command handlers.

use crate::commands::Out;
use crate::model::{Session, Toggle};
use crate::{Catalog, Config, Result};
use anyhow::Context;

/// Toggles a catalog deal in or out of the basket.
pub async fn basket_toggle(config: Config, deal_id: &str) -> Result<Out<Toggle>> {
    let catalog = Catalog::load(&config.catalog_path()).await?;
    let deal = catalog
        .find(deal_id)
        .with_context(|| format!("No deal with id '{deal_id}' in the local catalog"))?;

    let session_path = config.session_path();
    let mut session = Session::load(&session_path).await?;
    let toggle = session.basket_mut().toggle(deal);
    session.save(&session_path).await?;

    let message = match toggle {
        Toggle::Added => format!(
            "Added '{}' to the basket, total {}",
            deal.display_name(),
            session.spent()
        ),
        Toggle::Removed => format!(
            "Removed '{}' from the basket, total {}",
            deal.display_name(),
            session.spent()
        ),
    };
    Ok(Out::new(message, toggle))
}

/// Shows the basket contents, total and remaining budget.
pub async fn basket_show(config: Config) -> Result<Out<Session>> {
    let session = Session::load(&config.session_path()).await?;

    let mut lines: Vec<String> = if session.basket().is_empty() {
        vec!["The basket is empty".to_string()]
    } else {
        session
            .basket()
            .items()
            .iter()
            .map(|d| {
                format!(
                    "{}  {} @ {} {}",
                    d.id(),
                    d.display_name(),
                    d.store(),
                    d.price_amount()
                )
            })
            .collect()
    };
    lines.push(format!("Total: {}", session.spent()));
    if let Some(remaining) = session.remaining() {
        lines.push(format!("Remaining budget: {remaining}"));
    }

    Ok(Out::new(lines.join("\n"), session))
}

/// Empties the basket and ends the session: picks, basket and budget are all discarded.
pub async fn basket_clear(config: Config) -> Result<Out<String>> {
    let session_path = config.session_path();
    if session_path.is_file() {
        tokio::fs::remove_file(&session_path)
            .await
            .with_context(|| format!("Unable to remove {}", session_path.display()))?;
    }
    Ok(Out::new_message("Cleared the basket session"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fetch;
    use crate::test::TestEnv;
    use crate::Mode;

    async fn env() -> TestEnv {
        let env = TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();
        env
    }

    #[tokio::test]
    async fn test_toggle_on_and_off() {
        let env = env().await;

        let out = basket_toggle(env.config(), "fg-001").await.unwrap();
        assert_eq!(*out.structure().unwrap(), Toggle::Added);

        let out = basket_toggle(env.config(), "fg-001").await.unwrap();
        assert_eq!(*out.structure().unwrap(), Toggle::Removed);

        let session = Session::load(&env.config().session_path()).await.unwrap();
        assert!(session.basket().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_deal_is_an_error() {
        let env = env().await;
        assert!(basket_toggle(env.config(), "nope").await.is_err());
    }

    #[tokio::test]
    async fn test_show_includes_total_and_budget() {
        let env = env().await;
        basket_toggle(env.config(), "fg-001").await.unwrap(); // $48.99

        let session_path = env.config().session_path();
        let mut session = Session::load(&session_path).await.unwrap();
        assert!(session.budget_mut().set_from_str("100.00"));
        session.save(&session_path).await.unwrap();

        let out = basket_show(env.config()).await.unwrap();
        assert!(out.message().contains("Total: $48.99"));
        assert!(out.message().contains("Remaining budget: $51.01"));
    }

    #[tokio::test]
    async fn test_clear_removes_session_file() {
        let env = env().await;
        basket_toggle(env.config(), "fg-001").await.unwrap();
        assert!(env.config().session_path().is_file());

        basket_clear(env.config()).await.unwrap();
        assert!(!env.config().session_path().is_file());

        // Clearing again is fine
        basket_clear(env.config()).await.unwrap();
    }
}
