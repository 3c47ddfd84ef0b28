//! Budget command handlers.

use crate::commands::Out;
use crate::model::Session;
use crate::{Config, Result};
use tracing::warn;

/// Sets the session's spending ceiling.
///
/// Non-numeric or non-positive input is rejected as a no-op with the previous ceiling retained,
/// not an error exit: the value comes straight from the command line and a typo should not kill
/// a shopping session.
pub async fn budget_set(config: Config, amount: &str) -> Result<Out<Session>> {
    let session_path = config.session_path();
    let mut session = Session::load(&session_path).await?;

    let message = if session.budget_mut().set_from_str(amount) {
        session.save(&session_path).await?;
        // The ceiling is guaranteed set after a successful set_from_str
        match session.budget().limit() {
            Some(limit) => format!("Budget set to {limit}"),
            None => "Budget set".to_string(),
        }
    } else {
        warn!("Rejected invalid budget value '{amount}'");
        "Budget unchanged: the amount must be a positive number".to_string()
    };

    Ok(Out::new(message, session))
}

/// Clears the session's spending ceiling. Always succeeds.
pub async fn budget_clear(config: Config) -> Result<Out<Session>> {
    let session_path = config.session_path();
    let mut session = Session::load(&session_path).await?;
    session.budget_mut().clear();
    session.save(&session_path).await?;
    Ok(Out::new("Budget cleared", session))
}

/// Shows the ceiling, basket total and remaining balance.
pub async fn budget_show(config: Config) -> Result<Out<Session>> {
    let session = Session::load(&config.session_path()).await?;

    let message = match session.budget().limit() {
        Some(limit) => {
            let spent = session.spent();
            // remaining() is Some whenever a limit is set
            let remaining = session.remaining().unwrap_or_default();
            format!("Budget: {limit}\nSpent: {spent}\nRemaining: {remaining}")
        }
        None => "No budget set".to_string(),
    };

    Ok(Out::new(message, session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{basket_toggle, fetch};
    use crate::test::TestEnv;
    use crate::Mode;

    #[tokio::test]
    async fn test_set_and_show() {
        let env = TestEnv::new().await;

        budget_set(env.config(), "$150.00").await.unwrap();

        let out = budget_show(env.config()).await.unwrap();
        assert!(out.message().contains("Budget: $150.00"));
        assert!(out.message().contains("Remaining: $150.00"));
    }

    #[tokio::test]
    async fn test_invalid_set_is_a_noop_not_an_error() {
        let env = TestEnv::new().await;
        budget_set(env.config(), "100.00").await.unwrap();

        for bad in ["abc", "-5", "0"] {
            let out = budget_set(env.config(), bad).await.unwrap();
            assert!(out.message().contains("Budget unchanged"), "input: {bad}");
        }

        let session = Session::load(&env.config().session_path()).await.unwrap();
        assert_eq!(
            session.budget().limit().unwrap().to_price_string(),
            "100.00"
        );
    }

    #[tokio::test]
    async fn test_clear_hides_remaining() {
        let env = TestEnv::new().await;
        budget_set(env.config(), "100.00").await.unwrap();
        budget_clear(env.config()).await.unwrap();

        let out = budget_show(env.config()).await.unwrap();
        assert_eq!(out.message(), "No budget set");
        assert_eq!(out.structure().unwrap().remaining(), None);
    }

    #[tokio::test]
    async fn test_remaining_tracks_basket_total() {
        let env = TestEnv::new().await;
        fetch(env.config(), Mode::Test).await.unwrap();
        budget_set(env.config(), "100.00").await.unwrap();
        basket_toggle(env.config(), "fg-001").await.unwrap(); // $48.99

        let out = budget_show(env.config()).await.unwrap();
        assert!(out.message().contains("Spent: $48.99"));
        assert!(out.message().contains("Remaining: $51.01"));
    }
}
