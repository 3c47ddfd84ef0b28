//! Saved-list command handlers: save, list and share basket snapshots.

use crate::args::ShareArgs;
use crate::commands::Out;
use crate::export;
use crate::model::Session;
use crate::store::SavedList;
use crate::{Config, Result};

/// Saves the current basket as a shopping-list snapshot.
pub async fn save(config: Config) -> Result<Out<SavedList>> {
    let session = Session::load(&config.session_path()).await?;
    let list = config.list_store().save(session.basket()).await?;

    let message = format!(
        "Saved list {} with {} items, total {}",
        list.id(),
        list.items().len(),
        list.total()
    );
    Ok(Out::new(message, list))
}

/// Shows saved shopping lists, most recent first.
pub async fn lists(config: Config) -> Result<Out<Vec<SavedList>>> {
    let lists = config.list_store().load_all().await?;

    let message = if lists.is_empty() {
        "No saved lists yet, run 'flyer save'".to_string()
    } else {
        lists
            .iter()
            .map(|l| {
                format!(
                    "{}  {}  {} items, total {}",
                    l.id(),
                    l.saved_at(),
                    l.items().len(),
                    l.total()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Out::new(message, lists))
}

/// Renders a saved list, or the current basket when no list id is given, as shareable flat text.
pub async fn share(config: Config, args: ShareArgs) -> Result<Out<String>> {
    let text = match args.list_id() {
        Some(id_prefix) => {
            let list = config.list_store().find(id_prefix).await?;
            export::share_text(list.items(), list.total())
        }
        None => {
            let session = Session::load(&config.session_path()).await?;
            export::share_text(session.basket().items(), session.basket().total())
        }
    };

    Ok(Out::new(text.clone(), text))
}
