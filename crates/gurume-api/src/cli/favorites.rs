//! `gurume favorites` -- dump, and optionally clear, one user's favorites list.

use gurume_infra::config::BotConfig;
use gurume_types::place::FavoriteList;

use crate::state::{ConcreteUserStore, open_user_store};

pub async fn run(config: &BotConfig, user_id: &str, clear: bool) -> anyhow::Result<()> {
    let store = open_user_store(config).await?;
    let favorites = take_or_show(&store, user_id, clear).await?;
    println!("{}", serde_json::to_string_pretty(&favorites)?);
    Ok(())
}

/// The stored list (empty when absent). With `clear` the record is deleted
/// after it has been read, so the output shows what was removed.
async fn take_or_show(
    store: &ConcreteUserStore,
    user_id: &str,
    clear: bool,
) -> anyhow::Result<FavoriteList> {
    let favorites = store.get_favorites(user_id).await?.unwrap_or_default();
    if clear {
        store.delete_favorites(user_id).await?;
        tracing::info!(entries = favorites.len(), "favorites cleared");
    }
    Ok(favorites)
}
