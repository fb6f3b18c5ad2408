//! `gurume query` -- dump, and optionally clear, one user's pending search.

use gurume_infra::config::BotConfig;
use gurume_types::query::Query;

use crate::state::{ConcreteUserStore, open_user_store};

pub async fn run(config: &BotConfig, user_id: &str, clear: bool) -> anyhow::Result<()> {
    let store = open_user_store(config).await?;
    let query = take_or_show(&store, user_id, clear).await?;
    println!("{}", serde_json::to_string_pretty(&query)?);
    Ok(())
}

async fn take_or_show(
    store: &ConcreteUserStore,
    user_id: &str,
    clear: bool,
) -> anyhow::Result<Option<Query>> {
    let query = store.get_query(user_id).await?;
    if clear {
        store.delete_query(user_id).await?;
        tracing::info!(existed = query.is_some(), "pending query cleared");
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gurume_types::query::Radius;

    use crate::state::test_config;

    #[tokio::test]
    async fn test_show_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_user_store(&test_config(dir.path())).await.unwrap();

        assert_eq!(take_or_show(&store, "U1", false).await.unwrap(), None);

        let query = Query::new("35.68", "139.76").with_radius(Radius::M2000);
        store.save_query("U1", &query).await.unwrap();
        assert_eq!(
            take_or_show(&store, "U1", false).await.unwrap(),
            Some(query.clone())
        );

        assert_eq!(take_or_show(&store, "U1", true).await.unwrap(), Some(query));
        assert_eq!(store.get_query("U1").await.unwrap(), None);
    }
}
