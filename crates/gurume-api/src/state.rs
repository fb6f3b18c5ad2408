//! Application state wiring the adapters into the conversation engine.
//!
//! The engine and dispatcher are generic over their ports; this module pins
//! them to the SQLite, Google Places and LINE implementations.

use std::sync::Arc;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use gurume_core::conversation::{ConversationEngine, EventDispatcher};
use gurume_core::storage::user_store::UserQueryStore;
use gurume_infra::config::{BotConfig, ChannelConfig};
use gurume_infra::crypto::hash::Sha256KeyHasher;
use gurume_infra::line::LineReplyClient;
use gurume_infra::places::GooglePlacesClient;
use gurume_infra::sqlite::document::SqliteDocumentStore;
use gurume_infra::sqlite::pool::DatabasePool;

pub type ConcreteUserStore = UserQueryStore<SqliteDocumentStore, Sha256KeyHasher>;

pub type ConcreteDispatcher =
    EventDispatcher<SqliteDocumentStore, Sha256KeyHasher, GooglePlacesClient, LineReplyClient>;

/// Shared state of the webhook server.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ConcreteDispatcher>,
    pub channel_secret: Arc<SecretString>,
}

impl AppState {
    pub fn new(dispatcher: ConcreteDispatcher, channel_secret: SecretString) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            channel_secret: Arc::new(channel_secret),
        }
    }

    /// Connect to the database and wire every adapter.
    pub async fn init(config: &BotConfig, channel: ChannelConfig) -> anyhow::Result<Self> {
        let engine = ConversationEngine::new(open_user_store(config).await?, places_client(config)?);
        let sender = LineReplyClient::new(channel.channel_token)
            .context("failed to create LINE reply client")?;

        if let Some(channel_id) = &channel.channel_id {
            tracing::info!(%channel_id, "LINE channel configured");
        }
        Ok(Self::new(EventDispatcher::new(engine, sender), channel.channel_secret))
    }
}

/// Per-user store scoped to the configured project.
pub async fn open_user_store(config: &BotConfig) -> anyhow::Result<ConcreteUserStore> {
    if let Some(dir) = database_dir(&config.database_url) {
        tokio::fs::create_dir_all(dir).await?;
    }
    let pool = DatabasePool::new(&config.database_url)
        .await
        .context("failed to open database")?;
    let docs = SqliteDocumentStore::new(pool, config.project_id.clone());
    Ok(UserQueryStore::new(docs, Sha256KeyHasher::new()))
}

pub fn places_client(config: &BotConfig) -> anyhow::Result<GooglePlacesClient> {
    let key = SecretString::from(config.places_api_key.expose_secret().to_string());
    GooglePlacesClient::new(key).context("failed to create places client")
}

/// Directory holding a file-backed SQLite database, if the URL names one.
fn database_dir(url: &str) -> Option<&std::path::Path> {
    let path = url.strip_prefix("sqlite://")?.split('?').next()?;
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
}

/// Config pointing at a database file inside `dir`, for command tests.
#[cfg(test)]
pub fn test_config(dir: &std::path::Path) -> BotConfig {
    BotConfig {
        places_api_key: SecretString::from("unused"),
        project_id: "test".to_string(),
        database_url: gurume_infra::sqlite::pool::database_url_in(&dir.join("data")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_database_dir() {
        assert_eq!(
            database_dir("sqlite:///home/u/.gurume/gurume.db?mode=rwc"),
            Some(Path::new("/home/u/.gurume"))
        );
        assert_eq!(database_dir("sqlite://:memory:"), None);
        assert_eq!(database_dir("sqlite://local.db"), None);
        assert_eq!(database_dir("postgres://x"), None);
    }
}
