//! Environment configuration for gurume.
//!
//! [`BotConfig`] is read once at start-up and passed explicitly to whatever
//! needs it. Secrets are held as [`SecretString`] and never logged.

use secrecy::SecretString;

use crate::sqlite::pool::default_database_url;

pub const ENV_CHANNEL_ID: &str = "LINE_CHANNEL_ID";
pub const ENV_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";
pub const ENV_CHANNEL_TOKEN: &str = "LINE_CHANNEL_TOKEN";
pub const ENV_PLACES_API_KEY: &str = "GCP_PLACES_API_KEY";
pub const ENV_PROJECT_ID: &str = "DATASTORE_PROJECT_ID";
pub const ENV_DATABASE_URL: &str = "GURUME_DATABASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
}

/// Messaging channel credentials.
#[derive(Debug)]
pub struct ChannelConfig {
    pub channel_id: Option<String>,
    pub channel_secret: SecretString,
    pub channel_token: SecretString,
}

/// Start-up configuration.
///
/// The channel credentials are only needed by the webhook server, so they are
/// loaded separately with [`BotConfig::channel`].
#[derive(Debug)]
pub struct BotConfig {
    pub places_api_key: SecretString,
    /// Persistence project; every stored document is scoped to it.
    pub project_id: String,
    pub database_url: String,
}

impl BotConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let project_id = get(ENV_PROJECT_ID).ok_or(ConfigError::Missing(ENV_PROJECT_ID))?;
        let places_api_key = get(ENV_PLACES_API_KEY)
            .map(SecretString::from)
            .ok_or(ConfigError::Missing(ENV_PLACES_API_KEY))?;
        let database_url = get(ENV_DATABASE_URL).unwrap_or_else(default_database_url);

        Ok(Self {
            places_api_key,
            project_id,
            database_url,
        })
    }

    /// Channel credentials from the process environment.
    pub fn channel() -> Result<ChannelConfig, ConfigError> {
        Self::channel_from_lookup(|name| std::env::var(name).ok())
    }

    pub fn channel_from_lookup<F>(lookup: F) -> Result<ChannelConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let secret = |name: &'static str| {
            get(name)
                .map(SecretString::from)
                .ok_or(ConfigError::Missing(name))
        };

        Ok(ChannelConfig {
            channel_id: get(ENV_CHANNEL_ID),
            channel_secret: secret(ENV_CHANNEL_SECRET)?,
            channel_token: secret(ENV_CHANNEL_TOKEN)?,
        })
    }
}
