//! Per-kind entity capability over a [`DocumentStore`].
//!
//! Each stored entity type names its record kind; [`EntityStore`] derives the
//! record name from the hashed user identifier and handles (de)serialization.

use serde::Serialize;
use serde::de::DeserializeOwned;

use gurume_types::error::RepositoryError;
use gurume_types::place::FavoriteList;
use gurume_types::query::Query;

use super::document_store::DocumentStore;
use crate::service::hash::KeyHasher;

/// A record type stored once per user.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Record kind, e.g. `"Query"`.
    const KIND: &'static str;
}

impl Entity for Query {
    const KIND: &'static str = "Query";
}

impl Entity for FavoriteList {
    const KIND: &'static str = "Favorite";
}

/// Fully-qualified record address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKey {
    pub kind: &'static str,
    pub name: String,
}

/// get/save/delete for any [`Entity`], keyed by hashed user identifier.
pub struct EntityStore<S, H> {
    store: S,
    hasher: H,
}

impl<S: DocumentStore, H: KeyHasher> EntityStore<S, H> {
    pub fn new(store: S, hasher: H) -> Self {
        Self { store, hasher }
    }

    /// The record address for a user's entity of kind `E`.
    pub fn name_key<E: Entity>(&self, user_id: &str) -> EntityKey {
        EntityKey {
            kind: E::KIND,
            name: self.hasher.hash_key(user_id),
        }
    }

    pub async fn get<E: Entity>(&self, user_id: &str) -> Result<Option<E>, RepositoryError> {
        let key = self.name_key::<E>(user_id);
        let value = self.store.get(key.kind, &key.name).await?;
        tracing::debug!(kind = key.kind, key = %key.name, found = value.is_some(), "entity get");

        value
            .map(|v| {
                serde_json::from_value(v).map_err(|e| {
                    RepositoryError::Serialization(format!("invalid {} record: {e}", key.kind))
                })
            })
            .transpose()
    }

    pub async fn save<E: Entity>(&self, user_id: &str, entity: &E) -> Result<(), RepositoryError> {
        let key = self.name_key::<E>(user_id);
        let value = serde_json::to_value(entity)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.store.put(key.kind, &key.name, &value).await?;
        tracing::debug!(kind = key.kind, key = %key.name, "entity saved");
        Ok(())
    }

    pub async fn delete<E: Entity>(&self, user_id: &str) -> Result<(), RepositoryError> {
        let key = self.name_key::<E>(user_id);
        self.store.delete(key.kind, &key.name).await?;
        tracing::debug!(kind = key.kind, key = %key.name, "entity deleted");
        Ok(())
    }
}
