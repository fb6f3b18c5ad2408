//! Per-user pending query and favorites list.
//!
//! Neither record is guarded against concurrent read-modify-write: two events
//! from the same user processed at the same time can overwrite each other's
//! changes (last write wins).

use gurume_types::error::RepositoryError;
use gurume_types::place::FavoriteList;
use gurume_types::query::Query;

use super::document_store::DocumentStore;
use super::entity::EntityStore;
use crate::service::hash::KeyHasher;

/// Typed access to the two per-user records the conversation needs.
pub struct UserQueryStore<S, H> {
    entities: EntityStore<S, H>,
}

impl<S: DocumentStore, H: KeyHasher> UserQueryStore<S, H> {
    pub fn new(store: S, hasher: H) -> Self {
        Self {
            entities: EntityStore::new(store, hasher),
        }
    }

    /// The user's pending query, or None if they never sent a location.
    pub async fn get_query(&self, user_id: &str) -> Result<Option<Query>, RepositoryError> {
        self.entities.get(user_id).await
    }

    pub async fn save_query(&self, user_id: &str, query: &Query) -> Result<(), RepositoryError> {
        self.entities.save(user_id, query).await
    }

    pub async fn delete_query(&self, user_id: &str) -> Result<(), RepositoryError> {
        self.entities.delete::<Query>(user_id).await
    }

    /// The user's favorites, or None if no list was ever saved.
    pub async fn get_favorites(
        &self,
        user_id: &str,
    ) -> Result<Option<FavoriteList>, RepositoryError> {
        self.entities.get(user_id).await
    }

    pub async fn save_favorites(
        &self,
        user_id: &str,
        favorites: &FavoriteList,
    ) -> Result<(), RepositoryError> {
        self.entities.save(user_id, favorites).await
    }

    pub async fn delete_favorites(&self, user_id: &str) -> Result<(), RepositoryError> {
        self.entities.delete::<FavoriteList>(user_id).await
    }
}
