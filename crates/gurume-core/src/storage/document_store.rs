//! Document store trait.
//!
//! Flat named records grouped by kind, with no secondary indexes.
//! Implementations live in gurume-infra.

use gurume_types::error::RepositoryError;

/// Trait for kind/name-addressed JSON document storage.
///
/// Writes are last-write-wins; there is no compare-and-swap.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait DocumentStore: Send + Sync {
    /// Get a document. Returns None if it does not exist.
    fn get(
        &self,
        kind: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Create or replace a document.
    fn put(
        &self,
        kind: &str,
        name: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a document. No-op if it does not exist.
    fn delete(
        &self,
        kind: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
