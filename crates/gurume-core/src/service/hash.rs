//! KeyHasher trait for deriving storage keys from user identifiers.
//!
//! Defined in gurume-core so the entity store can derive keys without
//! coupling to a specific hashing algorithm. The `Sha256KeyHasher` adapter
//! lives in gurume-infra.

/// One-way, fixed-length hashing of platform user identifiers.
///
/// The same identifier must always map to the same key. Keys are not a
/// security control; they keep record names a stable length and keep raw
/// identifiers out of the store.
pub trait KeyHasher: Send + Sync {
    /// Compute the storage key for a user identifier.
    fn hash_key(&self, user_id: &str) -> String;
}
