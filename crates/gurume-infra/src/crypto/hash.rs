//! Storage names for per-user documents.
//!
//! LINE user ids identify a person across every bot on the channel, so they
//! are never written to the database. Each document is named by the SHA-256
//! of the id instead; the same id always lands on the same row.

use sha2::{Digest, Sha256};

use gurume_core::service::hash::KeyHasher;

/// Names documents by the lowercase hex SHA-256 of the user id.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256KeyHasher;

impl Sha256KeyHasher {
    pub fn new() -> Self {
        Self
    }
}

impl KeyHasher for Sha256KeyHasher {
    fn hash_key(&self, user_id: &str) -> String {
        format!("{:x}", Sha256::digest(user_id.as_bytes()))
    }
}
