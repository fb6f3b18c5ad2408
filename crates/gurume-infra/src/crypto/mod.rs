//! Cryptographic operations for gurume.
//!
//! - `hash`: SHA-256 hashing of user ids into storage keys

pub mod hash;
