//! Infrastructure layer for gurume.
//!
//! Contains implementations of the ports defined in `gurume-core`: SQLite
//! document storage, SHA-256 key hashing, the Google Places client, and the
//! LINE webhook/reply adapter. Configuration is read from the environment.

pub mod config;
pub mod crypto;
pub mod line;
pub mod places;
pub mod sqlite;
