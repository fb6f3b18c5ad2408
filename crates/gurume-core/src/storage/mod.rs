//! Storage abstractions for gurume.
//!
//! Defines the document store port, the entity capability layered on top of
//! it, and the per-user query/favorites store the engine uses.
//! Implementations of `DocumentStore` live in gurume-infra.

pub mod document_store;
pub mod entity;
pub mod user_store;
