//! Conversation logic and port trait definitions for gurume.
//!
//! This crate defines the "ports" (storage, hashing, place search, reply
//! delivery) that the infrastructure layer implements, and the conversation
//! engine that drives them. It depends only on `gurume-types` -- never on
//! `gurume-infra` or any database/HTTP crate.

pub mod conversation;
pub mod delivery;
pub mod search;
pub mod service;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
