//! Shared domain types for gurume.
//!
//! This crate contains the domain types used across the bot: the pending
//! search Query, place records and favorite lists, the postback wire codec,
//! inbound events and outbound message specifications, plus their errors.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod error;
pub mod event;
pub mod message;
pub mod place;
pub mod postback;
pub mod query;
