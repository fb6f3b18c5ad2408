//! HTTP layer for gurume.
//!
//! Axum server receiving LINE webhook deliveries at `/callback`, plus a
//! health endpoint.

pub mod error;
pub mod handlers;
pub mod router;
