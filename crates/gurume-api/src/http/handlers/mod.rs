//! Route handlers.

pub mod webhook;
