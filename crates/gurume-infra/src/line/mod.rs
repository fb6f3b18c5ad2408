//! LINE Messaging API adapter.
//!
//! - `signature`: `X-Line-Signature` verification
//! - `webhook`: webhook body to [`InboundEvent`](gurume_types::event::InboundEvent)s
//! - `render`: outbound message specifications to LINE message JSON
//! - `client`: `ReplySender` over the reply endpoint

pub mod client;
pub mod render;
pub mod signature;
pub mod webhook;

pub use client::LineReplyClient;
pub use webhook::{WebhookError, parse_events};

/// Header carrying the webhook body signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";
