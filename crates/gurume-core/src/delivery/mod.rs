//! ReplySender trait: hands finished replies to the messaging platform.

use gurume_types::error::DeliveryError;
use gurume_types::message::OutboundMessage;

/// Delivers a reply addressed by the event's reply token.
///
/// Replies are single-shot: callers log failures and do not retry.
pub trait ReplySender: Send + Sync {
    fn reply(
        &self,
        reply_token: &str,
        messages: &[OutboundMessage],
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}
