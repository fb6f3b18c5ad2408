//! Webhook body parsing.
//!
//! Turns a LINE webhook delivery into the platform-neutral events the
//! conversation engine understands. Event and message types the bot does not
//! handle (follow, sticker, image, ...) are skipped, as are events without a
//! reply token or user id.

use serde::Deserialize;

use gurume_types::event::{EventKind, InboundEvent};

/// Errors that can occur while accepting a webhook delivery.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The signature header is absent.
    #[error("missing signature header")]
    MissingSignature,

    /// The signature does not match the body.
    #[error("webhook signature verification failed")]
    InvalidSignature,

    /// The channel secret cannot key an HMAC.
    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),

    /// The body is not a webhook delivery.
    #[error("malformed webhook body: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct WebhookBody {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    reply_token: Option<String>,
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    postback: Option<RawPostback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSource {
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawMessage {
    Text {
        text: String,
    },
    Location {
        latitude: f64,
        longitude: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct RawPostback {
    data: String,
}

impl RawEvent {
    fn into_inbound(self) -> Option<InboundEvent> {
        let kind = match (self.kind.as_str(), self.message, self.postback) {
            ("message", Some(RawMessage::Text { text }), _) => EventKind::Text { text },
            ("message", Some(RawMessage::Location { latitude, longitude }), _) => {
                EventKind::Location {
                    latitude,
                    longitude,
                }
            }
            ("postback", _, Some(postback)) => EventKind::Postback {
                data: postback.data,
            },
            (other, _, _) => {
                tracing::debug!(event_type = other, "skipping unsupported event");
                return None;
            }
        };

        let user_id = self.source.and_then(|s| s.user_id);
        match (user_id, self.reply_token) {
            (Some(user_id), Some(reply_token)) => Some(InboundEvent {
                user_id,
                reply_token,
                kind,
            }),
            _ => {
                tracing::debug!(kind = kind.name(), "skipping event without user or reply token");
                None
            }
        }
    }
}

/// Parse a webhook body into the events the bot handles, in delivery order.
pub fn parse_events(body: &[u8]) -> Result<Vec<InboundEvent>, WebhookError> {
    let body: WebhookBody =
        serde_json::from_slice(body).map_err(|e| WebhookError::Malformed(e.to_string()))?;
    Ok(body
        .events
        .into_iter()
        .filter_map(RawEvent::into_inbound)
        .collect())
}
