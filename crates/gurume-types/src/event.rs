//! Inbound events delivered by the messaging platform.

use serde::{Deserialize, Serialize};

/// One user action the bot must react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Platform user identifier; hashed before it is used as a storage key.
    pub user_id: String,
    /// Single-use token addressing the reply to this event.
    pub reply_token: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Text { text: String },
    Location { latitude: f64, longitude: f64 },
    Postback { data: String },
}

impl EventKind {
    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Text { .. } => "text",
            EventKind::Location { .. } => "location",
            EventKind::Postback { .. } => "postback",
        }
    }
}
