//! Outbound message specifications.
//!
//! Platform-neutral descriptions of what the bot replies with. The LINE
//! adapter in gurume-infra renders these into the platform's JSON.

use serde::{Deserialize, Serialize};

/// A tappable action attached to a button, bubble, or quick reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Sends `data` back to the webhook as a postback event.
    Postback { data: String },
    /// Opens a URI on the user's device.
    Uri { uri: String },
}

impl Action {
    pub fn postback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Postback { data: data.into() },
        }
    }

    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Uri { uri: uri.into() },
        }
    }

    /// Postback data, if this is a postback action.
    pub fn postback_data(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Postback { data } => Some(data),
            ActionKind::Uri { .. } => None,
        }
    }
}

/// One card in a carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub hero_image_uri: String,
    pub title: String,
    pub rating: f64,
    pub actions: Vec<Action>,
}

impl Bubble {
    /// Rating as shown next to the stars, one decimal place.
    pub fn rating_display(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Number of filled stars out of five.
    pub fn filled_stars(&self) -> usize {
        self.rating.clamp(0.0, 5.0).floor() as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Text {
        text: String,
    },
    Buttons {
        alt_text: String,
        title: Option<String>,
        text: String,
        actions: Vec<Action>,
    },
    /// Text with quick-reply postback buttons underneath.
    QuickReply {
        text: String,
        options: Vec<Action>,
    },
    Carousel {
        alt_text: String,
        bubbles: Vec<Bubble>,
    },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text { text: text.into() }
    }

    /// Body text of text and quick-reply messages.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutboundMessage::Text { text } | OutboundMessage::QuickReply { text, .. } => {
                Some(text)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble(rating: f64) -> Bubble {
        Bubble {
            hero_image_uri: String::new(),
            title: "t".to_string(),
            rating,
            actions: Vec::new(),
        }
    }

    #[test]
    fn test_rating_display_one_decimal() {
        assert_eq!(bubble(4.0).rating_display(), "4.0");
        assert_eq!(bubble(3.46).rating_display(), "3.5");
    }

    #[test]
    fn test_filled_stars_truncates() {
        assert_eq!(bubble(3.9).filled_stars(), 3);
        assert_eq!(bubble(0.0).filled_stars(), 0);
        assert_eq!(bubble(5.0).filled_stars(), 5);
        assert_eq!(bubble(7.0).filled_stars(), 5);
    }
}
