//! Rendering of [`OutboundMessage`]s into LINE message objects.

use serde_json::{Value, json};

use gurume_types::message::{Action, ActionKind, Bubble, OutboundMessage};

const GOLD_STAR: &str = "https://scdn.line-apps.com/n/channel_devcenter/img/fx/review_gold_star_28.png";
const GRAY_STAR: &str = "https://scdn.line-apps.com/n/channel_devcenter/img/fx/review_gray_star_28.png";
const STAR_COUNT: usize = 5;

/// Buttons template text limit when a title is present.
const TITLED_TEXT_LIMIT: usize = 60;
/// Buttons template text limit without a title.
const UNTITLED_TEXT_LIMIT: usize = 160;

pub fn render_message(message: &OutboundMessage) -> Value {
    match message {
        OutboundMessage::Text { text } => json!({"type": "text", "text": text}),
        OutboundMessage::Buttons {
            alt_text,
            title,
            text,
            actions,
        } => {
            let limit = if title.is_some() {
                TITLED_TEXT_LIMIT
            } else {
                UNTITLED_TEXT_LIMIT
            };
            let mut template = json!({
                "type": "buttons",
                "text": truncate(text, limit),
                "actions": actions.iter().map(render_action).collect::<Vec<_>>(),
            });
            if let Some(title) = title {
                template["title"] = json!(title);
            }
            json!({"type": "template", "altText": alt_text, "template": template})
        }
        OutboundMessage::QuickReply { text, options } => {
            let items: Vec<Value> = options
                .iter()
                .map(|a| json!({"type": "action", "action": render_action(a)}))
                .collect();
            json!({"type": "text", "text": text, "quickReply": {"items": items}})
        }
        OutboundMessage::Carousel { alt_text, bubbles } => json!({
            "type": "flex",
            "altText": alt_text,
            "contents": {
                "type": "carousel",
                "contents": bubbles.iter().map(render_bubble).collect::<Vec<_>>(),
            },
        }),
    }
}

pub fn render_action(action: &Action) -> Value {
    match &action.kind {
        ActionKind::Postback { data } => {
            json!({"type": "postback", "label": action.label, "data": data})
        }
        ActionKind::Uri { uri } => json!({"type": "uri", "label": action.label, "uri": uri}),
    }
}

/// Kilo bubble: hero photo, bold name, star rating, footer buttons.
fn render_bubble(bubble: &Bubble) -> Value {
    let filled = bubble.filled_stars();
    let mut rating: Vec<Value> = (0..STAR_COUNT)
        .map(|i| {
            let url = if i < filled { GOLD_STAR } else { GRAY_STAR };
            json!({"type": "icon", "size": "sm", "url": url})
        })
        .collect();
    rating.push(json!({
        "type": "text",
        "text": bubble.rating_display(),
        "size": "sm",
        "color": "#999999",
        "margin": "md",
        "flex": 0,
    }));

    let buttons: Vec<Value> = bubble
        .actions
        .iter()
        .map(|a| json!({"type": "button", "style": "link", "height": "sm", "action": render_action(a)}))
        .collect();

    json!({
        "type": "bubble",
        "size": "kilo",
        "hero": {
            "type": "image",
            "url": bubble.hero_image_uri,
            "size": "full",
            "aspectRatio": "20:13",
            "aspectMode": "cover",
        },
        "body": {
            "type": "box",
            "layout": "vertical",
            "contents": [
                {"type": "text", "text": bubble.title, "weight": "bold", "size": "lg", "wrap": true},
                {"type": "box", "layout": "baseline", "margin": "md", "contents": rating},
            ],
        },
        "footer": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "flex": 0,
            "contents": buttons,
        },
    })
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit - 1).collect();
    cut.push('…');
    cut
}
