//! LineReplyClient -- [`ReplySender`] over the LINE reply endpoint.
//!
//! The channel access token is a [`SecretString`]; it is only exposed when
//! building the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use gurume_core::delivery::ReplySender;
use gurume_types::error::DeliveryError;
use gurume_types::message::OutboundMessage;

use super::render::render_message;

pub const DEFAULT_BASE_URL: &str = "https://api.line.me";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct LineReplyClient {
    client: reqwest::Client,
    channel_token: SecretString,
    base_url: String,
}

impl LineReplyClient {
    pub fn new(channel_token: SecretString) -> Result<Self, DeliveryError> {
        Self::with_base_url(channel_token, DEFAULT_BASE_URL.to_string())
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(
        channel_token: SecretString,
        base_url: String,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::Http(format!("failed to build reply client: {e}")))?;

        Ok(Self {
            client,
            channel_token,
            base_url,
        })
    }
}

impl ReplySender for LineReplyClient {
    async fn reply(
        &self,
        reply_token: &str,
        messages: &[OutboundMessage],
    ) -> Result<(), DeliveryError> {
        let body = json!({
            "replyToken": reply_token,
            "messages": messages.iter().map(render_message).collect::<Vec<_>>(),
        });

        let response = self
            .client
            .post(format!("{}/v2/bot/message/reply", self.base_url))
            .bearer_auth(self.channel_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(messages = messages.len(), "reply delivered");
        Ok(())
    }
}
