//! LINE webhook endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use secrecy::ExposeSecret;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use gurume_infra::line::signature::verify_signature;
use gurume_infra::line::{SIGNATURE_HEADER, WebhookError, parse_events};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /callback - verify, parse and dispatch one webhook delivery.
///
/// Answers 200 once every event has been handled. Per-event failures never
/// fail the delivery; only a bad signature or body does.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;
    verify_signature(state.channel_secret.expose_secret().as_bytes(), &body, signature)?;

    let events = parse_events(&body)?;
    let delivery_id = Uuid::now_v7();
    let span = info_span!("webhook.delivery", %delivery_id, events = events.len());

    let summary = state.dispatcher.dispatch(&events).instrument(span.clone()).await;
    span.in_scope(|| {
        info!(
            replied = summary.replied,
            dropped = summary.dropped,
            failed = summary.failed,
            "webhook delivery handled"
        );
    });

    Ok(StatusCode::OK)
}
