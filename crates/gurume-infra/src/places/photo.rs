//! PhotoResolver -- turns photo references into displayable image URLs.
//!
//! The photo endpoint answers with a redirect to the real image. The resolver
//! issues a HEAD request without following redirects and reads the
//! `Location` header. Places without a photo, and lookups that fail, get a
//! placeholder from a rotating set so carousels never show a broken image.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::future::join_all;
use reqwest::header::LOCATION;
use secrecy::{ExposeSecret, SecretString};

use gurume_types::error::SearchError;

/// Maximum image width requested from the photo endpoint.
const MAX_WIDTH: &str = "350";

/// Time budget for one photo lookup.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Number of placeholder images in the rotation.
pub const PLACEHOLDER_COUNT: usize = 13;

pub struct PhotoResolver {
    client: reqwest::Client,
    api_key: Arc<SecretString>,
    base_url: String,
    next_placeholder: AtomicUsize,
}

impl PhotoResolver {
    pub fn new(api_key: Arc<SecretString>, base_url: String) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Http(format!("failed to build photo client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            next_placeholder: AtomicUsize::new(0),
        })
    }

    /// Next placeholder image in the rotation.
    pub fn placeholder(&self) -> String {
        let n = self.next_placeholder.fetch_add(1, Ordering::Relaxed) % PLACEHOLDER_COUNT + 1;
        format!("https://scdn.line-apps.com/n/channel_devcenter/img/flexsnapshot/clip/clip{n}.jpg")
    }

    /// Resolve one reference. Never fails: falls back to a placeholder.
    pub async fn resolve(&self, photo_reference: Option<&str>) -> String {
        let Some(reference) = photo_reference else {
            return self.placeholder();
        };

        let response = self
            .client
            .head(format!("{}/photo", self.base_url))
            .query(&[
                ("maxwidth", MAX_WIDTH),
                ("photoreference", reference),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_redirection() => {
                match resp.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
                    Some(location) => location.to_string(),
                    None => {
                        tracing::debug!(status = %resp.status(), "photo redirect without location");
                        self.placeholder()
                    }
                }
            }
            Ok(resp) => {
                tracing::debug!(status = %resp.status(), "photo lookup did not redirect");
                self.placeholder()
            }
            Err(e) => {
                // without_url: the request URL carries the API key
                tracing::warn!(error = %e.without_url(), "photo lookup failed");
                self.placeholder()
            }
        }
    }

    /// Resolve many references concurrently, preserving input order.
    pub async fn resolve_all(&self, references: &[Option<&str>]) -> Vec<String> {
        join_all(references.iter().map(|r| self.resolve(*r))).await
    }
}
