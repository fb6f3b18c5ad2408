//! GooglePlacesClient -- concrete [`PlaceSearch`] over the Places web service.
//!
//! The API key is wrapped in [`SecretString`]. It travels only as a query
//! parameter and is stripped from every logged error (reqwest errors embed
//! the request URL, so they are logged `without_url`).

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span};

use gurume_core::search::PlaceSearch;
use gurume_types::error::SearchError;
use gurume_types::place::PlaceRecord;
use gurume_types::query::Query;

use super::DEFAULT_BASE_URL;
use super::photo::PhotoResolver;
use super::types::{DetailsResponse, NearbySearchResponse, STATUS_OK, STATUS_ZERO_RESULTS};

/// Language of names and addresses in responses.
const LANGUAGE: &str = "ja";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: Arc<SecretString>,
    base_url: String,
    photos: PhotoResolver,
}

impl GooglePlacesClient {
    pub fn new(api_key: SecretString) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Client against a different endpoint prefix (tests, proxies).
    pub fn with_base_url(api_key: SecretString, base_url: String) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Http(format!("failed to build places client: {e}")))?;

        let api_key = Arc::new(api_key);
        let photos = PhotoResolver::new(Arc::clone(&api_key), base_url.clone())?;

        Ok(Self {
            client,
            api_key,
            base_url,
            photos,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        let response = self
            .client
            .get(format!("{}/{endpoint}/json", self.base_url))
            .query(&[("language", LANGUAGE), ("key", self.api_key.expose_secret())])
            .query(params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SearchError::Http(e.without_url().to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(e.without_url().to_string()))?;

        serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))
    }

    async fn fetch_nearby(&self, query: &Query) -> Result<Vec<PlaceRecord>, SearchError> {
        let location = query.location();
        let radius = query.radius.meters().to_string();
        let keyword = query.keyword_param();

        let mut params = vec![
            ("type", "restaurant"),
            ("location", location.as_str()),
            ("radius", radius.as_str()),
        ];
        if let Some(keyword) = keyword.as_deref() {
            params.push(("keyword", keyword));
        }

        let response: NearbySearchResponse = self.get_json("nearbysearch", &params).await?;
        match response.status.as_str() {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS => return Ok(Vec::new()),
            _ => return Err(status_error(response.status, response.error_message)),
        }

        let references: Vec<Option<&str>> = response
            .results
            .iter()
            .map(|r| r.photo_reference())
            .collect();
        let photos = self.photos.resolve_all(&references).await;

        let places: Vec<PlaceRecord> = response
            .results
            .iter()
            .zip(photos)
            .map(|(result, photo_uri)| PlaceRecord {
                place_id: result.place_id.clone(),
                name: result.name.clone(),
                rating: result.rating.unwrap_or(0.0),
                photo_uri,
                map_uri: result.map_uri(),
            })
            .collect();

        debug!(results = places.len(), "nearby search complete");
        Ok(places)
    }

    async fn fetch_details(&self, place_id: &str) -> Result<PlaceRecord, SearchError> {
        let response: DetailsResponse = self.get_json("details", &[("placeid", place_id)]).await?;
        if response.status != STATUS_OK {
            return Err(status_error(response.status, response.error_message));
        }
        let result = response
            .result
            .ok_or_else(|| SearchError::Parse("details response without result".to_string()))?;

        // details never resolves photos
        Ok(PlaceRecord {
            place_id: result.place_id,
            name: result.name,
            rating: result.rating.unwrap_or(0.0),
            photo_uri: self.photos.placeholder(),
            map_uri: result.url,
        })
    }
}

fn status_error(status: String, message: Option<String>) -> SearchError {
    SearchError::Status {
        status,
        message: message.unwrap_or_default(),
    }
}

impl PlaceSearch for GooglePlacesClient {
    async fn nearby_search(&self, query: &Query) -> Result<Vec<PlaceRecord>, SearchError> {
        let span = info_span!(
            "places.nearby_search",
            location = %query.location(),
            radius = query.radius.meters()
        );
        self.fetch_nearby(query).instrument(span).await
    }

    async fn details(&self, place_id: &str) -> Result<PlaceRecord, SearchError> {
        let span = info_span!("places.details", place_id = %place_id);
        self.fetch_details(place_id).instrument(span).await
    }
}
