//! Places web service response types.
//!
//! Only the fields the bot reads are modelled; everything else is ignored.

use serde::Deserialize;

/// Statuses that count as success for a nearby search.
pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    pub geometry: Geometry,
}

impl NearbyResult {
    /// Reference of the first photo, if the place has any.
    pub fn photo_reference(&self) -> Option<&str> {
        self.photos.first().map(|p| p.photo_reference.as_str())
    }

    /// Map search link pinned to this place.
    pub fn map_uri(&self) -> String {
        let location = &self.geometry.location;
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}&query_place_id={}",
            location.lat, location.lng, self.place_id
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct PhotoRef {
    pub photo_reference: String,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Google Maps page of the place.
    #[serde(default)]
    pub url: String,
}
