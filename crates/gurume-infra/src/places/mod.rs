//! Google Places adapter.
//!
//! `GooglePlacesClient` implements the `PlaceSearch` port over the Places
//! web service (nearby search and place details). `PhotoResolver` turns
//! photo references into displayable URLs.

pub mod client;
pub mod photo;
pub mod types;

pub use client::GooglePlacesClient;
pub use photo::PhotoResolver;

/// Production endpoint prefix of the Places web service.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
