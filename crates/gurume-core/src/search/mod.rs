//! PlaceSearch trait definition.
//!
//! The conversation engine talks to the places provider only through this
//! trait. The Google Places implementation lives in gurume-infra.

use gurume_types::error::SearchError;
use gurume_types::place::PlaceRecord;
use gurume_types::query::Query;

/// Nearby search and place details.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait PlaceSearch: Send + Sync {
    /// Restaurants around the query location, in provider order, each with a
    /// display photo already resolved.
    fn nearby_search(
        &self,
        query: &Query,
    ) -> impl std::future::Future<Output = Result<Vec<PlaceRecord>, SearchError>> + Send;

    /// Canonical details for one place.
    fn details(
        &self,
        place_id: &str,
    ) -> impl std::future::Future<Output = Result<PlaceRecord, SearchError>> + Send;
}
