//! Place records and the per-user favorites list.

use serde::{Deserialize, Serialize};

/// Maximum number of places a user can keep as favorites.
pub const MAX_FAVORITES: usize = 10;

/// Maximum number of bubbles shown in a search-result carousel.
pub const MAX_RESULTS: usize = 10;

/// A normalized search result or favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider-assigned identifier; the natural key for favorites.
    pub place_id: String,
    pub name: String,
    /// 0.0 to 5.0; 0.0 when the provider has no rating.
    #[serde(default)]
    pub rating: f64,
    pub photo_uri: String,
    #[serde(rename = "googlemap_uri")]
    pub map_uri: String,
}

/// Minimal place handle embedded in favorite buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReference {
    pub place_id: String,
    /// Photo already resolved for the search result; empty for removals.
    #[serde(default)]
    pub photo_uri: String,
}

impl PlaceReference {
    pub fn for_place(place: &PlaceRecord) -> Self {
        Self {
            place_id: place.place_id.clone(),
            photo_uri: place.photo_uri.clone(),
        }
    }

    /// Reference without a photo, used by "remove from favorites".
    pub fn id_only(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            photo_uri: String::new(),
        }
    }
}

/// Outcome of [`FavoriteList::try_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended; carries the new list length.
    Added(usize),
    AlreadyRegistered,
    Full,
}

/// A user's favorite places, unique by `place_id`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteList {
    #[serde(default)]
    pub list: Vec<PlaceRecord>,
}

impl FavoriteList {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, place_id: &str) -> bool {
        self.list.iter().any(|p| p.place_id == place_id)
    }

    /// Append a place unless it is already present or the list is full.
    ///
    /// The duplicate check runs first, so re-adding a favorite to a full
    /// list reports `AlreadyRegistered`.
    pub fn try_add(&mut self, place: PlaceRecord) -> AddOutcome {
        if self.contains(&place.place_id) {
            return AddOutcome::AlreadyRegistered;
        }
        if self.list.len() >= MAX_FAVORITES {
            return AddOutcome::Full;
        }
        self.list.push(place);
        AddOutcome::Added(self.list.len())
    }

    /// Remove a place, keeping the relative order of the rest.
    ///
    /// Returns `false` when the place was not in the list.
    pub fn remove(&mut self, place_id: &str) -> bool {
        let before = self.list.len();
        self.list.retain(|p| p.place_id != place_id);
        self.list.len() != before
    }
}
