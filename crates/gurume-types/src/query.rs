//! The pending nearby-search query a user builds up through the conversation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Search radius. Only these six distances are offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Radius {
    M100,
    M250,
    #[default]
    M500,
    M1000,
    M2000,
    M5000,
}

impl Radius {
    /// Every radius option, in the order the quick reply shows them.
    pub const ALL: [Radius; 6] = [
        Radius::M100,
        Radius::M250,
        Radius::M500,
        Radius::M1000,
        Radius::M2000,
        Radius::M5000,
    ];

    /// Distance in metres.
    pub fn meters(self) -> u32 {
        match self {
            Radius::M100 => 100,
            Radius::M250 => 250,
            Radius::M500 => 500,
            Radius::M1000 => 1000,
            Radius::M2000 => 2000,
            Radius::M5000 => 5000,
        }
    }

    /// Human-readable label ("500m", "1km").
    pub fn label(self) -> &'static str {
        match self {
            Radius::M100 => "100m",
            Radius::M250 => "250m",
            Radius::M500 => "500m",
            Radius::M1000 => "1km",
            Radius::M2000 => "2km",
            Radius::M5000 => "5km",
        }
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.meters())
    }
}

impl FromStr for Radius {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Radius::ALL
            .into_iter()
            .find(|r| r.meters().to_string() == s)
            .ok_or_else(|| format!("unsupported radius: '{s}'"))
    }
}

impl TryFrom<String> for Radius {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Radius> for String {
    fn from(radius: Radius) -> Self {
        radius.to_string()
    }
}

/// A user's in-progress nearby search.
///
/// Created from a location message, refined by keyword and radius postbacks,
/// and persisted per user until the next location message overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "lat")]
    pub latitude: String,
    #[serde(rename = "lng")]
    pub longitude: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub radius: Radius,
    #[serde(default)]
    pub page: u32,
}

impl Query {
    /// A fresh query at the given coordinates: radius 500m, no keywords.
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            keywords: Vec::new(),
            radius: Radius::default(),
            page: 0,
        }
    }

    /// Build a query from a location message's coordinates.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        // f64 Display is the shortest round-trip form: 35.0 -> "35"
        Self::new(latitude.to_string(), longitude.to_string())
    }

    /// Copy of this query with a different radius.
    pub fn with_radius(&self, radius: Radius) -> Self {
        Self {
            radius,
            ..self.clone()
        }
    }

    /// `"lat,lng"` as the places provider expects it.
    pub fn location(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Keywords joined for the provider, or `None` when there are none.
    pub fn keyword_param(&self) -> Option<String> {
        if self.keywords.is_empty() {
            None
        } else {
            Some(self.keywords.join(" "))
        }
    }
}
