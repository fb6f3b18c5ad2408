//! Postback wire codec.
//!
//! Buttons carry a compact JSON string `{"action": "<tag>", "data": <payload>}`
//! that the messaging platform hands back verbatim when the user taps them.
//! The payload has no type tag of its own: its shape is fixed by the action,
//! so decoding reads the action first and then parses `data` accordingly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::PostbackError;
use crate::place::PlaceReference;
use crate::query::Query;

/// Maximum length of postback data accepted by the messaging platform.
pub const POSTBACK_DATA_LIMIT: usize = 300;

/// The closed set of postback actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostbackAction {
    ChangeRadius,
    ChangeKeyword,
    UpdateRadius,
    NearbySearch,
    AddFavorite,
    DeleteFavorite,
}

/// Shape of the `data` field for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Query,
    PlaceReference,
}

impl PostbackAction {
    pub const ALL: [PostbackAction; 6] = [
        PostbackAction::ChangeRadius,
        PostbackAction::ChangeKeyword,
        PostbackAction::UpdateRadius,
        PostbackAction::NearbySearch,
        PostbackAction::AddFavorite,
        PostbackAction::DeleteFavorite,
    ];

    /// Payload shape decoded for this action.
    ///
    /// Exhaustive on purpose: a new action does not compile until it is
    /// mapped here.
    pub fn payload_kind(self) -> PayloadKind {
        match self {
            PostbackAction::ChangeRadius
            | PostbackAction::ChangeKeyword
            | PostbackAction::UpdateRadius
            | PostbackAction::NearbySearch => PayloadKind::Query,
            PostbackAction::AddFavorite | PostbackAction::DeleteFavorite => {
                PayloadKind::PlaceReference
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostbackAction::ChangeRadius => "changeRadius",
            PostbackAction::ChangeKeyword => "changeKeyword",
            PostbackAction::UpdateRadius => "updateRadius",
            PostbackAction::NearbySearch => "nearbySearch",
            PostbackAction::AddFavorite => "addFavorite",
            PostbackAction::DeleteFavorite => "deleteFavorite",
        }
    }
}

impl fmt::Display for PostbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostbackAction {
    type Err = PostbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostbackAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| PostbackError::Malformed(format!("unknown action '{s}'")))
    }
}

/// A decoded postback: the action together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Postback {
    ChangeRadius(Query),
    ChangeKeyword(Query),
    UpdateRadius(Query),
    NearbySearch(Query),
    AddFavorite(PlaceReference),
    DeleteFavorite(PlaceReference),
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    action: PostbackAction,
    data: &'a T,
}

#[derive(Deserialize)]
struct RawEnvelope<'a> {
    action: &'a str,
    #[serde(borrow)]
    data: &'a RawValue,
}

impl Postback {
    /// Pair an action with a Query payload.
    ///
    /// Returns `None` when the action carries a place reference instead.
    pub fn with_query(action: PostbackAction, query: Query) -> Option<Self> {
        match action {
            PostbackAction::ChangeRadius => Some(Postback::ChangeRadius(query)),
            PostbackAction::ChangeKeyword => Some(Postback::ChangeKeyword(query)),
            PostbackAction::UpdateRadius => Some(Postback::UpdateRadius(query)),
            PostbackAction::NearbySearch => Some(Postback::NearbySearch(query)),
            PostbackAction::AddFavorite | PostbackAction::DeleteFavorite => None,
        }
    }

    pub fn action(&self) -> PostbackAction {
        match self {
            Postback::ChangeRadius(_) => PostbackAction::ChangeRadius,
            Postback::ChangeKeyword(_) => PostbackAction::ChangeKeyword,
            Postback::UpdateRadius(_) => PostbackAction::UpdateRadius,
            Postback::NearbySearch(_) => PostbackAction::NearbySearch,
            Postback::AddFavorite(_) => PostbackAction::AddFavorite,
            Postback::DeleteFavorite(_) => PostbackAction::DeleteFavorite,
        }
    }

    /// Serialize to the wire envelope, rejecting output over the limit.
    pub fn encode(&self) -> Result<String, PostbackError> {
        let action = self.action();
        let encoded = match self {
            Postback::ChangeRadius(q)
            | Postback::ChangeKeyword(q)
            | Postback::UpdateRadius(q)
            | Postback::NearbySearch(q) => serde_json::to_string(&Envelope { action, data: q }),
            Postback::AddFavorite(r) | Postback::DeleteFavorite(r) => {
                serde_json::to_string(&Envelope { action, data: r })
            }
        }
        .map_err(|e| PostbackError::Malformed(e.to_string()))?;

        let len = encoded.chars().count();
        if len > POSTBACK_DATA_LIMIT {
            return Err(PostbackError::TooLarge {
                len,
                limit: POSTBACK_DATA_LIMIT,
            });
        }
        Ok(encoded)
    }

    /// Serialize, shrinking the payload until it fits the limit.
    ///
    /// Query payloads lose trailing keywords first; place references lose
    /// their photo URI. Fails only if the minimal form is still too large.
    pub fn encode_fitted(&self) -> Result<String, PostbackError> {
        let mut candidate = self.clone();
        loop {
            match candidate.encode() {
                Err(PostbackError::TooLarge { .. }) if candidate.shrink() => continue,
                other => return other,
            }
        }
    }

    fn shrink(&mut self) -> bool {
        match self {
            Postback::ChangeRadius(q)
            | Postback::ChangeKeyword(q)
            | Postback::UpdateRadius(q)
            | Postback::NearbySearch(q) => q.keywords.pop().is_some(),
            Postback::AddFavorite(r) | Postback::DeleteFavorite(r) => {
                if r.photo_uri.is_empty() {
                    false
                } else {
                    r.photo_uri.clear();
                    true
                }
            }
        }
    }

    /// Parse a postback string, choosing the payload shape from the action.
    pub fn decode(data: &str) -> Result<Self, PostbackError> {
        let raw: RawEnvelope<'_> =
            serde_json::from_str(data).map_err(|e| PostbackError::Malformed(e.to_string()))?;
        let action: PostbackAction = raw.action.parse()?;

        let payload = raw.data.get();
        match action.payload_kind() {
            PayloadKind::Query => {
                let query: Query = serde_json::from_str(payload)
                    .map_err(|e| PostbackError::Malformed(format!("{action} data: {e}")))?;
                Postback::with_query(action, query).ok_or_else(|| {
                    PostbackError::Malformed(format!("{action} does not carry a query"))
                })
            }
            PayloadKind::PlaceReference => {
                let reference: PlaceReference = serde_json::from_str(payload)
                    .map_err(|e| PostbackError::Malformed(format!("{action} data: {e}")))?;
                match action {
                    PostbackAction::AddFavorite => Ok(Postback::AddFavorite(reference)),
                    _ => Ok(Postback::DeleteFavorite(reference)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Radius;

    #[test]
    fn test_round_trip_update_radius() {
        let q = Query::new("35", "139").with_radius(Radius::M1000);
        let data = Postback::UpdateRadius(q.clone()).encode().unwrap();
        assert_eq!(Postback::decode(&data).unwrap(), Postback::UpdateRadius(q));
    }

    #[test]
    fn test_wire_format() {
        let data = Postback::AddFavorite(PlaceReference {
            place_id: "ChIJ123".to_string(),
            photo_uri: "https://p/1.jpg".to_string(),
        })
        .encode()
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["action"], "addFavorite");
        assert_eq!(value["data"]["place_id"], "ChIJ123");
        assert_eq!(value["data"]["photo_uri"], "https://p/1.jpg");
    }

    #[test]
    fn test_favorite_actions_always_decode_place_reference() {
        // data that would also satisfy a Query with defaults must still
        // be read as a place reference
        for action in ["addFavorite", "deleteFavorite"] {
            let data = format!(
                r#"{{"action":"{action}","data":{{"place_id":"p1","lat":"1","lng":"2"}}}}"#
            );
            match Postback::decode(&data).unwrap() {
                Postback::AddFavorite(r) | Postback::DeleteFavorite(r) => {
                    assert_eq!(r.place_id, "p1");
                }
                other => panic!("expected place reference, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_query_action_with_place_payload_is_malformed() {
        let data = r#"{"action":"nearbySearch","data":{"place_id":"p1"}}"#;
        assert!(matches!(
            Postback::decode(data),
            Err(PostbackError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_action_and_bad_json() {
        assert!(Postback::decode(r#"{"action":"explode","data":{}}"#).is_err());
        assert!(Postback::decode("not json").is_err());
        assert!(Postback::decode(r#"{"action":"changeRadius"}"#).is_err());
    }

    #[test]
    fn test_every_action_has_a_payload_kind() {
        for action in PostbackAction::ALL {
            let with_query = Postback::with_query(action, Query::new("1", "2"));
            assert_eq!(
                with_query.is_some(),
                action.payload_kind() == PayloadKind::Query,
                "{action}"
            );
            assert_eq!(action.as_str().parse::<PostbackAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_encode_rejects_oversized_query() {
        let mut q = Query::new("35", "139");
        q.keywords = vec!["x".repeat(400)];
        assert!(matches!(
            Postback::NearbySearch(q).encode(),
            Err(PostbackError::TooLarge { limit: POSTBACK_DATA_LIMIT, .. })
        ));
    }

    #[test]
    fn test_encode_fitted_drops_trailing_keywords() {
        let mut q = Query::new("35", "139");
        q.keywords = vec!["ramen".to_string(), "y".repeat(280)];
        let data = Postback::NearbySearch(q).encode_fitted().unwrap();
        assert!(data.chars().count() <= POSTBACK_DATA_LIMIT);
        match Postback::decode(&data).unwrap() {
            Postback::NearbySearch(q) => assert_eq!(q.keywords, vec!["ramen".to_string()]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_encode_fitted_drops_long_photo_uri() {
        let reference = PlaceReference {
            place_id: "p1".to_string(),
            photo_uri: format!("https://lh3.googleusercontent.com/{}", "a".repeat(300)),
        };
        let data = Postback::AddFavorite(reference).encode_fitted().unwrap();
        assert_eq!(
            Postback::decode(&data).unwrap(),
            Postback::AddFavorite(PlaceReference::id_only("p1"))
        );
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let mut q = Query::new("35", "139");
        // 3 bytes per character in UTF-8; well under the limit in characters
        q.keywords = vec!["ラーメン".repeat(30)];
        assert!(Postback::ChangeKeyword(q).encode().is_ok());
    }
}
