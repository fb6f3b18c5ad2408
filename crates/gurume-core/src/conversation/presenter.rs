//! Renders queries and place lists into outbound message specifications.
//!
//! Pure formatting: no I/O, no state. The postback strings built here are the
//! protocol surface the engine later decodes.

use gurume_types::error::PostbackError;
use gurume_types::message::{Action, Bubble, OutboundMessage};
use gurume_types::place::{FavoriteList, MAX_FAVORITES, MAX_RESULTS, PlaceRecord, PlaceReference};
use gurume_types::postback::Postback;
use gurume_types::query::{Query, Radius};

/// Native location picker of the messaging app.
pub const LOCATION_PICKER_URI: &str = "line://nv/location";

pub const LOCATION_PROMPT: &str = "位置情報を送信してネ";
pub const RADIUS_PROMPT: &str = "検索範囲を選択してネ";
pub const KEYWORD_PROMPT: &str = "キーワードを入力してネ\n送ったメッセージの数だけキーワードが追加されます!";
pub const NO_QUERY: &str = "位置情報を送信して「キーワードで絞り込み」を選択してください";
pub const KEYWORD_TOO_LONG: &str = "キーワードが長すぎます(´・ω・`)";
pub const KEYWORD_SAVE_FAILED: &str = "キーワードの保存に失敗しました．\nもう一度送信してくださいm(__)m";
pub const QUERY_SAVE_FAILED: &str = "検索条件の保存に失敗しました...";
pub const SEARCH_FAILED: &str = "検索に失敗しました...";
pub const NOT_FOUND: &str = "見つかりませんでした(´・ω・`)";
pub const FAVORITE_ADD_FAILED: &str = "お気に入り登録に失敗しました...";
pub const FAVORITE_ALREADY_REGISTERED: &str = "このお店は登録済みです";
pub const FAVORITE_DELETE_FAILED: &str = "お気に入り削除に失敗しました...";
pub const FAVORITE_ALREADY_REMOVED: &str = "すでに削除されています";
pub const FAVORITE_REMOVED: &str = "お気に入り登録から削除しました!";
pub const NO_FAVORITES: &str = "お気に入りがありません";
pub const FAVORITES_LOAD_FAILED: &str = "お気に入りの取得に失敗しました...";
pub const QUERY_TOO_LARGE: &str = "検索条件が長すぎます(´・ω・`)";

pub fn favorites_full() -> String {
    format!("お気に入りに登録できるのは最大{MAX_FAVORITES}件です")
}

pub fn favorite_added(count: usize) -> String {
    format!("お気に入りに登録しました! ({count}/{MAX_FAVORITES})")
}

/// Button that opens the location picker.
pub fn location_request() -> OutboundMessage {
    OutboundMessage::Buttons {
        alt_text: "位置情報送信ボタン".to_string(),
        title: None,
        text: LOCATION_PROMPT.to_string(),
        actions: vec![Action::uri("送信する", LOCATION_PICKER_URI)],
    }
}

/// Summary of a query: radius line, then keywords if any.
pub fn search_status(query: &Query) -> String {
    let mut status = format!("距離: {}\n", query.radius.label());
    if !query.keywords.is_empty() {
        status.push_str(&format!("キーワード: {}\n", query.keywords.join(" ")));
    }
    status
}

/// Confirmation window offering radius, keyword and search actions.
pub fn confirm_window(query: &Query) -> Result<OutboundMessage, PostbackError> {
    let keyword_label = if query.keywords.is_empty() {
        "キーワードで絞り込み"
    } else {
        "キーワードを設定し直す"
    };

    let actions = vec![
        Action::postback(
            "距離で絞り込み",
            Postback::ChangeRadius(query.clone()).encode_fitted()?,
        ),
        Action::postback(
            keyword_label,
            Postback::ChangeKeyword(query.clone()).encode_fitted()?,
        ),
        Action::postback(
            "検索する",
            Postback::NearbySearch(query.clone()).encode_fitted()?,
        ),
    ];

    Ok(OutboundMessage::Buttons {
        alt_text: "確認ボタン".to_string(),
        title: Some("絞り込みますか？".to_string()),
        text: search_status(query),
        actions,
    })
}

/// One quick-reply option per radius, each carrying the query with that
/// radius substituted.
pub fn radius_quick_reply(query: &Query) -> Result<OutboundMessage, PostbackError> {
    let options = Radius::ALL
        .into_iter()
        .map(|radius| {
            let data = Postback::UpdateRadius(query.with_radius(radius)).encode_fitted()?;
            Ok(Action::postback(radius.label(), data))
        })
        .collect::<Result<Vec<_>, PostbackError>>()?;

    Ok(OutboundMessage::QuickReply {
        text: RADIUS_PROMPT.to_string(),
        options,
    })
}

/// Which list a carousel shows; decides alt text and the bubble's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceList {
    SearchResults,
    Favorites,
}

impl PlaceList {
    pub fn alt_text(self) -> &'static str {
        match self {
            PlaceList::SearchResults => "検索結果",
            PlaceList::Favorites => "お気に入りリスト",
        }
    }

    pub fn max_bubbles(self) -> usize {
        match self {
            PlaceList::SearchResults => MAX_RESULTS,
            PlaceList::Favorites => MAX_FAVORITES,
        }
    }

    fn primary_action(self, place: &PlaceRecord) -> Result<Action, PostbackError> {
        match self {
            PlaceList::SearchResults => Ok(Action::postback(
                "お気に入りに登録",
                Postback::AddFavorite(PlaceReference::for_place(place)).encode_fitted()?,
            )),
            PlaceList::Favorites => Ok(Action::postback(
                "お気に入りから削除",
                Postback::DeleteFavorite(PlaceReference::id_only(&place.place_id))
                    .encode_fitted()?,
            )),
        }
    }
}

pub fn place_bubble(place: &PlaceRecord, list: PlaceList) -> Result<Bubble, PostbackError> {
    Ok(Bubble {
        hero_image_uri: place.photo_uri.clone(),
        title: place.name.clone(),
        rating: place.rating,
        actions: vec![
            list.primary_action(place)?,
            Action::uri("マップで見る", &place.map_uri),
        ],
    })
}

/// Carousel of the first places in their existing order.
pub fn places_carousel(
    places: &[PlaceRecord],
    list: PlaceList,
) -> Result<OutboundMessage, PostbackError> {
    let bubbles = places
        .iter()
        .take(list.max_bubbles())
        .map(|p| place_bubble(p, list))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OutboundMessage::Carousel {
        alt_text: list.alt_text().to_string(),
        bubbles,
    })
}

pub fn favorites_carousel(favorites: &FavoriteList) -> Result<OutboundMessage, PostbackError> {
    places_carousel(&favorites.list, PlaceList::Favorites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::place;
    use gurume_types::postback::POSTBACK_DATA_LIMIT;

    fn decode_action(action: &Action) -> Postback {
        Postback::decode(action.postback_data().unwrap()).unwrap()
    }

    #[test]
    fn test_search_status_without_keywords() {
        let q = Query::new("35", "139");
        assert_eq!(search_status(&q), "距離: 500m\n");
    }

    #[test]
    fn test_search_status_with_keywords() {
        let mut q = Query::new("35", "139").with_radius(Radius::M2000);
        q.keywords = vec!["ラーメン".to_string(), "深夜".to_string()];
        assert_eq!(search_status(&q), "距離: 2km\nキーワード: ラーメン 深夜\n");
    }

    #[test]
    fn test_confirm_window_actions() {
        let q = Query::new("35", "139");
        let OutboundMessage::Buttons { title, actions, .. } = confirm_window(&q).unwrap() else {
            panic!("expected buttons");
        };
        assert_eq!(title.as_deref(), Some("絞り込みますか？"));
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[1].label, "キーワードで絞り込み");
        assert_eq!(decode_action(&actions[0]), Postback::ChangeRadius(q.clone()));
        assert_eq!(decode_action(&actions[1]), Postback::ChangeKeyword(q.clone()));
        assert_eq!(decode_action(&actions[2]), Postback::NearbySearch(q));
    }

    #[test]
    fn test_confirm_window_relabels_keyword_action() {
        let mut q = Query::new("35", "139");
        q.keywords.push("寿司".to_string());
        let OutboundMessage::Buttons { actions, .. } = confirm_window(&q).unwrap() else {
            panic!("expected buttons");
        };
        assert_eq!(actions[1].label, "キーワードを設定し直す");
    }

    #[test]
    fn test_radius_quick_reply_substitutes_each_radius() {
        let mut q = Query::new("35", "139");
        q.keywords.push("カレー".to_string());
        let OutboundMessage::QuickReply { text, options } = radius_quick_reply(&q).unwrap() else {
            panic!("expected quick reply");
        };
        assert_eq!(text, RADIUS_PROMPT);
        assert_eq!(options.len(), Radius::ALL.len());
        for (option, radius) in options.iter().zip(Radius::ALL) {
            assert_eq!(option.label, radius.label());
            assert_eq!(decode_action(option), Postback::UpdateRadius(q.with_radius(radius)));
        }
    }

    #[test]
    fn test_carousel_truncates_in_order() {
        let places: Vec<PlaceRecord> = (0..15).map(|i| place(&format!("p{i}"))).collect();
        let OutboundMessage::Carousel { alt_text, bubbles } =
            places_carousel(&places, PlaceList::SearchResults).unwrap()
        else {
            panic!("expected carousel");
        };
        assert_eq!(alt_text, "検索結果");
        assert_eq!(bubbles.len(), MAX_RESULTS);
        assert_eq!(bubbles[0].title, "Restaurant p0");
        assert_eq!(bubbles[9].title, "Restaurant p9");
    }

    #[test]
    fn test_search_bubble_carries_photo_in_reference() {
        let p = place("abc");
        let bubble = place_bubble(&p, PlaceList::SearchResults).unwrap();
        assert_eq!(
            decode_action(&bubble.actions[0]),
            Postback::AddFavorite(PlaceReference::for_place(&p))
        );
        assert_eq!(bubble.actions[1].label, "マップで見る");
    }

    #[test]
    fn test_favorite_bubble_removes_by_id() {
        let p = place("abc");
        let bubble = place_bubble(&p, PlaceList::Favorites).unwrap();
        assert_eq!(bubble.actions[0].label, "お気に入りから削除");
        assert_eq!(
            decode_action(&bubble.actions[0]),
            Postback::DeleteFavorite(PlaceReference::id_only("abc"))
        );
    }

    #[test]
    fn test_all_postbacks_fit_the_limit() {
        let mut q = Query::new("35.681236", "139.767125");
        q.keywords = (0..40).map(|i| format!("keyword{i}")).collect();
        let msg = confirm_window(&q).unwrap();
        let OutboundMessage::Buttons { actions, .. } = msg else {
            panic!("expected buttons");
        };
        for action in actions {
            assert!(action.postback_data().unwrap().chars().count() <= POSTBACK_DATA_LIMIT);
        }
    }
}
