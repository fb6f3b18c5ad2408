//! ConversationEngine -- turns one inbound event into at most one reply.
//!
//! Every error is recovered here and mapped to a user-facing message; only an
//! undecodable postback produces no reply at all.

use tracing::{Instrument, debug, info_span, warn};

use gurume_types::error::PostbackError;
use gurume_types::event::{EventKind, InboundEvent};
use gurume_types::message::OutboundMessage;
use gurume_types::place::{AddOutcome, PlaceRecord, PlaceReference};
use gurume_types::postback::Postback;
use gurume_types::query::Query;

use super::command::TextCommand;
use super::presenter::{self, PlaceList};
use crate::search::PlaceSearch;
use crate::service::hash::KeyHasher;
use crate::storage::document_store::DocumentStore;
use crate::storage::user_store::UserQueryStore;

/// The restaurant-finder state machine.
///
/// Stateless between events: the only state is the per-user Query and
/// FavoriteList in the store, and the Query embedded in postback buttons.
pub struct ConversationEngine<S, H, P> {
    store: UserQueryStore<S, H>,
    search: P,
}

impl<S, H, P> ConversationEngine<S, H, P>
where
    S: DocumentStore,
    H: KeyHasher,
    P: PlaceSearch,
{
    pub fn new(store: UserQueryStore<S, H>, search: P) -> Self {
        Self { store, search }
    }

    pub fn store(&self) -> &UserQueryStore<S, H> {
        &self.store
    }

    pub fn search(&self) -> &P {
        &self.search
    }

    /// Handle one event. Returns `None` when the event is dropped.
    pub async fn handle(&self, event: &InboundEvent) -> Option<OutboundMessage> {
        let span = info_span!("conversation.event", kind = event.kind.name());
        self.route(event).instrument(span).await
    }

    async fn route(&self, event: &InboundEvent) -> Option<OutboundMessage> {
        let user_id = event.user_id.as_str();
        match &event.kind {
            EventKind::Text { text } => Some(match TextCommand::parse(text) {
                TextCommand::LocationSearch => presenter::location_request(),
                TextCommand::ViewFavorites => self.show_favorites(user_id).await,
                TextCommand::Keyword(keyword) => self.add_keyword(user_id, keyword).await,
            }),
            EventKind::Location {
                latitude,
                longitude,
            } => {
                // Not persisted: the fresh query travels inside the buttons.
                let query = Query::from_coordinates(*latitude, *longitude);
                Some(render(presenter::confirm_window(&query)))
            }
            EventKind::Postback { data } => match Postback::decode(data) {
                Ok(postback) => {
                    debug!(action = %postback.action(), "postback received");
                    Some(self.handle_postback(user_id, postback).await)
                }
                Err(e) => {
                    warn!(error = %e, "dropping undecodable postback");
                    None
                }
            },
        }
    }

    async fn handle_postback(&self, user_id: &str, postback: Postback) -> OutboundMessage {
        match postback {
            Postback::ChangeRadius(query) => self.change_radius(user_id, query).await,
            Postback::ChangeKeyword(query) => self.change_keyword(user_id, query).await,
            Postback::UpdateRadius(query) => render(presenter::confirm_window(&query)),
            Postback::NearbySearch(query) => self.nearby_search(user_id, query).await,
            Postback::AddFavorite(reference) => self.add_favorite(user_id, reference).await,
            Postback::DeleteFavorite(reference) => self.delete_favorite(user_id, reference).await,
        }
    }

    /// Append a free-text keyword to the stored query.
    async fn add_keyword(&self, user_id: &str, keyword: &str) -> OutboundMessage {
        let mut query = match self.store.get_query(user_id).await {
            Ok(Some(query)) => query,
            Ok(None) => return OutboundMessage::text(presenter::NO_QUERY),
            Err(e) => {
                warn!(error = %e, "failed to load query");
                return OutboundMessage::text(presenter::KEYWORD_SAVE_FAILED);
            }
        };

        query.keywords.push(keyword.to_string());
        // changeKeyword is the longest tag the query will travel under
        if let Err(PostbackError::TooLarge { len, limit }) =
            Postback::ChangeKeyword(query.clone()).encode()
        {
            debug!(len, limit, "keyword rejected, query would not fit a postback");
            return OutboundMessage::text(presenter::KEYWORD_TOO_LONG);
        }

        if let Err(e) = self.store.save_query(user_id, &query).await {
            warn!(error = %e, "failed to save keyword");
            return OutboundMessage::text(presenter::KEYWORD_SAVE_FAILED);
        }
        render(presenter::confirm_window(&query))
    }

    async fn change_radius(&self, user_id: &str, query: Query) -> OutboundMessage {
        if let Err(e) = self.store.save_query(user_id, &query).await {
            warn!(error = %e, "failed to save query before radius selection");
            return OutboundMessage::text(presenter::QUERY_SAVE_FAILED);
        }
        render(presenter::radius_quick_reply(&query))
    }

    async fn change_keyword(&self, user_id: &str, mut query: Query) -> OutboundMessage {
        query.keywords.clear();
        if let Err(e) = self.store.save_query(user_id, &query).await {
            warn!(error = %e, "failed to save query with cleared keywords");
            return OutboundMessage::text(presenter::QUERY_SAVE_FAILED);
        }
        OutboundMessage::text(presenter::KEYWORD_PROMPT)
    }

    async fn nearby_search(&self, user_id: &str, query: Query) -> OutboundMessage {
        // Keep the stored query in step with the radius picked via updateRadius.
        if let Err(e) = self.store.save_query(user_id, &query).await {
            warn!(error = %e, "failed to persist searched query");
        }

        let places = match self.search.nearby_search(&query).await {
            Ok(places) => places,
            Err(e) => {
                warn!(error = %e, location = %query.location(), "nearby search failed");
                return OutboundMessage::text(presenter::SEARCH_FAILED);
            }
        };

        debug!(results = places.len(), "nearby search finished");
        if places.is_empty() {
            return OutboundMessage::text(presenter::NOT_FOUND);
        }
        render(presenter::places_carousel(&places, PlaceList::SearchResults))
    }

    async fn add_favorite(&self, user_id: &str, reference: PlaceReference) -> OutboundMessage {
        let details = match self.search.details(&reference.place_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(error = %e, place_id = %reference.place_id, "place details failed");
                return OutboundMessage::text(presenter::FAVORITE_ADD_FAILED);
            }
        };

        let mut favorites = match self.store.get_favorites(user_id).await {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to load favorites");
                return OutboundMessage::text(presenter::FAVORITE_ADD_FAILED);
            }
        };

        // Same picture as the search result the user tapped.
        let place = if reference.photo_uri.is_empty() {
            details
        } else {
            PlaceRecord {
                photo_uri: reference.photo_uri,
                ..details
            }
        };

        match favorites.try_add(place) {
            AddOutcome::AlreadyRegistered => {
                OutboundMessage::text(presenter::FAVORITE_ALREADY_REGISTERED)
            }
            AddOutcome::Full => OutboundMessage::text(presenter::favorites_full()),
            AddOutcome::Added(count) => {
                if let Err(e) = self.store.save_favorites(user_id, &favorites).await {
                    warn!(error = %e, "failed to save favorites");
                    return OutboundMessage::text(presenter::FAVORITE_ADD_FAILED);
                }
                OutboundMessage::text(presenter::favorite_added(count))
            }
        }
    }

    async fn delete_favorite(&self, user_id: &str, reference: PlaceReference) -> OutboundMessage {
        let mut favorites = match self.store.get_favorites(user_id).await {
            Ok(Some(favorites)) => favorites,
            Ok(None) => {
                debug!("delete requested but no favorites record exists");
                return OutboundMessage::text(presenter::FAVORITE_DELETE_FAILED);
            }
            Err(e) => {
                warn!(error = %e, "failed to load favorites");
                return OutboundMessage::text(presenter::FAVORITE_DELETE_FAILED);
            }
        };

        if !favorites.remove(&reference.place_id) {
            return OutboundMessage::text(presenter::FAVORITE_ALREADY_REMOVED);
        }
        if let Err(e) = self.store.save_favorites(user_id, &favorites).await {
            warn!(error = %e, "failed to save favorites");
            return OutboundMessage::text(presenter::FAVORITE_DELETE_FAILED);
        }
        OutboundMessage::text(presenter::FAVORITE_REMOVED)
    }

    async fn show_favorites(&self, user_id: &str) -> OutboundMessage {
        match self.store.get_favorites(user_id).await {
            Ok(Some(favorites)) if !favorites.is_empty() => {
                render(presenter::favorites_carousel(&favorites))
            }
            Ok(_) => OutboundMessage::text(presenter::NO_FAVORITES),
            Err(e) => {
                warn!(error = %e, "failed to load favorites");
                OutboundMessage::text(presenter::FAVORITES_LOAD_FAILED)
            }
        }
    }
}

/// Unwrap a rendered message, falling back to a plain error text.
fn render(message: Result<OutboundMessage, PostbackError>) -> OutboundMessage {
    message.unwrap_or_else(|e| {
        warn!(error = %e, "could not build postback buttons");
        OutboundMessage::text(presenter::QUERY_TOO_LARGE)
    })
}
