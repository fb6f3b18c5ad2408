//! In-memory port implementations shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use gurume_types::error::{DeliveryError, RepositoryError, SearchError};
use gurume_types::message::OutboundMessage;
use gurume_types::place::PlaceRecord;
use gurume_types::query::Query;
use tokio::sync::Barrier;

use crate::delivery::ReplySender;
use crate::search::PlaceSearch;
use crate::service::hash::KeyHasher;
use crate::storage::document_store::DocumentStore;

/// Readable stand-in for the SHA-256 hasher.
pub struct PrefixHasher;

impl KeyHasher for PrefixHasher {
    fn hash_key(&self, user_id: &str) -> String {
        format!("hashed:{user_id}")
    }
}

#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    docs: Arc<Mutex<HashMap<(String, String), serde_json::Value>>>,
    fail_get: Arc<AtomicBool>,
    fail_put: Arc<AtomicBool>,
    get_barrier: Arc<Mutex<Option<(String, Arc<Barrier>)>>>,
}

impl MemoryDocumentStore {
    pub fn names(&self) -> Vec<String> {
        let docs = self.docs.lock().unwrap();
        docs.keys().map(|(_, name)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    /// Make every `get` of `kind` wait on `barrier` after reading.
    pub fn hold_gets(&self, kind: &str, barrier: Arc<Barrier>) {
        *self.get_barrier.lock().unwrap() = Some((kind.to_string(), barrier));
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn get(
        &self,
        kind: &str,
        name: &str,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection);
        }
        let value = self
            .docs
            .lock()
            .unwrap()
            .get(&(kind.to_string(), name.to_string()))
            .cloned();

        let barrier = self
            .get_barrier
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(k, _)| k == kind)
            .map(|(_, b)| Arc::clone(b));
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        Ok(value)
    }

    async fn put(
        &self,
        kind: &str,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("disk full".to_string()));
        }
        self.docs
            .lock()
            .unwrap()
            .insert((kind.to_string(), name.to_string()), value.clone());
        Ok(())
    }

    async fn delete(&self, kind: &str, name: &str) -> Result<(), RepositoryError> {
        self.docs
            .lock()
            .unwrap()
            .remove(&(kind.to_string(), name.to_string()));
        Ok(())
    }
}

pub fn place(id: &str) -> PlaceRecord {
    PlaceRecord {
        place_id: id.to_string(),
        name: format!("Restaurant {id}"),
        rating: 4.2,
        photo_uri: format!("https://photos.example/{id}.jpg"),
        map_uri: format!("https://maps.example/?place={id}"),
    }
}

/// Scripted place search.
#[derive(Default)]
pub struct FakeSearch {
    pub nearby: Mutex<Option<Result<Vec<PlaceRecord>, String>>>,
    pub details_fail: AtomicBool,
    pub queries: Mutex<Vec<Query>>,
}

impl FakeSearch {
    pub fn returning(places: Vec<PlaceRecord>) -> Self {
        let search = Self::default();
        *search.nearby.lock().unwrap() = Some(Ok(places));
        search
    }

    pub fn failing() -> Self {
        let search = Self::default();
        *search.nearby.lock().unwrap() = Some(Err("connection refused".to_string()));
        search.details_fail.store(true, Ordering::SeqCst);
        search
    }
}

impl PlaceSearch for FakeSearch {
    async fn nearby_search(&self, query: &Query) -> Result<Vec<PlaceRecord>, SearchError> {
        self.queries.lock().unwrap().push(query.clone());
        match self.nearby.lock().unwrap().clone() {
            Some(Ok(places)) => Ok(places),
            Some(Err(msg)) => Err(SearchError::Http(msg)),
            None => Ok(Vec::new()),
        }
    }

    async fn details(&self, place_id: &str) -> Result<PlaceRecord, SearchError> {
        if self.details_fail.load(Ordering::SeqCst) {
            return Err(SearchError::Status {
                status: "NOT_FOUND".to_string(),
                message: String::new(),
            });
        }
        Ok(PlaceRecord {
            photo_uri: "https://placeholder.example/clip.jpg".to_string(),
            ..place(place_id)
        })
    }
}

#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, Vec<OutboundMessage>)>>,
    pub fail: AtomicBool,
}

impl ReplySender for RecordingSender {
    async fn reply(
        &self,
        reply_token: &str,
        messages: &[OutboundMessage],
    ) -> Result<(), DeliveryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected {
                status: 400,
                body: "Invalid reply token".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), messages.to_vec()));
        Ok(())
    }
}
