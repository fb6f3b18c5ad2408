//! Fan-out of a webhook batch to the engine and the reply sender.

use futures_util::future::join_all;
use tracing::{debug, error};

use gurume_types::event::InboundEvent;

use super::engine::ConversationEngine;
use crate::delivery::ReplySender;
use crate::search::PlaceSearch;
use crate::service::hash::KeyHasher;
use crate::storage::document_store::DocumentStore;

/// What happened to each event of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// A reply was produced and accepted by the platform.
    pub replied: usize,
    /// The engine produced no reply.
    pub dropped: usize,
    /// A reply was produced but delivery failed.
    pub failed: usize,
}

enum EventOutcome {
    Replied,
    Dropped,
    Failed,
}

/// Runs every event of a batch concurrently and sends at most one reply per
/// event, addressed by its reply token. Delivery failures are logged and
/// never retried: reply tokens are single use.
pub struct EventDispatcher<S, H, P, R> {
    engine: ConversationEngine<S, H, P>,
    sender: R,
}

impl<S, H, P, R> EventDispatcher<S, H, P, R>
where
    S: DocumentStore,
    H: KeyHasher,
    P: PlaceSearch,
    R: ReplySender,
{
    pub fn new(engine: ConversationEngine<S, H, P>, sender: R) -> Self {
        Self { engine, sender }
    }

    pub async fn dispatch(&self, events: &[InboundEvent]) -> DispatchSummary {
        let outcomes = join_all(events.iter().map(|event| self.dispatch_one(event))).await;

        let mut summary = DispatchSummary::default();
        for outcome in outcomes {
            match outcome {
                EventOutcome::Replied => summary.replied += 1,
                EventOutcome::Dropped => summary.dropped += 1,
                EventOutcome::Failed => summary.failed += 1,
            }
        }
        debug!(
            replied = summary.replied,
            dropped = summary.dropped,
            failed = summary.failed,
            "batch dispatched"
        );
        summary
    }

    async fn dispatch_one(&self, event: &InboundEvent) -> EventOutcome {
        let Some(message) = self.engine.handle(event).await else {
            return EventOutcome::Dropped;
        };
        match self
            .sender
            .reply(&event.reply_token, std::slice::from_ref(&message))
            .await
        {
            Ok(()) => EventOutcome::Replied,
            Err(e) => {
                error!(error = %e, kind = event.kind.name(), "failed to deliver reply");
                EventOutcome::Failed
            }
        }
    }
}
