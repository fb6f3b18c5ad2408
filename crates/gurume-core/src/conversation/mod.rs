//! The restaurant-finder conversation.
//!
//! The state machine is implicit: each inbound event is interpreted from its
//! type, the postback it carries, and whether the user has a stored query.
//! Nothing is kept in memory between events.

pub mod command;
pub mod dispatch;
pub mod engine;
pub mod presenter;

pub use dispatch::EventDispatcher;
pub use engine::ConversationEngine;
