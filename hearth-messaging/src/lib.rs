//! # hearth-messaging
//!
//! The conversation aggregator: folds a viewer's flat message history into
//! per-listing conversation summaries and keeps that view fresh from the
//! store's change feed.
//!
//! ## Modules
//!
//! - [`conversation`] – derived Conversation summaries and the fold
//! - [`service`] – MessagingService operations (list, mark read, thread, send)
//! - [`watcher`] – coalescing change-feed subscriptions
//! - [`live`] – LiveConversations view with a fetch-sequence guard

pub mod conversation;
pub mod live;
pub mod service;
pub mod watcher;


pub use conversation::{fold_conversations, Conversation};
pub use live::LiveConversations;
pub use service::{MessagingService, ThreadMessage};
pub use watcher::{subscribe_to_changes, ChangeSubscription};
