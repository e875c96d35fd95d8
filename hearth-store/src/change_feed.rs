//! Row-level change feed for the messages table.
//!
//! Repositories publish a [`MessageChange`] after every successful write;
//! subscribers receive them over a broadcast channel and treat each as a cue
//! to re-fetch, not as a delta to apply.

use tokio::sync::broadcast;

use crate::models::MessageRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// One row-level notification carrying the affected row.
#[derive(Debug, Clone)]
pub struct MessageChange {
    pub op: ChangeOp,
    pub row: MessageRecord,
}

/// Column-equality filters a subscriber can apply to the feed.
#[derive(Debug, Clone)]
pub enum SubscriptionFilter {
    /// `receiver_id` equality; conversation-list subscriptions.
    Receiver(String),
    /// `listing_id` equality, either participant; open-thread subscriptions.
    Listing(String),
}

impl SubscriptionFilter {
    pub fn matches(&self, change: &MessageChange) -> bool {
        match self {
            SubscriptionFilter::Receiver(user_id) => change.row.receiver_id == *user_id,
            SubscriptionFilter::Listing(listing_id) => change.row.listing_id == *listing_id,
        }
    }
}

#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<MessageChange>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(256);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MessageChange> {
        self.tx.subscribe()
    }

    pub fn publish(&self, change: MessageChange) {
        // No receivers is fine; writes never depend on listeners.
        let _ = self.tx.send(change);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(listing: &str, sender: &str, receiver: &str) -> MessageChange {
        MessageChange {
            op: ChangeOp::Insert,
            row: MessageRecord::new(listing, sender, receiver, "hi"),
        }
    }

    #[test]
    fn receiver_filter_matches_only_that_receiver() {
        let filter = SubscriptionFilter::Receiver("u1".to_string());
        assert!(filter.matches(&change("l1", "u2", "u1")));
        assert!(!filter.matches(&change("l1", "u1", "u2")));
    }

    #[test]
    fn listing_filter_matches_either_direction() {
        let filter = SubscriptionFilter::Listing("l1".to_string());
        assert!(filter.matches(&change("l1", "u2", "u1")));
        assert!(filter.matches(&change("l1", "u1", "u2")));
        assert!(!filter.matches(&change("l2", "u2", "u1")));
    }
}
