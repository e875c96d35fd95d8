//! Messaging service: the operations the UI layer calls.
//!
//! Every operation requires an authenticated viewer and converts store
//! failures into the [`HearthError`] taxonomy at the call site; nothing
//! propagates as an unhandled fault. Fetch failures never surface a partial
//! aggregation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use hearth_core::{AuthContext, HearthError, Result};
use hearth_store::{
    MessageContextRow, MessageRecord, Store, SubscriptionFilter,
};

use crate::conversation::{fold_conversations, Conversation, UNKNOWN_NAME};
use crate::watcher::{subscribe_to_changes, ChangeSubscription};

/// One entry of an open thread, with the sender's display name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadMessage {
    pub id: String,
    pub listing_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub sender_name: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl ThreadMessage {
    fn from_row(row: &MessageContextRow) -> Self {
        Self {
            id: row.id.clone(),
            listing_id: row.listing_id.clone(),
            sender_id: row.sender_id.clone(),
            receiver_id: row.receiver_id.clone(),
            sender_name: row
                .sender_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            content: row.content.clone(),
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct MessagingService {
    store: Store,
}

impl MessagingService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The viewer's conversation list, one summary per listing,
    /// most-recently-active first.
    pub async fn list_conversations(&self, auth: &AuthContext) -> Result<Vec<Conversation>> {
        let viewer = auth.viewer()?;

        let rows = self
            .store
            .messages
            .messages_involving(viewer)
            .await
            .map_err(|e| {
                error!(error = %e, viewer, "Failed to fetch messages for conversation list");
                HearthError::DataFetch(e.to_string())
            })?;

        Ok(fold_conversations(viewer, &rows))
    }

    /// Flips every unread message addressed to the viewer in the listing's
    /// thread. Idempotent; returns the number of rows flipped.
    pub async fn mark_conversation_read(
        &self,
        auth: &AuthContext,
        listing_id: &str,
    ) -> Result<u64> {
        let viewer = auth.viewer()?;

        self.store
            .messages
            .mark_thread_read(listing_id, viewer)
            .await
            .map_err(|e| {
                error!(error = %e, listing_id, viewer, "Failed to mark thread read");
                HearthError::WriteFailed(e.to_string())
            })
    }

    /// The listing's thread, chronologically ascending, restricted to
    /// messages the viewer participates in.
    pub async fn fetch_thread(
        &self,
        auth: &AuthContext,
        listing_id: &str,
    ) -> Result<Vec<ThreadMessage>> {
        let viewer = auth.viewer()?;

        let rows = self
            .store
            .messages
            .thread_messages(listing_id, viewer)
            .await
            .map_err(|e| {
                error!(error = %e, listing_id, viewer, "Failed to fetch thread");
                HearthError::DataFetch(e.to_string())
            })?;

        Ok(rows.iter().map(ThreadMessage::from_row).collect())
    }

    /// Opens a thread: clears the viewer's unread flags, then fetches it.
    /// A failed flag flip is logged and does not block the thread itself.
    pub async fn open_thread(
        &self,
        auth: &AuthContext,
        listing_id: &str,
    ) -> Result<Vec<ThreadMessage>> {
        if let Err(e) = self.mark_conversation_read(auth, listing_id).await {
            match e {
                HearthError::AuthRequired => return Err(e),
                other => warn!(error = %other, listing_id, "Could not clear unread flags"),
            }
        }
        self.fetch_thread(auth, listing_id).await
    }

    /// Sends a message from the viewer into a listing's thread. Content is
    /// trimmed; empty content is rejected before any write. The record is
    /// returned only after the insert succeeded, so callers never show an
    /// unsent message as sent.
    pub async fn send_message(
        &self,
        auth: &AuthContext,
        listing_id: &str,
        receiver_id: &str,
        content: &str,
    ) -> Result<MessageRecord> {
        let viewer = auth.viewer()?;

        let content = content.trim();
        if content.is_empty() {
            return Err(HearthError::EmptyMessage);
        }

        let record = MessageRecord::new(listing_id, viewer, receiver_id, content);
        self.store.messages.save(&record).await.map_err(|e| {
            error!(error = %e, listing_id, viewer, "Failed to send message");
            HearthError::WriteFailed(e.to_string())
        })?;

        Ok(record)
    }

    /// First contact from a listing page: the listing's seller is the
    /// receiver. Messaging one's own listing is refused.
    pub async fn contact_seller(
        &self,
        auth: &AuthContext,
        listing_id: &str,
        content: &str,
    ) -> Result<MessageRecord> {
        let viewer = auth.viewer()?;

        let listing = self
            .store
            .listings
            .get(listing_id)
            .await
            .map_err(|e| {
                error!(error = %e, listing_id, "Failed to look up listing");
                HearthError::DataFetch(e.to_string())
            })?
            .ok_or_else(|| HearthError::DataFetch(format!("listing {listing_id} not found")))?;

        if listing.seller_id == viewer {
            return Err(HearthError::WriteFailed(
                "cannot message your own listing".to_string(),
            ));
        }

        self.send_message(auth, listing_id, &listing.seller_id, content)
            .await
    }

    /// Unread messages addressed to the viewer across all listings
    /// (the header badge).
    pub async fn unread_total(&self, auth: &AuthContext) -> Result<i64> {
        let viewer = auth.viewer()?;

        self.store
            .messages
            .unread_total(viewer)
            .await
            .map_err(|e| {
                error!(error = %e, viewer, "Failed to count unread messages");
                HearthError::DataFetch(e.to_string())
            })
    }

    /// Live re-fetch cues for the viewer's conversation list: any insert or
    /// update where the viewer is the receiver.
    pub fn subscribe_to_changes(&self, auth: &AuthContext) -> Result<ChangeSubscription> {
        let viewer = auth.viewer()?;
        Ok(subscribe_to_changes(
            self.store.feed(),
            SubscriptionFilter::Receiver(viewer.to_string()),
        ))
    }

    /// Live re-fetch cues for one open thread: any change on that listing,
    /// either direction.
    pub fn subscribe_to_thread(
        &self,
        auth: &AuthContext,
        listing_id: &str,
    ) -> Result<ChangeSubscription> {
        auth.viewer()?;
        Ok(subscribe_to_changes(
            self.store.feed(),
            SubscriptionFilter::Listing(listing_id.to_string()),
        ))
    }
}
