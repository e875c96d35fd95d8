//! Message row model for persistence.
//!
//! Maps to the `messages` table. Immutable once written except `is_read`,
//! which the receiver flips to true exactly once; rows are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    pub listing_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Creates an unread record with a generated UUID and current timestamp.
    pub fn new(
        listing_id: impl Into<String>,
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            listing_id: listing_id.into(),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            content: content.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Same record with an explicit timestamp (seed tooling, tests).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Same record already marked read (seed tooling, tests).
    pub fn read(mut self) -> Self {
        self.is_read = true;
        self
    }
}
