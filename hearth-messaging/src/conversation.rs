//! Derived conversation summaries.
//!
//! A Conversation is an ephemeral view value rebuilt on every fetch cycle; it
//! has no identity or storage of its own. `unread_count` is always recomputed
//! from the raw rows, never patched incrementally.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use hearth_store::MessageContextRow;

/// Placeholder for a participant whose profile row is missing.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Per-listing summary of the viewer's thread with one counterparty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    pub listing_id: String,
    pub listing_title: String,
    pub listing_city: Option<String>,
    pub listing_price: Option<i64>,
    pub listing_status: Option<String>,
    pub listing_image_url: Option<String>,
    pub other_user_id: String,
    pub other_user_name: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: u32,
}

/// Folds the viewer's message history into one Conversation per listing.
///
/// `rows` must be ordered most recent first: the first row seen for a listing
/// seeds the summary fields (last message, time, counterparty, listing
/// snapshot), and every later row for that listing only accumulates
/// `unread_count`; it never overwrites the seeded fields. Output order is
/// first-insertion order, i.e. most-recently-active first.
pub fn fold_conversations(viewer_id: &str, rows: &[MessageContextRow]) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = Vec::new();
    let mut by_listing: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let is_receiver = row.receiver_id == viewer_id;
        let counterparty_id = if is_receiver {
            &row.sender_id
        } else {
            &row.receiver_id
        };

        match by_listing.get(&row.listing_id) {
            None => {
                let other_user_name = if is_receiver {
                    row.sender_name.clone()
                } else {
                    row.receiver_name.clone()
                };
                by_listing.insert(row.listing_id.clone(), conversations.len());
                conversations.push(Conversation {
                    listing_id: row.listing_id.clone(),
                    listing_title: row
                        .listing_title
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                    listing_city: row.listing_city.clone(),
                    listing_price: row.listing_price,
                    listing_status: row.listing_status.clone(),
                    listing_image_url: row.listing_image_url.clone(),
                    other_user_id: counterparty_id.clone(),
                    other_user_name: other_user_name
                        .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                    last_message: row.content.clone(),
                    last_message_time: row.created_at,
                    unread_count: u32::from(is_receiver && !row.is_read),
                });
            }
            Some(&idx) => {
                let conversation = &mut conversations[idx];
                if is_receiver && !row.is_read {
                    conversation.unread_count += 1;
                }
                // Threads are assumed two-party; the summary keeps the
                // counterparty of the most recent message.
                if *counterparty_id != conversation.other_user_id {
                    warn!(
                        listing_id = %row.listing_id,
                        seeded = %conversation.other_user_id,
                        seen = %counterparty_id,
                        "listing thread has more than one counterparty"
                    );
                }
            }
        }
    }

    conversations
}
