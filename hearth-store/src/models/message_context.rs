//! Joined message row: a message plus its listing snapshot and both
//! participants' display names.
//!
//! Listing and profile columns come from LEFT JOINs and can be NULL when the
//! referenced row is missing; the aggregation degrades those to placeholders
//! instead of failing.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageContextRow {
    pub id: String,
    pub listing_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
    pub listing_title: Option<String>,
    pub listing_city: Option<String>,
    pub listing_price: Option<i64>,
    pub listing_status: Option<String>,
    pub listing_image_url: Option<String>,
    pub listing_seller_id: Option<String>,
}
