//! Listing row model for persistence.
//!
//! Maps to the `listings` table; conversation summaries carry a read-through
//! snapshot of these columns. `property_type` and `status` are lowercase TEXT
//! (see hearth-core's domain enums).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListingRecord {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub city: String,
    pub state: String,
    pub property_type: String,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub square_feet: i64,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ListingRecord {
    /// Creates an active listing with a generated UUID and current timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seller_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        city: impl Into<String>,
        state: impl Into<String>,
        property_type: impl Into<String>,
        bedrooms: i64,
        bathrooms: i64,
        square_feet: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            seller_id: seller_id.into(),
            title: title.into(),
            description: description.into(),
            price,
            city: city.into(),
            state: state.into(),
            property_type: property_type.into(),
            bedrooms,
            bathrooms,
            square_feet,
            image_url: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }
}
