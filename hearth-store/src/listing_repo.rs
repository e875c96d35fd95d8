//! Listing repository: the read-through listing snapshot used by
//! conversation summaries, plus the inserts the seed tooling needs.

use tracing::info;

use crate::error::StoreError;
use crate::models::ListingRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ListingRepository {
    pool_manager: SqlitePoolManager,
}

impl ListingRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StoreError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS listings (
                id TEXT PRIMARY KEY,
                seller_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price INTEGER NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                property_type TEXT NOT NULL,
                bedrooms INTEGER NOT NULL,
                bathrooms INTEGER NOT NULL,
                square_feet INTEGER NOT NULL,
                image_url TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_listings_seller_id ON listings(seller_id)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Saves or updates a listing.
    pub async fn save(&self, listing: &ListingRecord) -> Result<(), StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO listings (id, seller_id, title, description, price, city, state,
                                  property_type, bedrooms, bathrooms, square_feet,
                                  image_url, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                price = excluded.price,
                status = excluded.status,
                image_url = excluded.image_url
            "#,
        )
        .bind(&listing.id)
        .bind(&listing.seller_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(&listing.city)
        .bind(&listing.state)
        .bind(&listing.property_type)
        .bind(listing.bedrooms)
        .bind(listing.bathrooms)
        .bind(listing.square_feet)
        .bind(&listing.image_url)
        .bind(&listing.status)
        .bind(listing.created_at)
        .execute(pool)
        .await?;

        info!(listing_id = %listing.id, title = %listing.title, "Saved listing");
        Ok(())
    }

    pub async fn get(&self, listing_id: &str) -> Result<Option<ListingRecord>, StoreError> {
        let pool = self.pool_manager.pool();

        let listing = sqlx::query_as::<_, ListingRecord>("SELECT * FROM listings WHERE id = ?")
            .bind(listing_id)
            .fetch_optional(pool)
            .await?;

        Ok(listing)
    }
}
