//! Message repository: persistence and queries for the messages table.
//!
//! Uses SqlitePoolManager and the row models; publishes a row-level change on
//! the [`ChangeFeed`] after every successful write. Conversation aggregation
//! reads through [`MessageRepository::messages_involving`]; thread views read
//! through [`MessageRepository::thread_messages`].

use tracing::info;

use crate::change_feed::{ChangeFeed, ChangeOp, MessageChange};
use crate::error::StoreError;
use crate::models::{MessageContextRow, MessageRecord};
use crate::sqlite_pool::SqlitePoolManager;

/// Columns shared by both context queries: the message row, the listing
/// snapshot, and both participants' display names. Listings and profiles are
/// LEFT JOINed so a missing referenced row degrades instead of dropping the
/// message.
const CONTEXT_SELECT: &str = r#"
    SELECT m.id, m.listing_id, m.sender_id, m.receiver_id, m.content,
           m.is_read, m.created_at,
           s.full_name AS sender_name,
           r.full_name AS receiver_name,
           l.title     AS listing_title,
           l.city      AS listing_city,
           l.price     AS listing_price,
           l.status    AS listing_status,
           l.image_url AS listing_image_url,
           l.seller_id AS listing_seller_id
    FROM messages m
    LEFT JOIN profiles s ON s.id = m.sender_id
    LEFT JOIN profiles r ON r.id = m.receiver_id
    LEFT JOIN listings l ON l.id = m.listing_id
"#;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
    feed: ChangeFeed,
}

impl MessageRepository {
    pub async fn new(
        pool_manager: SqlitePoolManager,
        feed: ChangeFeed,
    ) -> Result<Self, StoreError> {
        let repo = Self { pool_manager, feed };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                listing_id TEXT NOT NULL,
                sender_id TEXT NOT NULL,
                receiver_id TEXT NOT NULL,
                content TEXT NOT NULL,
                is_read BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_listing_id ON messages(listing_id);
            CREATE INDEX IF NOT EXISTS idx_messages_sender_id ON messages(sender_id);
            CREATE INDEX IF NOT EXISTS idx_messages_receiver_id ON messages(receiver_id);
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Inserts a message and publishes an Insert change.
    pub async fn save(&self, message: &MessageRecord) -> Result<(), StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO messages (id, listing_id, sender_id, receiver_id, content, is_read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.listing_id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.content)
        .bind(message.is_read)
        .bind(message.created_at)
        .execute(pool)
        .await?;

        info!(
            message_id = %message.id,
            listing_id = %message.listing_id,
            "Saved message"
        );

        self.feed.publish(MessageChange {
            op: ChangeOp::Insert,
            row: message.clone(),
        });

        Ok(())
    }

    /// All messages where the user is sender or receiver, joined with the
    /// listing and both display names, most recent first. Equal timestamps
    /// are tie-broken by id so the order is deterministic.
    pub async fn messages_involving(
        &self,
        user_id: &str,
    ) -> Result<Vec<MessageContextRow>, StoreError> {
        let pool = self.pool_manager.pool();
        let sql = format!(
            "{CONTEXT_SELECT} WHERE m.sender_id = ? OR m.receiver_id = ? \
             ORDER BY m.created_at DESC, m.id DESC"
        );

        let rows: Vec<MessageContextRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        info!(user_id, count = rows.len(), "Retrieved messages involving user");
        Ok(rows)
    }

    /// One listing's thread restricted to rows involving the user,
    /// chronologically ascending.
    pub async fn thread_messages(
        &self,
        listing_id: &str,
        user_id: &str,
    ) -> Result<Vec<MessageContextRow>, StoreError> {
        let pool = self.pool_manager.pool();
        let sql = format!(
            "{CONTEXT_SELECT} WHERE m.listing_id = ? AND (m.sender_id = ? OR m.receiver_id = ?) \
             ORDER BY m.created_at ASC, m.id ASC"
        );

        let rows: Vec<MessageContextRow> = sqlx::query_as(&sql)
            .bind(listing_id)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// Flips `is_read` on every unread row addressed to the receiver in the
    /// listing's thread. Idempotent; returns the number of rows flipped and
    /// publishes an Update change per flipped row.
    pub async fn mark_thread_read(
        &self,
        listing_id: &str,
        receiver_id: &str,
    ) -> Result<u64, StoreError> {
        let pool = self.pool_manager.pool();

        // Fetch the affected rows first so the feed can carry row-level updates.
        let unread: Vec<MessageRecord> = sqlx::query_as(
            r#"
            SELECT * FROM messages
            WHERE listing_id = ? AND receiver_id = ? AND is_read = 0
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(listing_id)
        .bind(receiver_id)
        .fetch_all(pool)
        .await?;

        if unread.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE messages SET is_read = 1
            WHERE listing_id = ? AND receiver_id = ? AND is_read = 0
            "#,
        )
        .bind(listing_id)
        .bind(receiver_id)
        .execute(pool)
        .await?;

        for mut row in unread {
            row.is_read = true;
            self.feed.publish(MessageChange {
                op: ChangeOp::Update,
                row,
            });
        }

        info!(
            listing_id,
            receiver_id,
            rows = result.rows_affected(),
            "Marked thread read"
        );

        Ok(result.rows_affected())
    }

    /// Unread rows addressed to the user across all listings (badge count).
    pub async fn unread_total(&self, receiver_id: &str) -> Result<i64, StoreError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = ? AND is_read = 0",
        )
        .bind(receiver_id)
        .fetch_one(pool)
        .await?;

        Ok(count.0)
    }

    pub async fn get_message_by_id(
        &self,
        message_id: &str,
    ) -> Result<Option<MessageRecord>, StoreError> {
        let pool = self.pool_manager.pool();

        let message = sqlx::query_as::<_, MessageRecord>("SELECT * FROM messages WHERE id = ?")
            .bind(message_id)
            .fetch_optional(pool)
            .await?;

        Ok(message)
    }
}
