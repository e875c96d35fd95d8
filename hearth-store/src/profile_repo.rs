//! Profile repository: participant display info.

use tracing::info;

use crate::error::StoreError;
use crate::models::ProfileRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ProfileRepository {
    pool_manager: SqlitePoolManager,
}

impl ProfileRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StoreError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Saves or updates a profile (the auth provider owns the id).
    pub async fn save(&self, profile: &ProfileRecord) -> Result<(), StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name, email, phone, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                full_name = excluded.full_name,
                email = excluded.email,
                phone = excluded.phone
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(profile.created_at)
        .execute(pool)
        .await?;

        info!(profile_id = %profile.id, "Saved profile");
        Ok(())
    }

    pub async fn get(&self, profile_id: &str) -> Result<Option<ProfileRecord>, StoreError> {
        let pool = self.pool_manager.pool();

        let profile = sqlx::query_as::<_, ProfileRecord>("SELECT * FROM profiles WHERE id = ?")
            .bind(profile_id)
            .fetch_optional(pool)
            .await?;

        Ok(profile)
    }

    pub async fn display_name(&self, profile_id: &str) -> Result<Option<String>, StoreError> {
        let pool = self.pool_manager.pool();

        let name: Option<(String,)> =
            sqlx::query_as("SELECT full_name FROM profiles WHERE id = ?")
                .bind(profile_id)
                .fetch_optional(pool)
                .await?;

        Ok(name.map(|n| n.0))
    }
}
