//! MySQL implementation of the WatchlistRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use am_core::domain::entities::watchlist::WatchlistEntry;
use am_core::errors::DomainError;
use am_core::repositories::WatchlistRepository;

use super::{column, db_error, is_unique_violation};

pub struct MySqlWatchlistRepository {
    pool: MySqlPool,
}

impl MySqlWatchlistRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &MySqlRow) -> Result<WatchlistEntry, DomainError> {
        Ok(WatchlistEntry {
            watchlist_id: column(row, "watchlist_id")?,
            user_id: column(row, "user_id")?,
            listing_id: column(row, "listing_id")?,
            added_at: column::<DateTime<Utc>>(row, "added_at")?,
        })
    }
}

#[async_trait]
impl WatchlistRepository for MySqlWatchlistRepository {
    async fn add(&self, user_id: i64, listing_id: i64) -> Result<WatchlistEntry, DomainError> {
        let added_at = Utc::now();
        let result = sqlx::query("INSERT INTO watchlist (user_id, listing_id, added_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(listing_id)
            .bind(added_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::conflict("Listing is already in the watchlist")
                } else {
                    DomainError::Database(format!("Failed to add watchlist entry: {}", e))
                }
            })?;

        Ok(WatchlistEntry {
            watchlist_id: result.last_insert_id() as i64,
            user_id,
            listing_id,
            added_at,
        })
    }

    async fn find(&self, user_id: i64, listing_id: i64) -> Result<Option<WatchlistEntry>, DomainError> {
        let row = sqlx::query(
            "SELECT watchlist_id, user_id, listing_id, added_at FROM watchlist WHERE user_id = ? AND listing_id = ?",
        )
        .bind(user_id)
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<WatchlistEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT watchlist_id, user_id, listing_id, added_at
            FROM watchlist
            WHERE user_id = ?
            ORDER BY added_at DESC, watchlist_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Database query failed"))?;
        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn remove(&self, user_id: i64, listing_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM watchlist WHERE user_id = ? AND listing_id = ?")
            .bind(user_id)
            .bind(listing_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to remove watchlist entry"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_for_listing(&self, listing_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM watchlist WHERE listing_id = ?")
            .bind(listing_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to remove watchlist entries"))?;
        Ok(result.rows_affected())
    }
}
