//! Watchlist repository trait.

use async_trait::async_trait;

use crate::domain::entities::watchlist::WatchlistEntry;
use crate::errors::DomainError;

#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    /// Add an entry; `DomainError::Conflict` if the user already watches the listing
    async fn add(&self, user_id: i64, listing_id: i64) -> Result<WatchlistEntry, DomainError>;

    async fn find(&self, user_id: i64, listing_id: i64) -> Result<Option<WatchlistEntry>, DomainError>;

    /// Entries of a user, most recently added first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<WatchlistEntry>, DomainError>;

    /// Returns `true` when an entry was removed
    async fn remove(&self, user_id: i64, listing_id: i64) -> Result<bool, DomainError>;

    /// Drop every entry pointing at a deleted listing
    async fn remove_for_listing(&self, listing_id: i64) -> Result<u64, DomainError>;
}
