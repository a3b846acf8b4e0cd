use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::watchlist::WatchlistEntry;
use crate::errors::DomainError;

use super::trait_::WatchlistRepository;

pub struct InMemoryWatchlistRepository {
    entries: RwLock<Vec<WatchlistEntry>>,
    next_id: AtomicI64,
}

impl InMemoryWatchlistRepository {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryWatchlistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WatchlistRepository for InMemoryWatchlistRepository {
    async fn add(&self, user_id: i64, listing_id: i64) -> Result<WatchlistEntry, DomainError> {
        let mut entries = self.entries.write().await;
        if entries
            .iter()
            .any(|e| e.user_id == user_id && e.listing_id == listing_id)
        {
            return Err(DomainError::conflict("Listing already in watchlist"));
        }

        let entry = WatchlistEntry {
            watchlist_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            listing_id,
            added_at: Utc::now(),
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn find(&self, user_id: i64, listing_id: i64) -> Result<Option<WatchlistEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.user_id == user_id && e.listing_id == listing_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<WatchlistEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut found: Vec<WatchlistEntry> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.added_at
                .cmp(&a.added_at)
                .then(b.watchlist_id.cmp(&a.watchlist_id))
        });
        Ok(found)
    }

    async fn remove(&self, user_id: i64, listing_id: i64) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(e.user_id == user_id && e.listing_id == listing_id));
        Ok(entries.len() < before)
    }

    async fn remove_for_listing(&self, listing_id: i64) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.listing_id != listing_id);
        Ok((before - entries.len()) as u64)
    }
}
