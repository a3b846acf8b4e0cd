use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::listing::{Listing, ListingFilter, NewListing};
use crate::errors::DomainError;

use super::trait_::ListingRepository;

pub struct InMemoryListingRepository {
    listings: RwLock<HashMap<i64, Listing>>,
    next_id: AtomicI64,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self {
            listings: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryListingRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(mut listings: Vec<Listing>) -> Vec<Listing> {
    listings.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.listing_id.cmp(&a.listing_id))
    });
    listings
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn create(&self, seller_id: i64, listing: NewListing) -> Result<Listing, DomainError> {
        let listing_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let listing = listing.into_listing(listing_id, seller_id);
        self.listings.write().await.insert(listing_id, listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, listing_id: i64) -> Result<Option<Listing>, DomainError> {
        Ok(self.listings.read().await.get(&listing_id).cloned())
    }

    async fn find_by_ids(&self, listing_ids: &[i64]) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(listing_ids
            .iter()
            .filter_map(|id| listings.get(id).cloned())
            .collect())
    }

    async fn list_available(&self) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(newest_first(
            listings.values().filter(|l| l.is_available()).cloned().collect(),
        ))
    }

    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(newest_first(
            listings
                .values()
                .filter(|l| l.is_available() && filter.matches_listing(l))
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, listing: &Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        match listings.get_mut(&listing.listing_id) {
            Some(stored) => {
                *stored = listing.clone();
                Ok(listing.clone())
            }
            None => Err(DomainError::not_found("Listing")),
        }
    }

    async fn delete(&self, listing_id: i64) -> Result<bool, DomainError> {
        Ok(self.listings.write().await.remove(&listing_id).is_some())
    }
}
