//! Listing repository trait.

use async_trait::async_trait;

use crate::domain::entities::listing::{Listing, ListingFilter, NewListing};
use crate::errors::DomainError;

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing owned by `seller_id`, images included
    async fn create(&self, seller_id: i64, listing: NewListing) -> Result<Listing, DomainError>;

    async fn find_by_id(&self, listing_id: i64) -> Result<Option<Listing>, DomainError>;

    /// Listings with the given ids, in no particular order; unknown ids are skipped
    async fn find_by_ids(&self, listing_ids: &[i64]) -> Result<Vec<Listing>, DomainError>;

    /// Available listings, newest first
    async fn list_available(&self) -> Result<Vec<Listing>, DomainError>;

    /// Available listings matching the title and price criteria of `filter`,
    /// newest first. Vehicle criteria are ignored here.
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DomainError>;

    /// Replace the stored listing (including its images)
    async fn update(&self, listing: &Listing) -> Result<Listing, DomainError>;

    /// Returns `true` when a listing was removed
    async fn delete(&self, listing_id: i64) -> Result<bool, DomainError>;
}
