use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::listing::{Listing, ListingFilter, ListingStatus, ListingUpdate, NewListing};
use crate::domain::entities::user::Role;
use crate::domain::entities::watchlist::WatchlistEntry;
use crate::domain::value_objects::ComposedListing;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ListingRepository, WatchlistRepository};
use crate::services::enrichment::ListingEnrichmentComposer;

/// Fewest listings a comparison accepts
pub const MIN_COMPARE: usize = 2;
/// Most listings a comparison accepts
pub const MAX_COMPARE: usize = 4;

/// Caller identity for ownership checks
#[derive(Debug, Clone, Copy)]
pub struct ListingActor {
    pub user_id: i64,
    pub role: Role,
}

impl ListingActor {
    fn may_manage(&self, listing: &Listing) -> bool {
        listing.seller_id == self.user_id || matches!(self.role, Role::Admin | Role::Staff)
    }
}

pub struct ListingService {
    listings: Arc<dyn ListingRepository>,
    watchlist: Arc<dyn WatchlistRepository>,
    composer: Arc<ListingEnrichmentComposer>,
}

impl ListingService {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        watchlist: Arc<dyn WatchlistRepository>,
        composer: Arc<ListingEnrichmentComposer>,
    ) -> Self {
        Self {
            listings,
            watchlist,
            composer,
        }
    }

    pub async fn create(&self, seller_id: i64, listing: NewListing) -> DomainResult<ComposedListing> {
        listing.validate()?;
        let listing = self.listings.create(seller_id, listing).await?;
        tracing::info!(
            listing_id = listing.listing_id,
            seller_id,
            event = "listing_created",
            "Listing created"
        );
        Ok(self.composer.compose(listing).await)
    }

    pub async fn get(&self, listing_id: i64) -> DomainResult<ComposedListing> {
        let listing = self.find(listing_id).await?;
        Ok(self.composer.compose(listing).await)
    }

    /// Available listings, newest first
    pub async fn list_available(&self) -> DomainResult<Vec<ComposedListing>> {
        let listings = self.listings.list_available().await?;
        Ok(self.composer.compose_many(listings).await)
    }

    /// Available listings matching `filter`.
    ///
    /// Vehicle criteria need enrichment, so they are applied after composing;
    /// listings whose vehicle details are missing drop out when any is set.
    pub async fn filter(&self, filter: &ListingFilter) -> DomainResult<Vec<ComposedListing>> {
        filter.validate()?;
        let listings = self.listings.search(filter).await?;
        let composed = self.composer.compose_many(listings).await;

        if !filter.has_vehicle_criteria() {
            return Ok(composed);
        }
        Ok(composed
            .into_iter()
            .filter(|c| c.vehicle().is_some_and(|v| filter.matches_vehicle(v)))
            .collect())
    }

    pub async fn update(
        &self,
        listing_id: i64,
        actor: ListingActor,
        update: ListingUpdate,
    ) -> DomainResult<ComposedListing> {
        update.validate()?;
        let mut listing = self.find(listing_id).await?;
        if !actor.may_manage(&listing) {
            return Err(DomainError::forbidden("Only the seller or staff may edit this listing"));
        }

        update.apply_to(&mut listing);
        let listing = self.listings.update(&listing).await?;
        tracing::info!(listing_id, user_id = actor.user_id, event = "listing_updated", "Listing updated");
        Ok(self.composer.compose(listing).await)
    }

    /// Moderation: move a listing to another status
    pub async fn set_status(&self, listing_id: i64, status: ListingStatus) -> DomainResult<ComposedListing> {
        let mut listing = self.find(listing_id).await?;
        listing.status = status;
        let listing = self.listings.update(&listing).await?;
        tracing::info!(
            listing_id,
            status = status.as_str(),
            event = "listing_status_changed",
            "Listing status changed"
        );
        Ok(self.composer.compose(listing).await)
    }

    pub async fn delete(&self, listing_id: i64, actor: ListingActor) -> DomainResult<()> {
        let listing = self.find(listing_id).await?;
        if !actor.may_manage(&listing) {
            return Err(DomainError::forbidden("Only the seller or staff may delete this listing"));
        }

        self.listings.delete(listing_id).await?;
        let unwatched = self.watchlist.remove_for_listing(listing_id).await?;
        tracing::info!(
            listing_id,
            watchlist_entries_removed = unwatched,
            event = "listing_deleted",
            "Listing deleted"
        );
        Ok(())
    }

    /// Side-by-side view of 2 to 4 distinct listings, in request order
    pub async fn compare(&self, listing_ids: &[i64]) -> DomainResult<Vec<ComposedListing>> {
        if listing_ids.len() < MIN_COMPARE || listing_ids.len() > MAX_COMPARE {
            return Err(DomainError::validation(format!(
                "Provide between {} and {} listing ids to compare",
                MIN_COMPARE, MAX_COMPARE
            )));
        }
        let distinct: HashSet<i64> = listing_ids.iter().copied().collect();
        if distinct.len() != listing_ids.len() {
            return Err(DomainError::validation("Listing ids must be distinct"));
        }

        let found = self.listings.find_by_ids(listing_ids).await?;
        let mut ordered = Vec::with_capacity(listing_ids.len());
        for id in listing_ids {
            let listing = found
                .iter()
                .find(|l| l.listing_id == *id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("Listing {}", id)))?;
            ordered.push(listing);
        }
        Ok(self.composer.compose_many(ordered).await)
    }

    pub async fn watch(&self, user_id: i64, listing_id: i64) -> DomainResult<WatchlistEntry> {
        self.find(listing_id).await?;
        let entry = self.watchlist.add(user_id, listing_id).await?;
        tracing::info!(user_id, listing_id, event = "watchlist_added", "Listing added to watchlist");
        Ok(entry)
    }

    /// The user's watched listings, most recently added first
    pub async fn watchlist(&self, user_id: i64) -> DomainResult<Vec<ComposedListing>> {
        let entries = self.watchlist.list_for_user(user_id).await?;
        let ids: Vec<i64> = entries.iter().map(|e| e.listing_id).collect();
        let found = self.listings.find_by_ids(&ids).await?;

        let listings: Vec<Listing> = ids
            .iter()
            .filter_map(|id| found.iter().find(|l| l.listing_id == *id).cloned())
            .collect();
        Ok(self.composer.compose_many(listings).await)
    }

    pub async fn unwatch(&self, user_id: i64, listing_id: i64) -> DomainResult<()> {
        if !self.watchlist.remove(user_id, listing_id).await? {
            return Err(DomainError::not_found("Watchlist entry"));
        }
        tracing::info!(user_id, listing_id, event = "watchlist_removed", "Listing removed from watchlist");
        Ok(())
    }

    async fn find(&self, listing_id: i64) -> DomainResult<Listing> {
        self.listings
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))
    }
}
