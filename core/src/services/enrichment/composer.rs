use futures::future::join_all;
use std::sync::Arc;

use crate::domain::entities::Listing;
use crate::domain::value_objects::ComposedListing;

use super::client::EnrichmentClient;

pub struct ListingEnrichmentComposer {
    client: Arc<EnrichmentClient>,
}

impl ListingEnrichmentComposer {
    pub fn new(client: Arc<EnrichmentClient>) -> Self {
        Self { client }
    }

    /// Attach vehicle details to `listing`.
    ///
    /// Listings without a vehicle id get no `vehicle_details` at all; listings
    /// with one always get a value, possibly absent.
    pub async fn compose(&self, listing: Listing) -> ComposedListing {
        let vehicle_details = match listing.vehicle_id {
            Some(vehicle_id) => Some(self.client.fetch_by_id(Some(vehicle_id)).await),
            None => None,
        };
        ComposedListing {
            listing,
            vehicle_details,
        }
    }

    /// Compose each listing, running the lookups concurrently; order is preserved
    pub async fn compose_many(&self, listings: Vec<Listing>) -> Vec<ComposedListing> {
        join_all(listings.into_iter().map(|listing| self.compose(listing))).await
    }
}
