//! Read-time enrichment of listings with vehicle details
//!
//! [`EnrichmentClient`] performs a single bounded lookup against a
//! [`VehicleSource`] and absorbs every failure into an absent result.
//! [`ListingEnrichmentComposer`] attaches that result to listings.

mod client;
mod composer;
mod traits;


pub use client::{EnrichmentClient, DEFAULT_TIMEOUT};
pub use composer::ListingEnrichmentComposer;
pub use traits::VehicleSource;
