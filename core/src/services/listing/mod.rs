//! Listings, comparison and watchlists. Every listing leaving this service is
//! composed with its vehicle details.

mod service;

#[cfg(test)]
mod tests;

pub use service::{ListingActor, ListingService, MAX_COMPARE, MIN_COMPARE};
