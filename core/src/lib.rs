//! # AutoMarket Core
//!
//! Domain layer for the AutoMarket backend: entities, repository interfaces,
//! business services and the error types shared by the outer crates.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use domain::{
    AccountStatus, ComposedListing, EnrichmentResult, Listing, ListingStatus, Review, Role, User,
    Vehicle, VehicleSnapshot, WatchlistEntry,
};
pub use errors::{DomainError, DomainResult};
pub use services::{
    EnrichmentClient, KeyValueStore, ListingEnrichmentComposer, ListingService, Notifier, OtpService,
    ReviewService, TokenService, UserService, VehicleService, VehicleSource,
};
