//! Repository interfaces and in-memory implementations.
//!
//! The traits are implemented against MySQL in the infrastructure crate; the
//! in-memory versions back tests and the `memory` storage backend.

pub mod listing;
pub mod review;
pub mod user;
pub mod vehicle;
pub mod watchlist;

pub use listing::{InMemoryListingRepository, ListingRepository};
pub use review::{InMemoryReviewRepository, ReviewRepository};
pub use user::{InMemoryUserRepository, UserRepository};
pub use vehicle::{InMemoryVehicleRepository, VehicleRepository};
pub use watchlist::{InMemoryWatchlistRepository, WatchlistRepository};
