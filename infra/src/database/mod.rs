//! MySQL persistence using SQLx
//!
//! - Connection pool management and migrations
//! - Repository implementations for every core repository trait

pub mod connection;
pub mod mysql;


pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlListingRepository, MySqlReviewRepository, MySqlUserRepository, MySqlVehicleRepository,
    MySqlWatchlistRepository,
};
