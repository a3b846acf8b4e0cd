//! # AutoMarket Infrastructure
//!
//! Concrete adapters behind the core crate's traits:
//!
//! - **database**: MySQL repositories and the connection pool (SQLx)
//! - **cache**: key-value stores for one-time codes (Redis, in-memory)
//! - **email**: OTP delivery over SMTP (lettre) or to the log
//! - **vehicle**: HTTP client for the vehicle service used by enrichment

pub mod cache;
pub mod database;
pub mod email;
pub mod vehicle;

pub use cache::{MemoryKeyValueStore, RedisClient};
pub use database::{
    DatabasePool, MySqlListingRepository, MySqlReviewRepository, MySqlUserRepository, MySqlVehicleRepository,
    MySqlWatchlistRepository,
};
pub use email::{ConsoleNotifier, SmtpNotifier};
pub use vehicle::HttpVehicleSource;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SMTP transport or message building error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
