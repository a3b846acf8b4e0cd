//! Shared utilities and common types for the AutoMarket server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and error codes
//! - Utility functions (email validation and masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheBackend, CacheConfig, CorsConfig, DatabaseConfig, EmailBackend,
    EmailConfig, EnrichmentConfig, Environment, JwtConfig, LoggingConfig, LogFormat, OtpConfig,
    ServerConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::MessageResponse;
pub use utils::{masking, validation};
