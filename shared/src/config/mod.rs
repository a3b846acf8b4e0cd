//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT and password policy configuration
//! - `cache` - Key-value store configuration (Redis or in-process)
//! - `database` - Relational store connection and pool configuration
//! - `email` - Outbound email (OTP delivery) configuration
//! - `enrichment` - Vehicle service lookup configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time password issuance configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;
pub mod enrichment;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use cache::{CacheBackend, CacheConfig};
pub use database::{DatabaseConfig, StorageBackend};
pub use email::{EmailBackend, EmailConfig};
pub use enrichment::EnrichmentConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,

    #[serde(default)]
    pub otp: OtpConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::development(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            otp: OtpConfig::default(),
            enrichment: EnrichmentConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let cors = if environment.is_production() {
            CorsConfig::from_env()
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            cors,
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            otp: OtpConfig::from_env(),
            enrichment: EnrichmentConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Configuration wired entirely to in-process collaborators
    pub fn in_memory() -> Self {
        let mut config = Self::default();
        config.database.backend = StorageBackend::Memory;
        config.cache.backend = CacheBackend::Memory;
        config.email.backend = EmailBackend::Console;
        config
    }
}

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
