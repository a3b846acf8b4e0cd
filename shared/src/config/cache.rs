//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Which key-value store backs one-time codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Attempts per command before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            url: String::from("redis://localhost:6379"),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: super::env_or("CACHE_BACKEND", defaults.backend),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            max_retries: super::env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: super::env_or("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
        }
    }

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
