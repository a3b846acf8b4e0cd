//! Vehicle service lookup configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Base URL of the vehicle service
    pub vehicle_service_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            vehicle_service_url: String::from("http://vehicle-service:5001"),
            timeout_ms: 1000,
        }
    }
}

impl EnrichmentConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            vehicle_service_url: std::env::var("VEHICLE_SERVICE_URL")
                .unwrap_or(defaults.vehicle_service_url),
            timeout_ms: super::env_or("VEHICLE_SERVICE_TIMEOUT_MS", defaults.timeout_ms),
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}
