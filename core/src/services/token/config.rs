//! Configuration for the token service

use am_shared::config::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, JWT_ISSUER};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Issuer claim written and required on verification
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            issuer: JWT_ISSUER.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry_minutes: (config.access_token_expiry / 60).max(1),
            issuer: config.issuer.clone(),
        }
    }
}
