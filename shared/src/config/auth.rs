//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900, // 15 minutes
            issuer: String::from("automarket"),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut jwt = JwtConfig::default();
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            jwt.secret = secret;
        }
        if let Some(minutes) = std::env::var("JWT_EXPIRY_MINUTES")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
        {
            jwt = jwt.with_access_expiry_minutes(minutes);
        }
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            jwt.issuer = issuer;
        }

        Self {
            jwt,
            bcrypt_cost: super::env_or("BCRYPT_COST", defaults.bcrypt_cost),
            min_password_length: defaults.min_password_length,
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_min_password_length() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_minutes() {
        let jwt = JwtConfig::new("secret").with_access_expiry_minutes(30);
        assert_eq!(jwt.access_token_expiry, 1800);
        assert!(!jwt.is_using_default_secret());
        assert!(JwtConfig::default().is_using_default_secret());
    }
}
