//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// JWT issuer
pub const JWT_ISSUER: &str = "automarket";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role at the time the token was issued
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates access token claims for `user` expiring after `expiry`
    pub fn for_user(user: &User, expiry: Duration, issuer: &str) -> Self {
        let now = Utc::now();
        Self {
            sub: user.user_id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + expiry).timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// User id parsed from the subject claim
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Signed access token handed to the client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl AccessToken {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
