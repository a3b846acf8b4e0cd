//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{AccessToken, Claims};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 access tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Sign an access token carrying the user's id and role
    pub fn generate_access_token(&self, user: &User) -> Result<AccessToken, DomainError> {
        let expiry = Duration::minutes(self.config.access_token_expiry_minutes);
        let claims = Claims::for_user(user, expiry, &self.config.issuer);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, user_id = user.user_id, "Failed to sign access token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        Ok(AccessToken::bearer(token, expiry.num_seconds()))
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenExpired` - `exp` is in the past
    /// * `TokenError::InvalidSignature` - signed with another key
    /// * `TokenError::InvalidClaims` - wrong issuer or a subject that is not a user id
    /// * `TokenError::InvalidTokenFormat` - anything else
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let error = match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            };
            DomainError::Token(error)
        })?;

        if token_data.claims.user_id().is_none() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(token_data.claims)
    }
}
