//! Error types for authentication, one-time passwords and enrichment

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username, email or password")]
    InvalidCredentials,

    #[error("Account is locked")]
    AccountLocked,

    #[error("User not found")]
    UserNotFound,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// One-time password failures, reported precisely to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// No account backs the identifier
    #[error("No account found for {identifier}")]
    NotFound { identifier: String },

    /// Never issued, already consumed or past its TTL
    #[error("OTP not found or expired")]
    NotFoundOrExpired,

    /// Submitted code differs from the stored one; the stored code is kept
    #[error("Invalid OTP")]
    InvalidCode,

    /// The code was stored but could not be delivered
    #[error("Failed to send OTP: {reason}")]
    DeliveryFailed { reason: String },

    #[error("OTP store error: {message}")]
    Store { message: String },
}

/// Reasons a vehicle lookup came back empty.
///
/// These never leave the enrichment client; they are logged and turned into
/// an absent result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("vehicle service returned status {0}")]
    Status(u16),

    #[error("vehicle service timed out")]
    Timeout,

    #[error("vehicle service unreachable: {0}")]
    Transport(String),

    #[error("invalid vehicle payload: {0}")]
    Decode(String),
}
