//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, EnrichmentError, OtpError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
