//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, OtpError, TokenError};

#[test]
fn test_otp_errors_convert_into_domain_error() {
    let error: DomainError = OtpError::InvalidCode.into();
    assert!(matches!(error, DomainError::Otp(OtpError::InvalidCode)));
    assert_eq!(error.to_string(), "Invalid OTP");
}

#[test]
fn test_delivery_failure_message_keeps_reason() {
    let error = OtpError::DeliveryFailed {
        reason: "smtp timeout".to_string(),
    };
    assert!(error.to_string().contains("smtp timeout"));
}

#[test]
fn test_auth_and_token_errors_are_transparent() {
    let auth: DomainError = AuthError::AccountLocked.into();
    assert_eq!(auth.to_string(), "Account is locked");

    let token: DomainError = TokenError::TokenExpired.into();
    assert_eq!(token.to_string(), "Token expired");
}

#[test]
fn test_helper_constructors() {
    assert!(matches!(DomainError::not_found("Listing"), DomainError::NotFound { resource } if resource == "Listing"));
    assert!(matches!(DomainError::conflict("dup"), DomainError::Conflict { .. }));
    assert!(matches!(DomainError::forbidden("no"), DomainError::Forbidden { .. }));
    assert!(matches!(DomainError::validation("bad"), DomainError::Validation { .. }));
}
