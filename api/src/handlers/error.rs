//! Mapping from domain failures to HTTP responses
//!
//! Every error leaves the API as a JSON `ErrorResponse` with a stable code.
//! Storage and internal failures are logged in full and reported generically.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::ValidationErrors;

use am_core::errors::{AuthError, DomainError, OtpError, TokenError};
use am_shared::{error_codes, ErrorResponse};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Body, query or path could not be parsed
    #[error("{0}")]
    BadRequest(String),

    /// Field-level validation failures from a request DTO
    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        let domain = match self {
            ApiError::Domain(error) => error,
            ApiError::BadRequest(_) => return (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST),
            ApiError::Validation(_) => return (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        };

        match domain {
            DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            DomainError::Conflict { .. } => (StatusCode::CONFLICT, error_codes::CONFLICT),
            DomainError::Forbidden { .. } => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
            DomainError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::DATABASE_ERROR),
            DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
            DomainError::Auth(error) => match error {
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS),
                AuthError::AuthenticationRequired => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
                AuthError::AccountLocked => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_LOCKED),
                AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
                AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
                AuthError::PasswordHash(_) => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
            },
            DomainError::Otp(error) => match error {
                OtpError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
                OtpError::NotFoundOrExpired => (StatusCode::BAD_REQUEST, error_codes::OTP_NOT_FOUND_OR_EXPIRED),
                OtpError::InvalidCode => (StatusCode::BAD_REQUEST, error_codes::OTP_INVALID),
                OtpError::DeliveryFailed { .. } => (StatusCode::BAD_GATEWAY, error_codes::OTP_DELIVERY_FAILED),
                OtpError::Store { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::CACHE_ERROR),
            },
            DomainError::Token(error) => match error {
                TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
                TokenError::TokenGenerationFailed => {
                    (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
                }
                _ => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
            },
        }
    }

    fn message(&self, status: StatusCode) -> String {
        match self {
            _ if status.is_server_error() && status != StatusCode::BAD_GATEWAY => {
                "An internal error occurred".to_string()
            }
            ApiError::Domain(DomainError::Otp(OtpError::DeliveryFailed { .. })) => {
                "Failed to send OTP, please try again later".to_string()
            }
            ApiError::Domain(DomainError::Validation { message })
            | ApiError::Domain(DomainError::Conflict { message })
            | ApiError::Domain(DomainError::Forbidden { message }) => message.clone(),
            ApiError::Domain(DomainError::NotFound { resource }) => format!("{} not found", resource),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::debug!(error = %self, code, "Request rejected");
        }

        let mut body = ErrorResponse::new(code, self.message(status));
        if let ApiError::Validation(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                body = body.add_detail(field.to_string(), messages);
            }
        }

        HttpResponse::build(status).json(body)
    }
}
