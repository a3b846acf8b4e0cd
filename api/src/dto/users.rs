use serde::{Deserialize, Serialize};
use validator::Validate;

use am_core::services::AccountUpdate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    /// Minimum length is enforced by the user service policy
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email address
    #[validate(length(min = 1))]
    pub email_username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 12))]
    pub otp: String,

    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(request: UpdateAccountRequest) -> Self {
        AccountUpdate {
            username: request.username,
            password: request.password,
        }
    }
}
