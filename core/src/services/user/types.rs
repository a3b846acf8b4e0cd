use serde::{Deserialize, Serialize};

use crate::domain::entities::token::AccessToken;
use crate::domain::entities::user::User;

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    #[serde(flatten)]
    pub token: AccessToken,
    pub user: User,
}

/// Self-service account changes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}
