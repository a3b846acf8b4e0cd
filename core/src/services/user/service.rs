//! User service implementation

use std::sync::Arc;

use am_shared::utils::masking::mask_email;
use am_shared::utils::validation::{is_valid_email, not_empty};

use crate::domain::entities::otp::OtpIssueResult;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::auth::PasswordHasher;
use crate::services::otp::OtpService;
use crate::services::token::TokenService;

use super::config::UserServiceConfig;
use super::types::{AccountUpdate, LoginResult};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    otp: Arc<OtpService>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
    config: UserServiceConfig,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        otp: Arc<OtpService>,
        tokens: Arc<TokenService>,
        config: UserServiceConfig,
    ) -> Self {
        Self {
            users,
            otp,
            tokens,
            hasher: PasswordHasher::new(config.bcrypt_cost),
            config,
        }
    }

    /// Register a member account
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - blank username, malformed email or short password
    /// * `DomainError::Conflict` - username or email already registered
    pub async fn register(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        let username = username.trim();
        if !not_empty(username) {
            return Err(DomainError::validation("Username is required"));
        }
        if !is_valid_email(email) {
            return Err(DomainError::validation("Invalid email address"));
        }
        self.check_password(password)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::conflict("Username already exists"));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict("Email already exists"));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(NewUser::member(username.to_string(), email.to_string(), password_hash))
            .await?;

        tracing::info!(
            user_id = user.user_id,
            email = %mask_email(email),
            event = "user_registered",
            "Registered new user"
        );
        Ok(user)
    }

    /// Authenticate by username or email
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - unknown login or wrong password
    /// * `AuthError::AccountLocked` - the account is locked
    pub async fn login(&self, login: &str, password: &str) -> DomainResult<LoginResult> {
        let user = match self.users.find_by_login(login).await? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => user,
            _ => {
                tracing::warn!(event = "login_failed", "Invalid login attempt");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !user.is_active() {
            tracing::warn!(user_id = user.user_id, event = "login_locked", "Login attempt on locked account");
            return Err(AuthError::AccountLocked.into());
        }

        let token = self.tokens.generate_access_token(&user)?;
        tracing::info!(user_id = user.user_id, role = %user.role, event = "login_succeeded", "User logged in");
        Ok(LoginResult { token, user })
    }

    pub async fn get(&self, user_id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.users.list().await
    }

    /// Change the caller's username and/or password
    pub async fn update_account(&self, user_id: i64, update: AccountUpdate) -> DomainResult<User> {
        let mut user = self.get(user_id).await?;

        if let Some(username) = update.username {
            let username = username.trim().to_string();
            if !not_empty(&username) {
                return Err(DomainError::validation("Username is required"));
            }
            if username != user.username {
                if let Some(existing) = self.users.find_by_username(&username).await? {
                    if existing.user_id != user_id {
                        return Err(DomainError::conflict("Username already exists"));
                    }
                }
                user.username = username;
            }
        }

        if let Some(password) = update.password {
            self.check_password(&password)?;
            user.password_hash = self.hasher.hash(&password)?;
        }

        let user = self.users.update(&user).await?;
        tracing::info!(user_id, event = "account_updated", "Account updated");
        Ok(user)
    }

    pub async fn delete_account(&self, user_id: i64) -> DomainResult<()> {
        if !self.users.delete(user_id).await? {
            return Err(AuthError::UserNotFound.into());
        }
        tracing::info!(user_id, event = "account_deleted", "Account deleted");
        Ok(())
    }

    /// Flip a user between active and locked
    pub async fn toggle_lock(&self, user_id: i64) -> DomainResult<User> {
        let mut user = self.get(user_id).await?;
        user.status = user.status.toggled();
        let user = self.users.update(&user).await?;
        tracing::info!(
            user_id,
            status = user.status.as_str(),
            event = "account_lock_toggled",
            "Account status changed"
        );
        Ok(user)
    }

    /// Email a password reset code to the account registered under `email`
    pub async fn send_reset_otp(&self, email: &str) -> DomainResult<OtpIssueResult> {
        if !is_valid_email(email) {
            return Err(DomainError::validation("Invalid email address"));
        }
        self.otp.issue(email).await
    }

    /// Replace the password after checking the reset code.
    ///
    /// The new password is validated before the code is checked so a rejected
    /// password does not burn the code.
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> DomainResult<()> {
        self.check_password(new_password)?;
        self.otp.verify(email, code).await?;

        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        user.password_hash = self.hasher.hash(new_password)?;
        self.users.update(&user).await?;

        tracing::info!(
            user_id = user.user_id,
            event = "password_reset",
            "Password reset via OTP"
        );
        Ok(())
    }

    fn check_password(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(DomainError::validation(format!(
                "Password must be at least {} characters long",
                self.config.min_password_length
            )));
        }
        Ok(())
    }
}
