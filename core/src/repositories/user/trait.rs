//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations must enforce uniqueness of both `username` and `email`,
/// returning `DomainError::Conflict` when either is already taken.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user whose username or email equals `login`
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// All users ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replace the stored user with the same id
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Returns `true` when a user was removed
    async fn delete(&self, user_id: i64) -> Result<bool, DomainError>;
}
