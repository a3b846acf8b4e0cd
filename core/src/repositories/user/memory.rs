//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::trait_::UserRepository;

pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_unique<'a>(
    mut users: impl Iterator<Item = &'a User>,
    user_id: Option<i64>,
    username: &str,
    email: &str,
) -> Result<(), DomainError> {
    let clash = users.find(|u| Some(u.user_id) != user_id && (u.username == username || u.email == email));
    match clash {
        Some(existing) if existing.username == username => {
            Err(DomainError::conflict("Username already exists"))
        }
        Some(_) => Err(DomainError::conflict("Email already exists")),
        None => Ok(()),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        ensure_unique(users.values(), None, &user.username, &user.email)?;

        let user_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = user.into_user(user_id);
        users.insert(user_id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.user_id) {
            return Err(DomainError::not_found("User"));
        }
        ensure_unique(users.values(), Some(user.user_id), &user.username, &user.email)?;
        users.insert(user.user_id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, user_id: i64) -> Result<bool, DomainError> {
        Ok(self.users.write().await.remove(&user_id).is_some())
    }
}
