//! End-to-end password reset through the public service API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use am_core::errors::{DomainError, OtpError};
use am_core::repositories::InMemoryUserRepository;
use am_core::services::{
    KeyValueStore, Notifier, OtpService, OtpServiceConfig, TokenService, TokenServiceConfig, UserService,
    UserServiceConfig,
};

#[derive(Default)]
struct MapStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MapStore {
    async fn set_with_expiry(&self, key: &str, value: &str, _ttl_seconds: u64) -> Result<(), String> {
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        Ok(self.values.lock().unwrap().remove(key).is_some())
    }
}

#[derive(Default)]
struct Inbox {
    bodies: Mutex<Vec<String>>,
}

impl Inbox {
    fn last_code(&self) -> String {
        let bodies = self.bodies.lock().unwrap();
        let body = bodies.last().expect("no message sent");
        body.split_whitespace()
            .find_map(|word| {
                let word = word.trim_end_matches('.');
                (word.len() == 6 && word.chars().all(|c| c.is_ascii_digit())).then(|| word.to_string())
            })
            .expect("no code in message")
    }
}

#[async_trait]
impl Notifier for Inbox {
    async fn send(&self, _recipient: &str, _subject: &str, body: &str) -> Result<(), String> {
        self.bodies.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

fn build() -> (UserService, Arc<Inbox>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let inbox = Arc::new(Inbox::default());
    let otp = Arc::new(OtpService::new(
        Arc::new(MapStore::default()),
        inbox.clone(),
        users.clone(),
        OtpServiceConfig::default(),
    ));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));
    let config = UserServiceConfig {
        bcrypt_cost: 4,
        ..Default::default()
    };
    (UserService::new(users, otp, tokens, config), inbox)
}

#[tokio::test]
async fn test_password_reset_flow() {
    let (service, inbox) = build();
    service.register("alice", "alice@example.com", "old-password").await.unwrap();

    service.send_reset_otp("alice@example.com").await.unwrap();
    let code = inbox.last_code();

    service
        .reset_password("alice@example.com", &code, "new-password")
        .await
        .unwrap();

    assert!(service.login("alice", "new-password").await.is_ok());
    assert!(service.login("alice", "old-password").await.is_err());

    // The code was consumed
    let replay = service.reset_password("alice@example.com", &code, "another-password").await;
    assert!(matches!(replay, Err(DomainError::Otp(OtpError::NotFoundOrExpired))));
}

#[tokio::test]
async fn test_reset_requires_latest_code() {
    let (service, inbox) = build();
    service.register("bob", "bob@example.com", "old-password").await.unwrap();

    service.send_reset_otp("bob@example.com").await.unwrap();
    let first = inbox.last_code();
    service.send_reset_otp("bob@example.com").await.unwrap();
    let second = inbox.last_code();

    if first != second {
        let stale = service.reset_password("bob@example.com", &first, "new-password").await;
        assert!(matches!(stale, Err(DomainError::Otp(OtpError::InvalidCode))));
    }
    service
        .reset_password("bob@example.com", &second, "new-password")
        .await
        .unwrap();
}
