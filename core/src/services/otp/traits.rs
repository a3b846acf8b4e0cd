//! Collaborators of the OTP service

use async_trait::async_trait;

/// Key-value store with per-key expiry (`SET key value EX ttl`, `GET`, `DEL`)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value and TTL
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Value under `key`, `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Remove `key`; `true` when a live key was deleted
    async fn delete(&self, key: &str) -> Result<bool, String>;
}

/// Out-of-band delivery of a message to a user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), String>;
}
