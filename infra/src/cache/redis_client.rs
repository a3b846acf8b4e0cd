//! Redis cache client
//!
//! Wraps a multiplexed connection with connect and command retries, and
//! implements `KeyValueStore` so the OTP service can keep codes in Redis.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use am_core::services::KeyValueStore;
use am_shared::config::CacheConfig;
use am_shared::masking::mask_email;

use crate::InfrastructureError;

/// Upper bound for the exponential backoff between attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with connection retry and per-command retry
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the retry settings from `config`
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connection = Self::connect_with_retry(client, max_retries, config.retry_delay_ms).await?;
        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    async fn connect_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// SET with an expiry in seconds, replacing any previous value
    pub async fn set_with_expiry(&self, key: &str, value: &str, expiry_seconds: u64) -> Result<(), InfrastructureError> {
        let masked = mask_key(key);
        debug!("Setting key '{}' with expiry {}s", masked, expiry_seconds);
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", masked, e);
            InfrastructureError::Cache(e)
        })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let masked = mask_key(key);
        debug!("Getting key '{}'", masked);
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", masked, e);
            InfrastructureError::Cache(e)
        })
    }

    /// DEL; `true` when the key existed
    ///
    /// Redis executes DEL atomically, so of two concurrent deletes of the same
    /// key exactly one observes `true`.
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let masked = mask_key(key);
        debug!("Deleting key '{}'", masked);
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.del::<_, u32>(key).await })
        })
        .await
        .map(|deleted| deleted > 0)
        .map_err(|e| {
            error!("Failed to delete key '{}': {}", masked, e);
            InfrastructureError::Cache(e)
        })
    }

    /// PING round trip
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        RedisClient::set_with_expiry(self, key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        RedisClient::get(self, key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        RedisClient::delete(self, key).await.map_err(|e| e.to_string())
    }
}

pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}

/// Mask the address part of a namespaced key such as `otp:<email>`
pub(crate) fn mask_key(key: &str) -> String {
    match key.split_once(':') {
        Some((namespace, rest)) if rest.contains('@') => format!("{}:{}", namespace, mask_email(rest)),
        _ if key.contains('@') => mask_email(key),
        _ => key.to_string(),
    }
}
