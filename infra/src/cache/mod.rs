//! Key-value stores holding one-time codes
//!
//! Both stores implement the core `KeyValueStore` trait; Redis is used in
//! deployments and the in-memory store for local runs and tests.

pub mod memory_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use memory_store::MemoryKeyValueStore;
pub use redis_client::RedisClient;
