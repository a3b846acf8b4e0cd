use std::sync::Arc;
use std::time::Duration;

use am_core::services::KeyValueStore;

use crate::cache::MemoryKeyValueStore;

#[tokio::test]
async fn test_set_get_delete() {
    let store = MemoryKeyValueStore::new();
    store.set_with_expiry("otp:a@example.com", "123456", 300).await.unwrap();

    assert_eq!(store.get("otp:a@example.com").await.unwrap().as_deref(), Some("123456"));
    assert!(store.delete("otp:a@example.com").await.unwrap());
    assert!(!store.delete("otp:a@example.com").await.unwrap());
    assert_eq!(store.get("otp:a@example.com").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_replaces_previous_value() {
    let store = MemoryKeyValueStore::new();
    store.set_with_expiry("k", "first", 300).await.unwrap();
    store.set_with_expiry("k", "second", 300).await.unwrap();

    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let store = MemoryKeyValueStore::new();
    store.set_with_expiry("k", "v", 300).await.unwrap();

    tokio::time::advance(Duration::from_secs(299)).await;
    assert!(store.get("k").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(store.get("k").await.unwrap().is_none());
    assert!(!store.delete("k").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_delete_has_single_winner() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set_with_expiry("k", "v", 300).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.delete("k").await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test(start_paused = true)]
async fn test_writes_sweep_expired_entries() {
    let store = MemoryKeyValueStore::new();
    store.set_with_expiry("otp:a@example.com", "111111", 300).await.unwrap();
    store.set_with_expiry("otp:b@example.com", "222222", 300).await.unwrap();
    assert_eq!(store.stored().await, 2);

    tokio::time::advance(Duration::from_secs(301)).await;
    store.set_with_expiry("otp:c@example.com", "333333", 300).await.unwrap();

    assert_eq!(store.stored().await, 1);
    assert_eq!(store.get("otp:c@example.com").await.unwrap().as_deref(), Some("333333"));
}
