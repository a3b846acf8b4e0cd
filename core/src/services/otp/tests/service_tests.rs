//! Unit tests for the OTP service

use std::sync::Arc;

use crate::domain::entities::user::NewUser;
use crate::errors::{DomainError, OtpError};
use crate::repositories::{InMemoryUserRepository, UserRepository};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::{MockKeyValueStore, MockNotifier};

const EMAIL: &str = "a@b.com";
const KEY: &str = "otp:a@b.com";

async fn setup(
    store: MockKeyValueStore,
    notifier: MockNotifier,
) -> (OtpService, Arc<MockKeyValueStore>, Arc<MockNotifier>) {
    let users = Arc::new(InMemoryUserRepository::new());
    users
        .create(NewUser::member("ab".into(), EMAIL.into(), "hash".into()))
        .await
        .unwrap();
    let store = Arc::new(store);
    let notifier = Arc::new(notifier);
    let service = OtpService::new(
        store.clone(),
        notifier.clone(),
        users,
        OtpServiceConfig::default(),
    );
    (service, store, notifier)
}

fn otp_error(result: Result<impl std::fmt::Debug, DomainError>) -> OtpError {
    match result {
        Err(DomainError::Otp(e)) => e,
        other => panic!("Expected OTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_stores_six_digit_code_with_ttl() {
    let (service, store, notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;

    let result = service.issue(EMAIL).await.unwrap();
    assert_eq!(result.identifier, EMAIL);
    assert_eq!(result.expires_in_seconds, 300);

    let code = store.value(KEY).expect("code stored");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(store.ttl(KEY), Some(300));

    assert_eq!(notifier.last_code_for(EMAIL), Some(code));
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent[0].subject, "Your OTP Code");
    assert!(sent[0].body.ends_with("It will expire in 5 minutes."));
}

#[tokio::test]
async fn test_issue_unknown_account_is_not_found() {
    let (service, store, notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;

    let error = otp_error(service.issue("nobody@b.com").await);
    assert!(matches!(error, OtpError::NotFound { .. }));
    assert!(store.entries.lock().unwrap().is_empty());
    assert_eq!(notifier.call_count(), 0);
}

#[tokio::test]
async fn test_delivery_failure_keeps_stored_code() {
    let (service, store, notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(true)).await;

    let error = otp_error(service.issue(EMAIL).await);
    assert!(matches!(error, OtpError::DeliveryFailed { .. }));
    assert_eq!(notifier.call_count(), 1);

    let code = store.value(KEY).expect("code kept after failed delivery");
    service.verify(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let (service, _store, notifier) = setup(MockKeyValueStore::failing(), MockNotifier::new(false)).await;

    let error = otp_error(service.issue(EMAIL).await);
    assert!(matches!(error, OtpError::Store { .. }));
    assert_eq!(notifier.call_count(), 0);
}

#[tokio::test]
async fn test_verify_without_issue_is_not_found_or_expired() {
    let (service, _store, _notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;

    let error = otp_error(service.verify(EMAIL, "123456").await);
    assert_eq!(error, OtpError::NotFoundOrExpired);
}

#[tokio::test]
async fn test_verify_after_expiry_is_not_found_or_expired() {
    let (service, store, _notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;
    service.issue(EMAIL).await.unwrap();
    let code = store.value(KEY).unwrap();

    store.expire(KEY);

    let error = otp_error(service.verify(EMAIL, &code).await);
    assert_eq!(error, OtpError::NotFoundOrExpired);
}

#[tokio::test]
async fn test_code_verifies_exactly_once() {
    let (service, store, _notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;
    service.issue(EMAIL).await.unwrap();
    let code = store.value(KEY).unwrap();

    service.verify(EMAIL, &code).await.unwrap();
    assert!(store.value(KEY).is_none());

    let error = otp_error(service.verify(EMAIL, &code).await);
    assert_eq!(error, OtpError::NotFoundOrExpired);
}

#[tokio::test]
async fn test_wrong_code_does_not_consume() {
    let (service, store, _notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;
    service.issue(EMAIL).await.unwrap();
    let code = store.value(KEY).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let error = otp_error(service.verify(EMAIL, wrong).await);
    assert_eq!(error, OtpError::InvalidCode);
    assert_eq!(store.value(KEY), Some(code.clone()));

    service.verify(EMAIL, &code).await.unwrap();
    assert!(store.value(KEY).is_none());
}

#[tokio::test]
async fn test_second_issue_invalidates_first_code() {
    let (service, store, _notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;

    service.issue(EMAIL).await.unwrap();
    let first = store.value(KEY).unwrap();
    // Force a different second code so the assertion is deterministic
    let mut second = first.clone();
    while second == first {
        service.issue(EMAIL).await.unwrap();
        second = store.value(KEY).unwrap();
    }

    let error = otp_error(service.verify(EMAIL, &first).await);
    assert_eq!(error, OtpError::InvalidCode);
    service.verify(EMAIL, &second).await.unwrap();
}

#[tokio::test]
async fn test_verify_uses_exact_comparison() {
    let (service, store, _notifier) = setup(MockKeyValueStore::new(), MockNotifier::new(false)).await;
    service.issue(EMAIL).await.unwrap();
    let code = store.value(KEY).unwrap();

    let padded = format!(" {}", code);
    assert_eq!(otp_error(service.verify(EMAIL, &padded).await), OtpError::InvalidCode);
    assert_eq!(otp_error(service.verify(EMAIL, &code[..5]).await), OtpError::InvalidCode);
    service.verify(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_custom_prefix_and_ttl() {
    let users = Arc::new(InMemoryUserRepository::new());
    users
        .create(NewUser::member("ab".into(), EMAIL.into(), "hash".into()))
        .await
        .unwrap();
    let store = Arc::new(MockKeyValueStore::new());
    let config = OtpServiceConfig {
        ttl_seconds: 120,
        key_prefix: "reset".into(),
        ..Default::default()
    };
    let service = OtpService::new(store.clone(), Arc::new(MockNotifier::new(false)), users, config);

    service.issue(EMAIL).await.unwrap();
    assert_eq!(store.ttl("reset:a@b.com"), Some(120));
}
