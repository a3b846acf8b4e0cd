//! OTP service implementation

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::sync::Arc;

use am_shared::utils::masking::mask_email;

use crate::domain::entities::otp::OtpIssueResult;
use crate::errors::{DomainResult, OtpError};
use crate::repositories::UserRepository;

use super::config::OtpServiceConfig;
use super::traits::{KeyValueStore, Notifier};

/// Store key for the code bound to `identifier`
pub fn otp_key(prefix: &str, identifier: &str) -> String {
    format!("{}:{}", prefix, identifier)
}

pub struct OtpService {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    users: Arc<dyn UserRepository>,
    config: OtpServiceConfig,
}

impl OtpService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        users: Arc<dyn UserRepository>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            users,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a fresh code for the account registered under `identifier`.
    ///
    /// The code is stored before delivery is attempted. When delivery fails the
    /// stored code stays valid and `OtpError::DeliveryFailed` is returned; the
    /// next issuance overwrites it.
    ///
    /// # Errors
    ///
    /// * `OtpError::NotFound` - no account uses this identifier
    /// * `OtpError::Store` - the key-value store rejected the write
    /// * `OtpError::DeliveryFailed` - the notifier could not send the code
    pub async fn issue(&self, identifier: &str) -> DomainResult<OtpIssueResult> {
        let masked = mask_email(identifier);

        if self.users.find_by_email(identifier).await?.is_none() {
            tracing::warn!(
                identifier = %masked,
                event = "otp_unknown_account",
                "OTP requested for an identifier with no account"
            );
            return Err(OtpError::NotFound {
                identifier: identifier.to_string(),
            }
            .into());
        }

        let code = generate_code(self.config.code_length);
        let key = otp_key(&self.config.key_prefix, identifier);

        self.store
            .set_with_expiry(&key, &code, self.config.ttl_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %masked,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store OTP"
                );
                OtpError::Store { message: e }
            })?;

        tracing::info!(
            identifier = %masked,
            ttl_seconds = self.config.ttl_seconds,
            event = "otp_issued",
            "Issued OTP"
        );

        let body = format!(
            "Your OTP code is: {}. It will expire in {}.",
            code,
            expiry_phrase(self.config.ttl_seconds)
        );
        if let Err(e) = self
            .notifier
            .send(identifier, &self.config.subject, &body)
            .await
        {
            tracing::error!(
                identifier = %masked,
                error = %e,
                event = "otp_delivery_failed",
                "Failed to deliver OTP; stored code left in place"
            );
            return Err(OtpError::DeliveryFailed { reason: e }.into());
        }

        Ok(OtpIssueResult {
            identifier: identifier.to_string(),
            expires_at: Utc::now() + Duration::seconds(self.config.ttl_seconds as i64),
            expires_in_seconds: self.config.ttl_seconds,
        })
    }

    /// Check `code` against the stored code and consume it on a match.
    ///
    /// A mismatch leaves the stored code untouched so the user may retry until
    /// the TTL runs out.
    ///
    /// # Errors
    ///
    /// * `OtpError::NotFoundOrExpired` - nothing stored (never issued, consumed or expired)
    /// * `OtpError::InvalidCode` - the code does not match
    /// * `OtpError::Store` - the key-value store failed
    pub async fn verify(&self, identifier: &str, code: &str) -> DomainResult<()> {
        let masked = mask_email(identifier);
        let key = otp_key(&self.config.key_prefix, identifier);

        let stored = self.store.get(&key).await.map_err(|e| {
            tracing::error!(identifier = %masked, error = %e, "Failed to read OTP");
            OtpError::Store { message: e }
        })?;

        let Some(stored) = stored else {
            tracing::warn!(
                identifier = %masked,
                event = "otp_not_found",
                "OTP verification without an active code"
            );
            return Err(OtpError::NotFoundOrExpired.into());
        };

        if !constant_time_eq(stored.as_bytes(), code.as_bytes()) {
            tracing::warn!(
                identifier = %masked,
                event = "otp_mismatch",
                "OTP verification failed"
            );
            return Err(OtpError::InvalidCode.into());
        }

        // A concurrent verification may have consumed the key between GET and DEL
        let deleted = self.store.delete(&key).await.map_err(|e| {
            tracing::error!(identifier = %masked, error = %e, "Failed to consume OTP");
            OtpError::Store { message: e }
        })?;
        if !deleted {
            return Err(OtpError::NotFoundOrExpired.into());
        }

        tracing::info!(
            identifier = %masked,
            event = "otp_verified",
            "OTP verified and consumed"
        );
        Ok(())
    }
}

/// Code of `length` independently drawn decimal digits from the OS CSPRNG
fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn expiry_phrase(ttl_seconds: u64) -> String {
    match ttl_seconds {
        60 => "1 minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{} seconds", s),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_digits_of_requested_length() {
        for _ in 0..100 {
            let code = generate_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_every_digit_appears() {
        let mut seen = [false; 10];
        for _ in 0..200 {
            for c in generate_code(6).chars() {
                seen[c.to_digit(10).unwrap() as usize] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_expiry_phrase() {
        assert_eq!(expiry_phrase(300), "5 minutes");
        assert_eq!(expiry_phrase(60), "1 minute");
        assert_eq!(expiry_phrase(90), "90 seconds");
    }

    #[test]
    fn test_key_format() {
        assert_eq!(otp_key("otp", "a@b.com"), "otp:a@b.com");
    }
}
