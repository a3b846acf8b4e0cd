//! Configuration for the OTP service

use am_shared::config::OtpConfig;

use crate::domain::entities::otp::{CODE_LENGTH, DEFAULT_TTL_SECONDS};

#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of decimal digits in a code
    pub code_length: usize,
    /// Seconds until a stored code expires
    pub ttl_seconds: u64,
    /// Key namespace in the store
    pub key_prefix: String,
    /// Subject line of the delivery message
    pub subject: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            key_prefix: "otp".to_string(),
            subject: "Your OTP Code".to_string(),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl_seconds: config.ttl_seconds,
            key_prefix: config.key_prefix.clone(),
            subject: config.subject.clone(),
        }
    }
}
