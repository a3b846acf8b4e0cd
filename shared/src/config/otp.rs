//! One-time password configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of decimal digits in a code
    pub code_length: usize,

    /// Lifetime of an issued code in seconds
    pub ttl_seconds: u64,

    /// Namespace prepended to the identifier in the key-value store
    pub key_prefix: String,

    /// Subject line of the delivery message
    pub subject: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,
            key_prefix: String::from("otp"),
            subject: String::from("Your OTP Code"),
        }
    }
}

impl OtpConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: super::env_or("OTP_CODE_LENGTH", defaults.code_length),
            ttl_seconds: super::env_or("OTP_TTL_SECONDS", defaults.ttl_seconds),
            key_prefix: std::env::var("OTP_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            subject: defaults.subject,
        }
    }
}
