//! One-time password issuance outcome.
//!
//! Codes themselves are never persisted as entities; they live in the
//! key-value store under `<prefix>:<identifier>` until they are consumed
//! or expire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of decimal digits in a code
pub const CODE_LENGTH: usize = 6;

/// Lifetime of a code in seconds (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Result of a successful issuance. The code is deliberately absent:
/// it only ever travels to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpIssueResult {
    pub identifier: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in_seconds: u64,
}
