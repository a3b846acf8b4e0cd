//! One-time password issuance and verification for password resets
//!
//! Codes live in a [`KeyValueStore`] under `<prefix>:<identifier>` with a fixed
//! TTL and reach the user through a [`Notifier`]. Issuing overwrites any
//! previous code for the identifier; a successful verification consumes it.

mod config;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OtpServiceConfig;
pub use service::{otp_key, OtpService};
pub use traits::{KeyValueStore, Notifier};
