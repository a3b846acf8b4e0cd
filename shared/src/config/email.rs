//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// How OTP messages leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    #[default]
    Smtp,
    /// Log messages instead of sending them
    Console,
}

impl std::str::FromStr for EmailBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailBackend::Smtp),
            "console" => Ok(EmailBackend::Console),
            _ => Err(format!("Invalid email backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub backend: EmailBackend,

    pub smtp_host: String,

    /// 465 uses implicit TLS, anything else upgrades with STARTTLS
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: String,

    #[serde(default)]
    pub smtp_password: String,

    /// Sender address
    pub from_address: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            backend: EmailBackend::default(),
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 465,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::from("no-reply@automarket.local"),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let smtp_username = std::env::var("SMTP_USERNAME").unwrap_or(defaults.smtp_username);
        let from_address = std::env::var("SMTP_FROM")
            .ok()
            .or_else(|| (!smtp_username.is_empty()).then(|| smtp_username.clone()))
            .unwrap_or(defaults.from_address);

        Self {
            backend: super::env_or("EMAIL_BACKEND", defaults.backend),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: super::env_or("SMTP_PORT", defaults.smtp_port),
            smtp_username,
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.smtp_password),
            from_address,
            timeout_secs: super::env_or("SMTP_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }

    pub fn uses_implicit_tls(&self) -> bool {
        self.smtp_port == 465
    }
}

fn default_timeout_secs() -> u64 {
    10
}
