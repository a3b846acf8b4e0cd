//! SMTP notifier built on lettre's async transport

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info};

use am_core::services::Notifier;
use am_shared::config::EmailConfig;
use am_shared::utils::masking::mask_email;

use crate::InfrastructureError;

/// Sends plain-text mail through an authenticated SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        // Port 465 speaks TLS from the first byte; other ports upgrade via STARTTLS
        let builder = if config.uses_implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?;

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            implicit_tls = config.uses_implicit_tls(),
            "SMTP notifier configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

pub(crate) fn build_message(
    from: &Mailbox,
    recipient: &str,
    subject: &str,
    body: &str,
) -> Result<Message, InfrastructureError> {
    let to: Mailbox = recipient
        .parse()
        .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), String> {
        let message = build_message(&self.from, recipient, subject, body).map_err(|e| e.to_string())?;
        debug!(to = %mask_email(recipient), "Sending email");

        self.transport.send(message).await.map_err(|e| {
            error!(to = %mask_email(recipient), error = %e, "SMTP delivery failed");
            format!("SMTP delivery failed: {}", e)
        })?;

        info!(to = %mask_email(recipient), event = "email_sent", "Email sent");
        Ok(())
    }
}
