//! Notifier that writes messages to the log instead of sending them

use std::sync::Mutex;

use async_trait::async_trait;

use am_core::services::Notifier;
use am_shared::utils::masking::mask_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Local-development notifier
///
/// Every message is logged at info level and kept in memory, so a developer
/// (or a test) can read back the code that would have been mailed.
#[derive(Default)]
pub struct ConsoleNotifier {
    delivered: Mutex<Vec<DeliveredMessage>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<DeliveredMessage> {
        self.delivered.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Most recent message sent to `recipient`
    pub fn last_message_for(&self, recipient: &str) -> Option<DeliveredMessage> {
        self.delivered
            .lock()
            .ok()?
            .iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .cloned()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), String> {
        tracing::info!(
            to = %mask_email(recipient),
            subject,
            body,
            event = "email_logged",
            "Email delivery skipped (console backend)"
        );

        self.delivered
            .lock()
            .map_err(|_| "console notifier lock poisoned".to_string())?
            .push(DeliveredMessage {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
