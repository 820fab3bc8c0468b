use async_trait::async_trait;
use tracing::info;

use super::{MailError, Mailer, validate_recipient};

/// Dry-run mailer: logs each email instead of sending it
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_email(&self, subject: &str, body: &str, recipient: &str) -> Result<(), MailError> {
        validate_recipient(recipient)?;
        info!(
            from = %self.from,
            to = %recipient,
            subject = %subject,
            "No mail relay configured, email not sent:\n{}",
            body
        );
        Ok(())
    }
}
