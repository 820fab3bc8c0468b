/// Outgoing email through an external relay
mod dry_run;
mod relay;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use dry_run::LogMailer;
pub use relay::HttpMailer;

use crate::config::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid recipient address '{0}'")]
    InvalidRecipient(String),
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail relay rejected message ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

/// Notification service used by the birthday mailer
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, subject: &str, body: &str, recipient: &str) -> Result<(), MailError>;
}

/// Reject addresses that cannot possibly be delivered
pub fn validate_recipient(recipient: &str) -> Result<(), MailError> {
    let trimmed = recipient.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(MailError::InvalidRecipient(recipient.to_string())),
    }
}

/// Build the relay mailer, or a log-only mailer when no relay is configured
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.relay_url {
        Some(url) => Ok(Arc::new(HttpMailer::new(
            url.clone(),
            config.relay_token.clone(),
            config.from.clone(),
        )?)),
        None => Ok(Arc::new(LogMailer::new(config.from.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipient() {
        assert!(validate_recipient("alice@example.com").is_ok());
        assert!(validate_recipient(" bob@example.org ").is_ok());

        assert!(validate_recipient("").is_err());
        assert!(validate_recipient("no-at-sign").is_err());
        assert!(validate_recipient("@example.com").is_err());
        assert!(validate_recipient("alice@").is_err());
    }
}
