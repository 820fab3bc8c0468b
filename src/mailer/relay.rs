use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::{MailError, Mailer, validate_recipient};
use crate::constants::MAIL_TIMEOUT_SECS;

/// Mailer posting JSON messages to an HTTP mail relay
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    from: String,
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(endpoint: String, token: Option<String>, from: String) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(MAIL_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token,
            from,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_email(&self, subject: &str, body: &str, recipient: &str) -> Result<(), MailError> {
        validate_recipient(recipient)?;

        let payload = OutgoingEmail {
            from: &self.from,
            to: [recipient.trim()],
            subject,
            text: body,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        debug!("Mail relay accepted email to {} ({})", recipient, status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_posts_json_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({
                "from": "noreply@example.com",
                "to": ["alice@example.com"],
                "subject": "Happy Birthday, alice!",
                "text": "Dear alice"
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(
            format!("{}/send", server.uri()),
            Some("secret".to_string()),
            "noreply@example.com".to_string(),
        )
        .unwrap();

        mailer
            .send_email("Happy Birthday, alice!", "Dear alice", "alice@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_relay_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unknown recipient"))
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(server.uri(), None, "noreply@example.com".to_string()).unwrap();
        let result = mailer.send_email("Subject", "Body", "ghost@example.com").await;

        match result {
            Err(MailError::Rejected { status, detail }) => {
                assert_eq!(status, 422);
                assert_eq!(detail, "unknown recipient");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_recipient_never_reaches_relay() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(server.uri(), None, "noreply@example.com".to_string()).unwrap();
        let result = mailer.send_email("Subject", "Body", "not-an-address").await;

        assert!(matches!(result, Err(MailError::InvalidRecipient(_))));
    }
}
