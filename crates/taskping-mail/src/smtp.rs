//! SMTP delivery via async lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use taskping_core::config::SmtpConfig;
use taskping_core::error::{Result, TaskPingError};
use taskping_core::traits::MailTransport;
use taskping_core::types::OutgoingEmail;

/// SMTP-backed mail transport.
///
/// One STARTTLS relay is built up front and reused across batches. SMTP has
/// no wire-level batching, so `send_batch` delivers its messages sequentially
/// over the shared relay; the batch is still the unit the caller sees.
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from_name = config.sender_name.as_deref().unwrap_or("TaskPing");
        let from: Mailbox = format!("{from_name} <{}>", config.sender)
            .parse()
            .map_err(|e| TaskPingError::Mail(format!("Invalid sender: {e}")))?;

        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| TaskPingError::Mail(format!("SMTP relay: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    fn create_message(&self, to: &str, subject: &str, html_body: &str) -> Result<OutgoingEmail> {
        // Reject bad recipients at build time so one address never sinks the
        // rest of the batch.
        let _: Mailbox = to
            .parse()
            .map_err(|e| TaskPingError::Mail(format!("Invalid recipient '{to}': {e}")))?;
        Ok(OutgoingEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        })
    }

    async fn send_batch(&self, emails: Vec<OutgoingEmail>) -> Result<()> {
        for OutgoingEmail {
            to,
            subject,
            html_body,
        } in emails
        {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|e| TaskPingError::Mail(format!("Invalid recipient '{to}': {e}")))?;
            let message = Message::builder()
                .from(self.from.clone())
                .to(mailbox)
                .subject(subject)
                .header(ContentType::TEXT_HTML)
                .body(html_body)
                .map_err(|e| TaskPingError::Mail(format!("Build email: {e}")))?;

            self.mailer
                .send(message)
                .await
                .map_err(|e| TaskPingError::Mail(format!("SMTP send: {e}")))?;
            tracing::info!("📤 Reminder mail sent to {to}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        let config = SmtpConfig {
            sender: "noreply@taskping.dev".into(),
            ..SmtpConfig::default()
        };
        SmtpMailer::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_create_message_accepts_valid_recipient() {
        let email = mailer()
            .create_message("a@x.com", "Remaining tasks", "<ul></ul>")
            .unwrap();
        assert_eq!(email.to, "a@x.com");
        assert_eq!(email.subject, "Remaining tasks");
    }

    #[tokio::test]
    async fn test_create_message_rejects_bad_recipient() {
        let err = mailer()
            .create_message("not an address", "Remaining tasks", "<ul></ul>")
            .unwrap_err();
        assert!(matches!(err, TaskPingError::Mail(_)));
    }

    #[test]
    fn test_new_rejects_bad_sender() {
        let config = SmtpConfig {
            sender: "not an address".into(),
            ..SmtpConfig::default()
        };
        assert!(SmtpMailer::new(&config).is_err());
    }
}
