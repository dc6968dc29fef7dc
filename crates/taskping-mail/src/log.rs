//! Log-only transport for dry runs — builds and "delivers" without network.

use async_trait::async_trait;

use taskping_core::error::Result;
use taskping_core::traits::MailTransport;
use taskping_core::types::OutgoingEmail;

/// Accepts every message and logs it instead of sending.
pub struct LogMailer;

#[async_trait]
impl MailTransport for LogMailer {
    fn create_message(&self, to: &str, subject: &str, html_body: &str) -> Result<OutgoingEmail> {
        Ok(OutgoingEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        })
    }

    async fn send_batch(&self, emails: Vec<OutgoingEmail>) -> Result<()> {
        tracing::info!("📧 [dry-run] batch of {} message(s)", emails.len());
        for email in &emails {
            tracing::info!(
                "📧 [dry-run] to={} subject={:?} body={}",
                email.to,
                email.subject,
                email.html_body
            );
        }
        Ok(())
    }
}
