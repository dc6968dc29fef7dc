//! Collaborator traits for the reminder pipeline.
//!
//! The dispatcher receives both collaborators through its constructor; nothing
//! is resolved through a global registry at call time.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{OutgoingEmail, Task};

/// Read-side task lookup used by the reminder pipeline.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All incomplete tasks belonging to the given schedule key.
    ///
    /// Returns an empty vec, not an error, when nothing matches. Any `Err`
    /// means the lookup itself failed and aborts the dispatch run.
    async fn find_open_by_schedule(&self, schedule: &str) -> Result<Vec<Task>>;
}

/// Outbound mail delivery.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Validate and prepare one message.
    ///
    /// A rejected recipient address or body surfaces here, per message, so a
    /// single bad recipient never poisons a whole batch.
    fn create_message(&self, to: &str, subject: &str, html_body: &str) -> Result<OutgoingEmail>;

    /// Deliver all prepared messages in one call. Accepts an empty batch.
    async fn send_batch(&self, emails: Vec<OutgoingEmail>) -> Result<()>;
}
