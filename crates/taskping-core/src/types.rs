//! Task data model and prepared mail messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tracked task.
///
/// Tasks are created and completed through the store; the reminder pipeline
/// only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier (uuid v4).
    pub id: String,
    /// Task name, shown verbatim in reminder mails.
    pub name: String,
    /// Optional due date. Drives the per-recipient reminder filter.
    pub due_date: Option<DateTime<Utc>>,
    /// Completed tasks never appear in reminders.
    pub done: bool,
    /// Opaque cadence key linking the task to a reminder schedule.
    pub schedule: String,
    /// E-mail address of the task owner.
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task.
    pub fn new(name: &str, schedule: &str, user_email: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            due_date: None,
            done: false,
            schedule: schedule.to_string(),
            user_email: user_email.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Set a due date (builder-style, used by the CLI and tests).
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }
}

/// A prepared, transport-validated message awaiting batch delivery.
///
/// Constructed by [`crate::traits::MailTransport::create_message`]; the
/// recipient address has already been accepted by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}
