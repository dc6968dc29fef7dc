//! The reminder dispatcher — one linear pipeline per schedule firing.

use std::collections::HashMap;
use std::sync::Arc;

use taskping_core::error::Result;
use taskping_core::traits::{MailTransport, TaskRepository};
use taskping_core::types::Task;

use crate::render::{REMINDER_SUBJECT, render_task_list};

/// All open tasks of one recipient, in repository order.
#[derive(Debug, Clone)]
pub struct RecipientGroup {
    pub email: String,
    pub tasks: Vec<Task>,
}

/// A recipient dropped from a run because the transport rejected the message.
#[derive(Debug, Clone)]
pub struct SkippedRecipient {
    pub email: String,
    pub reason: String,
}

/// Outcome of one dispatch run.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Messages handed to the transport batch.
    pub sent: usize,
    /// Recipients whose message could not be built.
    pub skipped: Vec<SkippedRecipient>,
}

/// Orchestrates one reminder run: fetch → group → filter → render → batch-send.
///
/// Holds no mutable state; every run builds and discards its own groups, so a
/// shared `Arc<ReminderDispatcher>` can serve concurrently firing schedules.
pub struct ReminderDispatcher {
    repo: Arc<dyn TaskRepository>,
    mailer: Arc<dyn MailTransport>,
}

impl ReminderDispatcher {
    pub fn new(repo: Arc<dyn TaskRepository>, mailer: Arc<dyn MailTransport>) -> Self {
        Self { repo, mailer }
    }

    /// Run the pipeline for one schedule key.
    ///
    /// A failed lookup or a failed batch send propagates to the caller. A
    /// message the transport refuses to build is logged, recorded in the
    /// report, and does not stop the remaining recipients from being sent.
    pub async fn dispatch(&self, schedule: &str) -> Result<DispatchReport> {
        let tasks = self.repo.find_open_by_schedule(schedule).await?;
        if tasks.is_empty() {
            return Ok(DispatchReport::default());
        }

        let groups = filter_due_dated(group_by_recipient(tasks));

        let mut emails = Vec::with_capacity(groups.len());
        let mut skipped = Vec::new();
        for group in &groups {
            let body = render_task_list(&group.tasks);
            match self.mailer.create_message(&group.email, REMINDER_SUBJECT, &body) {
                Ok(email) => emails.push(email),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping reminder for {}: {e}", group.email);
                    skipped.push(SkippedRecipient {
                        email: group.email.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let sent = emails.len();
        self.mailer.send_batch(emails).await?;
        tracing::debug!("📤 Reminder batch sent for schedule '{schedule}' ({sent} message(s))");
        Ok(DispatchReport { sent, skipped })
    }
}

/// Partition tasks by owner e-mail.
///
/// Stable: recipients appear in the order their first task appears, each
/// exactly once; within a group, tasks keep their input order.
pub fn group_by_recipient(tasks: Vec<Task>) -> Vec<RecipientGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<RecipientGroup> = Vec::new();
    for task in tasks {
        match index.get(&task.user_email) {
            Some(&at) => groups[at].tasks.push(task),
            None => {
                index.insert(task.user_email.clone(), groups.len());
                groups.push(RecipientGroup {
                    email: task.user_email.clone(),
                    tasks: vec![task],
                });
            }
        }
    }
    groups
}

/// Apply the due-date rule to each group independently.
///
/// If any task in a group carries a due date, only due-dated tasks survive;
/// a group with no due dates at all is kept whole. Consumes the input and
/// builds fresh groups rather than editing in place.
pub fn filter_due_dated(groups: Vec<RecipientGroup>) -> Vec<RecipientGroup> {
    groups
        .into_iter()
        .map(|group| {
            if group.tasks.iter().any(|t| t.due_date.is_some()) {
                RecipientGroup {
                    email: group.email,
                    tasks: group
                        .tasks
                        .into_iter()
                        .filter(|t| t.due_date.is_some())
                        .collect(),
                }
            } else {
                group
            }
        })
        .collect()
}
