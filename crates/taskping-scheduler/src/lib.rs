//! # TaskPing Scheduler
//!
//! Drives the reminder dispatcher: one tokio interval per configured
//! schedule, each firing `dispatch` with its own key. Tokio timers only —
//! zero overhead while idle, no cron syntax. Every fire is an independent
//! dispatcher invocation; the dispatcher itself holds no mutable state, so
//! overlapping schedules need no locking.

use std::sync::Arc;
use std::time::Duration;

use taskping_core::config::ScheduleConfig;
use taskping_reminder::ReminderDispatcher;

/// Run all schedule loops until the process is stopped.
pub async fn run_schedules(dispatcher: Arc<ReminderDispatcher>, schedules: Vec<ScheduleConfig>) {
    if schedules.is_empty() {
        tracing::warn!("⚠️ No schedules configured, nothing to do");
        return;
    }

    let mut handles = Vec::with_capacity(schedules.len());
    for schedule in schedules {
        let dispatcher = dispatcher.clone();
        handles.push(tokio::spawn(async move {
            tracing::info!(
                "⏰ Schedule '{}' started (every {}s)",
                schedule.key,
                schedule.every_secs
            );
            let mut interval = tokio::time::interval(Duration::from_secs(schedule.every_secs.max(1)));
            // The first interval tick completes immediately; consume it so a
            // restart does not instantly re-mail everyone.
            interval.tick().await;
            loop {
                interval.tick().await;
                match dispatcher.dispatch(&schedule.key).await {
                    Ok(report) => {
                        if report.sent > 0 || !report.skipped.is_empty() {
                            tracing::info!(
                                "📤 Schedule '{}': {} sent, {} skipped",
                                schedule.key,
                                report.sent,
                                report.skipped.len()
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!("Dispatch failed for schedule '{}': {e}", schedule.key);
                    }
                }
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use taskping_core::error::Result;
    use taskping_core::traits::{MailTransport, TaskRepository};
    use taskping_core::types::{OutgoingEmail, Task};

    struct OneTaskRepo;

    #[async_trait]
    impl TaskRepository for OneTaskRepo {
        async fn find_open_by_schedule(&self, schedule: &str) -> Result<Vec<Task>> {
            Ok(vec![Task::new("t", schedule, "a@x.com")])
        }
    }

    struct CountingMailer {
        batches: Mutex<usize>,
    }

    #[async_trait]
    impl MailTransport for CountingMailer {
        fn create_message(
            &self,
            to: &str,
            subject: &str,
            html_body: &str,
        ) -> Result<OutgoingEmail> {
            Ok(OutgoingEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                html_body: html_body.to_string(),
            })
        }

        async fn send_batch(&self, _emails: Vec<OutgoingEmail>) -> Result<()> {
            *self.batches.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_per_interval_not_at_startup() {
        let mailer = Arc::new(CountingMailer {
            batches: Mutex::new(0),
        });
        let dispatcher = Arc::new(ReminderDispatcher::new(
            Arc::new(OneTaskRepo),
            mailer.clone(),
        ));
        let schedules = vec![ScheduleConfig {
            key: "daily".into(),
            every_secs: 60,
        }];

        tokio::spawn(run_schedules(dispatcher, schedules));
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(*mailer.batches.lock().unwrap(), 0, "no fire at startup");

        tokio::time::advance(Duration::from_secs(61)).await;
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(*mailer.batches.lock().unwrap(), 1);
    }
}
