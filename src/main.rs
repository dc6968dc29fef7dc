//! # TaskPing — task reminders by mail
//!
//! Tracks small tasks and, on each configured schedule, mails every owner an
//! HTML digest of their remaining tasks.
//!
//! Usage:
//!   taskping add "Buy milk" --email b@x.com --schedule daily
//!   taskping list
//!   taskping done <id>
//!   taskping remind daily              # one reminder run, then exit
//!   taskping run                       # start the schedule loop
//!   taskping --dry-run remind daily    # log instead of SMTP

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskping_core::config::TaskPingConfig;
use taskping_core::traits::MailTransport;
use taskping_core::types::Task;
use taskping_db::TaskDb;
use taskping_mail::{LogMailer, SmtpMailer};
use taskping_reminder::ReminderDispatcher;

#[derive(Parser)]
#[command(
    name = "taskping",
    version,
    about = "📬 TaskPing — mails each task owner a digest of their remaining tasks"
)]
struct Cli {
    /// Config file (default: ~/.taskping/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Log reminder mails instead of sending via SMTP
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the reminder schedule loop
    Run,
    /// Fire one reminder run for a schedule key and exit
    Remind { key: String },
    /// Add a task
    Add {
        name: String,
        /// Owner e-mail address
        #[arg(short, long)]
        email: String,
        /// Schedule key the task belongs to
        #[arg(short, long, default_value = "daily")]
        schedule: String,
        /// Due date, RFC 3339 (e.g. 2026-09-01T00:00:00Z)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List all tasks
    List,
    /// Mark a task completed
    Done { id: String },
}

fn expand_path(p: &str) -> String {
    shellexpand::tilde(p).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "taskping=debug"
    } else {
        "taskping=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => TaskPingConfig::load_from(Path::new(&expand_path(path)))?,
        None => TaskPingConfig::load()?,
    };

    let db_path = expand_path(&config.db_path);
    let db = Arc::new(TaskDb::open(Path::new(&db_path))?);

    match cli.command {
        Command::Add {
            name,
            email,
            schedule,
            due,
        } => {
            let mut task = Task::new(&name, &schedule, &email);
            if let Some(due) = due {
                let parsed: DateTime<Utc> = due
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid due date '{due}': {e}"))?;
                task = task.with_due_date(parsed);
            }
            db.save_task(&task)?;
            println!("✅ Added '{}' ({})", task.name, task.id);
        }
        Command::List => {
            for task in db.list_tasks()? {
                let status = if task.done { "✔" } else { " " };
                let due = task
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "[{status}] {}  {}  due:{due}  {}  {}",
                    task.id, task.schedule, task.user_email, task.name
                );
            }
        }
        Command::Done { id } => {
            if db.mark_done(&id)? {
                println!("✅ Task {id} completed");
            } else {
                println!("⚠️  No task with id {id}");
            }
        }
        Command::Remind { key } => {
            let dispatcher = build_dispatcher(db.clone(), &config, cli.dry_run)?;
            let report = dispatcher.dispatch(&key).await?;
            println!(
                "📤 {} message(s) sent, {} recipient(s) skipped",
                report.sent,
                report.skipped.len()
            );
            for skip in &report.skipped {
                println!("   ⚠️  {}: {}", skip.email, skip.reason);
            }
        }
        Command::Run => {
            let dispatcher = Arc::new(build_dispatcher(db.clone(), &config, cli.dry_run)?);
            taskping_scheduler::run_schedules(dispatcher, config.schedules.clone()).await;
        }
    }

    Ok(())
}

/// Wire the dispatcher with its collaborators. All injection happens here;
/// nothing downstream looks collaborators up by itself.
fn build_dispatcher(
    db: Arc<TaskDb>,
    config: &TaskPingConfig,
    dry_run: bool,
) -> Result<ReminderDispatcher> {
    let mailer: Arc<dyn MailTransport> = if dry_run {
        Arc::new(LogMailer)
    } else {
        Arc::new(SmtpMailer::new(&config.smtp)?)
    };
    Ok(ReminderDispatcher::new(db, mailer))
}
