//! # TaskPing Reminder
//!
//! The reminder pipeline: on each firing of a schedule, fetch that schedule's
//! open tasks, partition them per owner, narrow each owner's list to due-dated
//! tasks when any exist, render one HTML digest per owner, and hand the whole
//! set to the mail transport in a single batch call.
//!
//! ```text
//! dispatch(schedule_key)
//!   ├── repository: open tasks for key        (empty → done, no mail call)
//!   ├── group by owner e-mail                 (stable, first-seen order)
//!   ├── per group: due-date filter            (independent per owner)
//!   ├── per group: render <ul> digest
//!   └── transport: send_batch(all messages)   (one call per run)
//! ```

pub mod dispatch;
pub mod render;

pub use dispatch::{DispatchReport, RecipientGroup, ReminderDispatcher, SkippedRecipient};
pub use render::{REMINDER_SUBJECT, render_task_list};
