//! # TaskPing Core
//!
//! Shared foundation for the TaskPing workspace: the task data model, the
//! configuration system, the error type, and the traits the reminder
//! pipeline's collaborators implement.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::TaskPingConfig;
pub use error::{Result, TaskPingError};
pub use traits::{MailTransport, TaskRepository};
pub use types::{OutgoingEmail, Task};
