//! # TaskPing Mail
//!
//! [`taskping_core::traits::MailTransport`] backends: async SMTP via lettre
//! for real delivery, and a log-only transport for dry runs.

pub mod log;
pub mod smtp;

pub use log::LogMailer;
pub use smtp::SmtpMailer;
