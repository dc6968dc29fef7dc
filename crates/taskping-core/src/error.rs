//! TaskPing error type.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum TaskPingError {
    /// Configuration load/parse failure.
    #[error("config error: {0}")]
    Config(String),

    /// Task lookup or store failure. Fatal for a dispatch run.
    #[error("repository error: {0}")]
    Repository(String),

    /// Mail transport failure: message construction or batch delivery.
    #[error("mail error: {0}")]
    Mail(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaskPingError>;
