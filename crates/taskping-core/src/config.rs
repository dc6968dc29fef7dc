//! TaskPing configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskPingError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPingConfig {
    /// Path to the SQLite task database.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Reminder schedules. Each entry fires independently.
    #[serde(default)]
    pub schedules: Vec<ScheduleConfig>,
}

fn default_db_path() -> String {
    "~/.taskping/tasks.db".into()
}

impl Default for TaskPingConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            smtp: SmtpConfig::default(),
            schedules: Vec::new(),
        }
    }
}

impl TaskPingConfig {
    /// Load config from the default path (~/.taskping/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TaskPingError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| TaskPingError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| TaskPingError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the TaskPing home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".taskping")
    }
}

/// SMTP delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// From address for all reminder mails.
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub sender_name: Option<String>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}
fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            sender: String::new(),
            sender_name: None,
        }
    }
}

/// One reminder cadence: an opaque key plus a fixed firing interval.
///
/// Cron expressions are deliberately not supported; the key is just the
/// value tasks are tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub key: String,
    #[serde(default = "default_every_secs")]
    pub every_secs: u64,
}

fn default_every_secs() -> u64 {
    86400
}
