//! Core configuration.
//!
//! # Responsibility
//! - Collect tunables for logging, snapshot storage and due-date windows.
//! - Parse them from JSON with defaults for every missing field.
//!
//! # Invariants
//! - A normalized config always has a supported log level, a non-blank
//!   snapshot key and `due_soon_days` within `0..=MAX_DUE_SOON_DAYS`.

use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use crate::query::due::DEFAULT_DUE_SOON_DAYS;
use crate::repo::snapshot_repo::DEFAULT_SNAPSHOT_KEY;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MAX_DUE_SOON_DAYS: u32 = 30;

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Logging(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

/// Tunables for one task-list core instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    pub log_level: String,
    /// Key under which the task snapshot is stored.
    pub snapshot_key: String,
    /// Days-left window classified as "due soon".
    pub due_soon_days: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
        }
    }
}

impl CoreConfig {
    /// Parses and normalizes a JSON config document.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or wrongly typed fields.
    /// - `Logging` for an unsupported `logLevel`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.normalized()
    }

    /// Canonicalizes the level, defaults a blank key and clamps the window.
    pub fn normalized(self) -> Result<Self, ConfigError> {
        let log_level = normalize_level(&self.log_level).map_err(ConfigError::Logging)?;
        Ok(Self {
            log_level: log_level.to_string(),
            snapshot_key: self.effective_snapshot_key().to_string(),
            due_soon_days: self.effective_due_soon_days(),
        })
    }

    /// Trimmed snapshot key, or the default key when blank.
    pub fn effective_snapshot_key(&self) -> &str {
        match self.snapshot_key.trim() {
            "" => DEFAULT_SNAPSHOT_KEY,
            key => key,
        }
    }

    /// `due_soon_days` clamped to `MAX_DUE_SOON_DAYS`.
    pub fn effective_due_soon_days(&self) -> u32 {
        self.due_soon_days.min(MAX_DUE_SOON_DAYS)
    }

    /// Starts core logging at this config's level under `log_dir`.
    ///
    /// # Errors
    /// - Same as [`init_logging`].
    pub fn init_logging(&self, log_dir: &str) -> Result<(), LoggingError> {
        init_logging(&self.log_level, log_dir)
    }
}
