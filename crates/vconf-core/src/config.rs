//! Framework configuration
//!
//! Configuration is read from TOML and may be overridden from the
//! environment:
//!
//! ```toml
//! [executor]
//! worker_count = 8
//!
//! [logging]
//! profile = "production"
//! ```
//!
//! | Variable | Overrides |
//! |---|---|
//! | `VCONF_WORKER_COUNT` | `executor.worker_count` |
//! | `VCONF_LOG_PROFILE` | `logging.profile` |

use crate::errors::{ComplianceError, Result};
use crate::logging_facility::Profile;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_WORKER_COUNT: &str = "VCONF_WORKER_COUNT";
pub const ENV_LOG_PROFILE: &str = "VCONF_LOG_PROFILE";

/// Upper bound on the derived default worker count
pub const MAX_DEFAULT_WORKERS: usize = 32;

/// Default pool size: `min(32, cpus + 4)`.
///
/// Per-host work is dominated by waiting on remote APIs, so the pool is sized
/// above the core count.
pub fn default_worker_count() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(MAX_DEFAULT_WORKERS)
}

/// Task executor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Worker threads in the pool built on first use
    pub worker_count: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
        }
    }
}

impl ExecutorConfig {
    pub fn with_worker_count(worker_count: usize) -> Self {
        Self { worker_count }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

/// Top-level framework configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    pub executor: ExecutorConfig,
    pub logging: LoggingConfig,
}

impl FrameworkConfig {
    /// Parse and validate a TOML document. Missing sections take defaults.
    ///
    /// # Errors
    ///
    /// - `ConfigParse`: the text is not valid TOML for this schema
    /// - `InvalidConfig`: a value fails validation
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: FrameworkConfig =
            toml::from_str(text).map_err(|e| ComplianceError::ConfigParse {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// - `ConfigRead`: the file cannot be read
    /// - `ConfigParse` / `InvalidConfig`: see [`FrameworkConfig::from_toml_str`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ComplianceError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: an override variable holds an unusable value
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `VCONF_*` environment overrides.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: an override variable holds an unusable value
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides resolved through `lookup` (keyed by variable name).
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: an override holds an unusable value
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_WORKER_COUNT) {
            self.executor.worker_count = raw.trim().parse::<usize>().map_err(|e| {
                ComplianceError::InvalidConfig {
                    field: ENV_WORKER_COUNT.to_string(),
                    reason: format!("`{}` is not a worker count: {}", raw, e),
                }
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_PROFILE) {
            self.logging.profile =
                raw.parse::<Profile>()
                    .map_err(|reason| ComplianceError::InvalidConfig {
                        field: ENV_LOG_PROFILE.to_string(),
                        reason,
                    })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// - `InvalidConfig`: `executor.worker_count` is zero
    pub fn validate(&self) -> Result<()> {
        if self.executor.worker_count == 0 {
            return Err(ComplianceError::InvalidConfig {
                field: "executor.worker_count".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
