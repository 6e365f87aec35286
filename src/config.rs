//! User configuration: which processes distract, how often to look, and
//! where records are kept.

use crate::blacklist::StaticBlacklist;
use crate::constants::{CONFIG_FILE_NAME, DATA_DIR_ENV, DEFAULT_BLACKLIST, DEFAULT_POLL_INTERVAL};
use crate::error::{AppError, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shortest accepted poll interval; the monitoring loop must never spin.
const MIN_POLL_INTERVAL_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub blacklist: Vec<String>,
    pub poll_interval_ms: u64,
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            blacklist: DEFAULT_BLACKLIST.iter().map(ToString::to_string).collect(),
            poll_interval_ms: u64::try_from(DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(250),
            data_dir: None,
        }
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "studybuddy", "Study Buddy").ok_or(AppError::NoProjectDirs)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

impl AppConfig {
    /// Read the config file. A missing file gives the defaults; an
    /// unreadable one is logged and replaced by the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let config: Self = match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config at {}: {e}", path.display());
                return Ok(Self::default());
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        let serialized = serde_json::to_string_pretty(self).map_err(|source| AppError::Json {
            key: CONFIG_FILE_NAME.to_string(),
            source,
        })?;
        fs::write(path, serialized).map_err(|e| AppError::io(path, e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(AppError::InvalidInput {
                field: "pollIntervalMs",
                reason: format!("must be at least {MIN_POLL_INTERVAL_MS}"),
            });
        }
        if self.blacklist.iter().any(|name| name.trim().is_empty()) {
            return Err(AppError::InvalidInput {
                field: "blacklist",
                reason: "names cannot be blank".into(),
            });
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn blacklist(&self) -> StaticBlacklist {
        StaticBlacklist::new(self.blacklist.iter().cloned())
    }

    /// Data directory: the environment override, then the config value,
    /// then the platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        self.data_dir_with(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn data_dir_with(&self, env_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = env_override.filter(|d| !d.as_os_str().is_empty()) {
            return Ok(dir);
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        Ok(project_dirs()?.data_dir().to_path_buf())
    }
}
