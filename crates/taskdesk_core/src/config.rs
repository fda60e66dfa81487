//! Runtime configuration resolved from the environment.
//!
//! | Variable             | Default                          |
//! |----------------------|----------------------------------|
//! | `TASKDESK_DB_PATH`   | `<temp dir>/taskdesk.sqlite3`    |
//! | `TASKDESK_LOG_LEVEL` | `debug` (debug) / `info` (release) |
//! | `TASKDESK_LOG_DIR`   | unset: file logging disabled     |

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASKDESK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TASKDESK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TASKDESK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "taskdesk.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        config
    }
}
