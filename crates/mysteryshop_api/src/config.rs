//! Environment-driven configuration for the API facade.
//!
//! | variable | default |
//! |---|---|
//! | `MYSTERYSHOP_DB_PATH` | `<tmp>/mysteryshop.sqlite3` |
//! | `MYSTERYSHOP_LOG_LEVEL` | `debug` (debug builds) / `info` (release) |
//! | `MYSTERYSHOP_LOG_DIR` | unset: no file logging |
//! | `MYSTERYSHOP_SUBMIT_DELAY_MS` | `300` |

use mysteryshop_core::submission::DEFAULT_SIMULATED_DELAY;
use mysteryshop_core::{default_log_level, LoggingConfig};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_VAR: &str = "MYSTERYSHOP_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "MYSTERYSHOP_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "MYSTERYSHOP_LOG_DIR";
pub const SUBMIT_DELAY_VAR: &str = "MYSTERYSHOP_SUBMIT_DELAY_MS";

const DEFAULT_DB_FILE_NAME: &str = "mysteryshop.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(String),
    InvalidSubmitDelay(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(value) => {
                write!(f, "{LOG_DIR_VAR} must be an absolute path, got `{value}`")
            }
            Self::InvalidSubmitDelay(value) => write!(
                f,
                "{SUBMIT_DELAY_VAR} must be a non-negative integer, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    /// Latency of the simulated submission write.
    pub submit_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            submit_delay: DEFAULT_SIMULATED_DELAY,
        }
    }
}

impl ApiConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_VAR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(path);
        }
        if let Some(raw) = read(SUBMIT_DELAY_VAR) {
            let millis = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSubmitDelay(raw.clone()))?;
            config.submit_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Logger settings, when a log directory is configured.
    pub fn logging(&self) -> Option<LoggingConfig> {
        self.log_dir
            .as_ref()
            .map(|dir| LoggingConfig::new(self.log_level.clone(), dir.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, ConfigError, DB_PATH_VAR, LOG_DIR_VAR, SUBMIT_DELAY_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, ApiConfig::default());
        assert!(config.db_path.ends_with("mysteryshop.sqlite3"));
        assert_eq!(config.submit_delay, Duration::from_millis(300));
        assert!(config.logging().is_none());
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = ApiConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, " /var/lib/mysteryshop/tasks.sqlite3 "),
            (SUBMIT_DELAY_VAR, "0"),
            (LOG_DIR_VAR, "  "),
        ]))
        .expect("valid overrides");
        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/mysteryshop/tasks.sqlite3")
        );
        assert_eq!(config.submit_delay, Duration::ZERO);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[(LOG_DIR_VAR, "logs")])),
            Err(ConfigError::RelativeLogDir("logs".to_string()))
        );
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[(SUBMIT_DELAY_VAR, "-5")])),
            Err(ConfigError::InvalidSubmitDelay("-5".to_string()))
        );
    }
}
