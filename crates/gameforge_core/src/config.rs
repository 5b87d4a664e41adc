//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; an invalid level falls back to the build
//!   default and is reported through [`CoreConfig::warnings`].

use crate::logging::LogLevel;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GAMEFORGE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GAMEFORGE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GAMEFORGE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "gameforge.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "gameforge-logs";

/// Paths and levels used to bootstrap the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
    /// Problems found while resolving, for the caller to surface or log.
    pub warnings: Vec<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let temp = std::env::temp_dir();
        Self {
            db_path: temp.join(DEFAULT_DB_FILE_NAME),
            log_level: LogLevel::build_default(),
            log_dir: temp.join(DEFAULT_LOG_DIR_NAME),
            warnings: Vec::new(),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = non_blank(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(dir) = non_blank(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            match LogLevel::parse(&level) {
                Ok(level) => config.log_level = level,
                Err(err) => config.warnings.push(format!("{LOG_LEVEL_ENV}: {err}")),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_LEVEL_ENV};
    use crate::logging::LogLevel;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path.ends_with("gameforge.sqlite3"));
    }

    #[test]
    fn overrides_apply_and_blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, " /data/forge.db "),
            (LOG_LEVEL_ENV, "   "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/forge.db"));
        assert_eq!(config.log_level, LogLevel::build_default());
    }

    #[test]
    fn invalid_level_is_reported_not_fatal() {
        let config = CoreConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")]));
        assert_eq!(config.log_level, LogLevel::build_default());
        assert_eq!(config.warnings.len(), 1);
    }
}
