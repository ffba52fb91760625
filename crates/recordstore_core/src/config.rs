//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database, listener and logging settings from `RECORDSTORE_*`
//!   environment variables.
//! - Fall back to documented defaults when a variable is absent or blank.
//!
//! # Invariants
//! - Loading never panics; malformed values surface as `ConfigError`.
//! - `log_dir` is always absolute (defaults live under the temp dir).

use crate::logging::default_log_level;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_DB_PATH: &str = "RECORDSTORE_DB_PATH";
pub const ENV_HOST: &str = "RECORDSTORE_HOST";
pub const ENV_PORT: &str = "RECORDSTORE_PORT";
pub const ENV_LOG_LEVEL: &str = "RECORDSTORE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RECORDSTORE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "recordstore.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "recordstore-logs";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";

/// Resolved settings shared by the server and CLI binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub log_dir: PathBuf,
}

/// A configuration variable was present but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} value `{}`: {}",
            self.key, self.value, self.reason
        )
    }
}

impl Error for ConfigError {}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration for tools that never bind a listener.
    ///
    /// `RECORDSTORE_HOST` and `RECORDSTORE_PORT` are ignored, so a value meant
    /// for the server cannot break a local client.
    pub fn load_without_listener() -> Result<Self, ConfigError> {
        Self::from_lookup(without_listener(|key| std::env::var(key).ok()))
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = lookup(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                info!("event=config_default module=config key={ENV_DB_PATH}");
                std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
            });

        let log_dir = match lookup(ENV_LOG_DIR) {
            Some(raw) => {
                let path = PathBuf::from(&raw);
                if !path.is_absolute() {
                    return Err(ConfigError {
                        key: ENV_LOG_DIR,
                        value: raw,
                        reason: "must be an absolute path".to_string(),
                    });
                }
                path
            }
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        Ok(Self {
            db_path,
            host: parse_or_default(&lookup, ENV_HOST, DEFAULT_HOST)?,
            port: parse_or_default(&lookup, ENV_PORT, DEFAULT_PORT)?,
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }
}

fn without_listener(
    lookup: impl Fn(&str) -> Option<String>,
) -> impl Fn(&str) -> Option<String> {
    move |key| match key {
        ENV_HOST | ENV_PORT => None,
        _ => lookup(key),
    }
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("event=config_default module=config key={key} value={default}");
        default.to_string()
    });

    raw.parse().map_err(|err: T::Err| {
        warn!("event=config_invalid module=config key={key}");
        ConfigError {
            key,
            reason: err.to_string(),
            value: raw.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{without_listener, Config, ENV_DB_PATH, ENV_HOST, ENV_LOG_DIR, ENV_PORT};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert!(config.db_path.ends_with("recordstore.sqlite3"));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn explicit_values_override_defaults_and_blank_counts_as_unset() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/var/lib/todos.db"),
            (ENV_PORT, "   "),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/todos.db"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn malformed_port_is_an_error_not_a_panic() {
        let err = Config::from_lookup(lookup_from(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert_eq!(err.key, ENV_PORT);
        assert_eq!(err.value, "eighty");
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(ENV_LOG_DIR, "logs")])).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn listener_keys_are_ignored_for_store_only_loads() {
        let config = Config::from_lookup(without_listener(lookup_from(&[
            (ENV_PORT, "eighty"),
            (ENV_HOST, "not-an-ip"),
            (ENV_DB_PATH, "/var/lib/todos.db"),
        ])))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/todos.db"));
    }
}
