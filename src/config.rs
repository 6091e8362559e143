//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FOOD_ORDERING_MAILBOX_SIZE` - Request channel capacity of each store (default: 32)
//! - `FOOD_ORDERING_LOG_FORMAT` - `compact` or `pretty` (default: compact)
//! - `RUST_LOG` - Log filter, read by the tracing subscriber

use std::str::FromStr;

use thiserror::Error;

pub const MAILBOX_SIZE_VAR: &str = "FOOD_ORDERING_MAILBOX_SIZE";
pub const LOG_FORMAT_VAR: &str = "FOOD_ORDERING_LOG_FORMAT";

const DEFAULT_MAILBOX_SIZE: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output style of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("expected compact or pretty, got {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mailbox_size: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mailbox_size: DEFAULT_MAILBOX_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mailbox_size = match lookup(MAILBOX_SIZE_VAR) {
            Some(raw) => {
                let size = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidEnvVar(MAILBOX_SIZE_VAR.to_string(), e.to_string()))?;
                if size == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        MAILBOX_SIZE_VAR.to_string(),
                        "must be greater than zero".to_string(),
                    ));
                }
                size
            }
            None => DEFAULT_MAILBOX_SIZE,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar(LOG_FORMAT_VAR.to_string(), e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            mailbox_size,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.mailbox_size, 32);
    }

    #[test]
    fn reads_both_variables() {
        let config =
            AppConfig::from_lookup(lookup(&[(MAILBOX_SIZE_VAR, "128"), (LOG_FORMAT_VAR, "Pretty")])).unwrap();
        assert_eq!(config.mailbox_size, 128);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn zero_mailbox_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(MAILBOX_SIZE_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == MAILBOX_SIZE_VAR));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "json")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == LOG_FORMAT_VAR));
    }
}
