//! Process configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use salesguard_observability::LogFormat;
use salesguard_stock_alerts::AlertConfig;

pub const ENV_ALERT_STICKY: &str = "SALESGUARD_ALERT_STICKY";
pub const ENV_ALERT_SUBJECT: &str = "SALESGUARD_ALERT_SUBJECT";
pub const ENV_ALERT_TITLE: &str = "SALESGUARD_ALERT_TITLE";
pub const ENV_SEED: &str = "SALESGUARD_SEED";
pub const ENV_LOG_FORMAT: &str = "SALESGUARD_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a boolean (true/false/1/0/yes/no), got {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key} cannot be empty")]
    Empty { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub alerts: AlertConfig,
    /// JSON seed scenario to load at startup.
    pub seed: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(value) = lookup(ENV_ALERT_STICKY) {
            config.alerts.sticky = parse_bool(ENV_ALERT_STICKY, &value)?;
        }
        if let Some(value) = lookup(ENV_ALERT_SUBJECT) {
            config.alerts.subject = non_empty(ENV_ALERT_SUBJECT, value)?;
        }
        if let Some(value) = lookup(ENV_ALERT_TITLE) {
            config.alerts.title = non_empty(ENV_ALERT_TITLE, value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config.seed = Some(PathBuf::from(non_empty(ENV_SEED, value)?));
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            config.log_format = LogFormat::parse(&value);
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn non_empty(key: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { key });
    }
    Ok(trimmed.to_string())
}
