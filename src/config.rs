use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

use crate::handlers::calendar_view::ViewMode;
use crate::tasks::refresh_loop::DEFAULT_REFRESH_INTERVAL;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Flat `KEY=value` pairs read from a dotenv-style file.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let mut value = value.trim();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }
            values.insert(key.trim().to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment.
    pub fn get_prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub refresh_interval: Duration,
    pub timezone: Tz,
    pub view: ViewMode,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = match env::var("CONFIG_FILE") {
            Ok(path) => AppConfig::from_file(&path)?,
            Err(_) => AppConfig::default(),
        };
        Self::resolve(|key| config.get_prop(key))
    }

    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("POWERALERT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let refresh_interval = match lookup("POWERALERT_REFRESH_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| invalid(
                    "POWERALERT_REFRESH_SECS",
                    format!("{} is not a number of seconds", raw),
                ))?;
                if secs == 0 {
                    return Err(invalid("POWERALERT_REFRESH_SECS", "must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_REFRESH_INTERVAL,
        };

        let timezone = match lookup("POWERALERT_TIMEZONE") {
            Some(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|e| invalid("POWERALERT_TIMEZONE", e.to_string()))?,
            None => chrono_tz::UTC,
        };

        let view = match lookup("POWERALERT_VIEW") {
            Some(raw) => raw
                .parse::<ViewMode>()
                .map_err(|e| invalid("POWERALERT_VIEW", e))?,
            None => ViewMode::default(),
        };

        Ok(Self {
            base_url,
            refresh_interval,
            timezone,
            view,
        })
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}
