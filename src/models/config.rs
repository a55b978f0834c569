//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Review API endpoint and HTTP settings
    #[serde(default)]
    pub review_api: ReviewApiConfig,

    /// Messaging bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Poll pacing
    #[serde(default)]
    pub polling: PollingConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.review_api.endpoint.trim().is_empty() {
            return Err(AppError::config("review_api.endpoint is empty"));
        }
        if self.review_api.user_agent.trim().is_empty() {
            return Err(AppError::config("review_api.user_agent is empty"));
        }
        if self.review_api.timeout_secs == 0 {
            return Err(AppError::config("review_api.timeout_secs must be > 0"));
        }
        if self.telegram.api_base.trim().is_empty() {
            return Err(AppError::config("telegram.api_base is empty"));
        }
        if self.telegram.timeout_secs == 0 {
            return Err(AppError::config("telegram.timeout_secs must be > 0"));
        }
        if self.polling.interval_secs == 0 {
            return Err(AppError::config("polling.interval_secs must be > 0"));
        }
        if self.polling.retry_secs == 0 {
            return Err(AppError::config("polling.retry_secs must be > 0"));
        }
        if self.polling.retry_secs >= self.polling.interval_secs {
            return Err(AppError::config(
                "polling.retry_secs must be shorter than polling.interval_secs",
            ));
        }
        Ok(())
    }
}

/// Review API endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewApiConfig {
    /// Homework statuses endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ReviewApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL, without the `/bot<token>` part
    #[serde(default = "defaults::telegram_api_base")]
    pub api_base: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::telegram_api_base(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Sleep intervals between cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Sleep after a successful cycle, in seconds
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,

    /// Sleep after a failed cycle, in seconds
    #[serde(default = "defaults::retry")]
    pub retry_secs: u64,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn retry(&self) -> Duration {
        Duration::from_secs(self.retry_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::interval(),
            retry_secs: defaults::retry(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Write logs to this file (truncated at startup) instead of stderr
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            file: None,
        }
    }
}

mod defaults {
    pub fn endpoint() -> String {
        "https://praktikum.yandex.ru/api/user_api/homework_statuses/".into()
    }
    pub fn user_agent() -> String {
        concat!("homework-bot/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn telegram_api_base() -> String {
        "https://api.telegram.org".into()
    }
    pub fn interval() -> u64 {
        1200
    }
    pub fn retry() -> u64 {
        5
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
