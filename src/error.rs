// src/error.rs

//! Unified error handling for the homework bot.
//!
//! Every failure a poll cycle can hit is one of the first five variants.
//! The remaining ones only occur while the process is starting up.

use std::fmt;

use thiserror::Error;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Talking to the review API failed, or its body could not be decoded
    #[error("Transport error for {url}{}: {message}", status_suffix(.status))]
    Transport {
        url: String,
        /// Request headers as sent, credentials masked
        headers: Option<String>,
        status: Option<u16>,
        message: String,
    },

    /// The review API answered, but the body reports a failure
    #[error("API reported {key}: {value}")]
    Api { key: String, value: String },

    /// A homework record lacks a required field, or has it with a non-string value
    #[error("Malformed homework record: missing or non-string '{missing}'")]
    MalformedRecord { missing: &'static str },

    /// A review status outside the known catalog
    #[error("Unknown review status '{0}'")]
    UnknownStatus(String),

    /// The messaging API did not accept the message
    #[error("Delivery to chat {chat_id} failed: {message}")]
    Delivery { chat_id: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl AppError {
    /// Create a transport error for a request URL.
    pub fn transport(
        url: impl Into<String>,
        status: Option<u16>,
        message: impl fmt::Display,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            headers: None,
            status,
            message: message.to_string(),
        }
    }

    /// Attach the (already redacted) request headers to a transport error.
    ///
    /// Other variants are returned unchanged.
    pub fn with_headers(self, redacted: impl Into<String>) -> Self {
        match self {
            Self::Transport {
                url,
                status,
                message,
                ..
            } => Self::Transport {
                url,
                headers: Some(redacted.into()),
                status,
                message,
            },
            other => other,
        }
    }

    /// Create an API-reported error.
    pub fn api(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Api {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a delivery error.
    pub fn delivery(chat_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Delivery {
            chat_id: chat_id.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Api { .. } => "api",
            Self::MalformedRecord { .. } => "malformed_record",
            Self::UnknownStatus(_) => "unknown_status",
            Self::Delivery { .. } => "delivery",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Toml(_) => "toml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_includes_status_when_known() {
        let err = AppError::transport(
            "https://example.com/api?from_date=1",
            Some(502),
            "bad gateway",
        );
        assert_eq!(
            err.to_string(),
            "Transport error for https://example.com/api?from_date=1 (HTTP 502): bad gateway"
        );

        let err = AppError::transport("https://example.com/api", None, "timed out");
        assert_eq!(err.to_string(), "Transport error for https://example.com/api: timed out");
    }

    #[test]
    fn headers_attach_only_to_transport() {
        let err = AppError::transport("https://example.com/api", None, "timed out")
            .with_headers("Authorization: OAuth ***");
        assert!(matches!(
            err,
            AppError::Transport { headers: Some(ref h), .. } if h == "Authorization: OAuth ***"
        ));

        let err = AppError::api("error", "bad_token").with_headers("Authorization: OAuth ***");
        assert!(matches!(err, AppError::Api { .. }));
    }

    #[test]
    fn kind_tags() {
        assert_eq!(AppError::api("error", "bad_token").kind(), "api");
        assert_eq!(AppError::UnknownStatus("x".into()).kind(), "unknown_status");
        assert_eq!(
            AppError::MalformedRecord { missing: "status" }.kind(),
            "malformed_record"
        );
        assert_eq!(AppError::delivery("1", "nope").kind(), "delivery");
    }
}
