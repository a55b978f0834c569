// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};

/// Create a configured asynchronous HTTP client.
///
/// Every request made through it is bounded by `timeout_secs`.
pub fn create_async_client(user_agent: &str, timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))
}

/// Render a `reqwest` failure with its cause, without the request URL.
///
/// The URL may hold a bot token, so callers attach a redacted one themselves.
pub fn describe(error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_decode() || error.is_body() {
        "failed to read response body"
    } else {
        "request failed"
    };

    match std::error::Error::source(error) {
        Some(cause) => format!("{kind}: {cause}"),
        None => kind.to_string(),
    }
}
