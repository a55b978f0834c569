//! Secrets read from the process environment.

use std::fmt;

use crate::error::{AppError, Result};
use crate::utils::redact;

pub const REVIEW_TOKEN_VAR: &str = "PRAKTIKUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Credentials and destination for one bot instance.
#[derive(Clone)]
pub struct Credentials {
    pub review_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Read all credentials from the environment.
    ///
    /// Fails with every missing or blank variable listed, so a misconfigured
    /// deployment is reported in one go.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name: &str| std::env::var(name).ok())
    }

    /// Read only the review API token; used when nothing will be sent.
    pub fn review_token_from_env() -> Result<String> {
        let lookup = |name: &str| std::env::var(name).ok();
        required(&lookup, REVIEW_TOKEN_VAR).ok_or_else(|| missing_error(&[REVIEW_TOKEN_VAR]))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let review_token = required(&lookup, REVIEW_TOKEN_VAR);
        let telegram_token = required(&lookup, TELEGRAM_TOKEN_VAR);
        let chat_id = required(&lookup, CHAT_ID_VAR);

        match (review_token, telegram_token, chat_id) {
            (Some(review_token), Some(telegram_token), Some(chat_id)) => Ok(Self {
                review_token,
                telegram_token,
                chat_id,
            }),
            (review_token, telegram_token, chat_id) => {
                let missing: Vec<&str> = [
                    (REVIEW_TOKEN_VAR, review_token.is_none()),
                    (TELEGRAM_TOKEN_VAR, telegram_token.is_none()),
                    (CHAT_ID_VAR, chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(missing_error(&missing))
            }
        }
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn missing_error(names: &[&str]) -> AppError {
    AppError::config(format!(
        "missing environment variable(s): {}",
        names.join(", ")
    ))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("review_token", &redact(&self.review_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
