// src/models/mod.rs

//! Domain models for the homework bot.

mod config;
mod credentials;
mod cursor;
mod homework;
mod status;

// Re-export all public types
pub use config::{Config, LoggingConfig, PollingConfig, ReviewApiConfig, TelegramConfig};
pub use credentials::{CHAT_ID_VAR, Credentials, REVIEW_TOKEN_VAR, TELEGRAM_TOKEN_VAR};
pub use cursor::PollCursor;
pub use homework::{ApiResponse, HomeworkRecord};
pub use status::{ReviewStatus, verdict_for};
