//! External collaborators and the transforms between them.
//!
//! The poll loop only sees the two traits below, so the HTTP-backed
//! implementations can be swapped for in-memory ones in tests.

pub mod console;
pub mod notifier;
pub mod parser;
pub mod review_api;
pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ApiResponse;

// Re-export for convenience
pub use console::ConsoleMessenger;
pub use notifier::Notifier;
pub use parser::parse_homework_status;
pub use review_api::ReviewApiClient;
pub use telegram::TelegramMessenger;

/// Proof that a message was accepted by the messaging API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub chat_id: String,
    /// Server-side message id, when the backend reports one
    pub message_id: Option<i64>,
}

/// Source of homework status updates.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch statuses changed since the given Unix timestamp.
    async fn fetch(&self, since: i64) -> Result<ApiResponse>;
}

/// Outbound text messaging.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to `chat_id`.
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<DeliveryReceipt>;
}
