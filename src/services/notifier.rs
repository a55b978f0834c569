// src/services/notifier.rs

//! Delivers notifications to the configured chat.

use std::sync::Arc;

use crate::error::Result;
use crate::services::{DeliveryReceipt, Messenger};

/// Sends messages to a single chat and counts successful deliveries.
pub struct Notifier {
    messenger: Arc<dyn Messenger>,
    chat_id: String,
    sent: u64,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn Messenger>, chat_id: impl Into<String>) -> Self {
        Self {
            messenger,
            chat_id: chat_id.into(),
            sent: 0,
        }
    }

    /// Send `message`; a failure is returned to the caller untouched.
    pub async fn send(&mut self, message: &str) -> Result<DeliveryReceipt> {
        log::info!("Sending message to chat {}: {}", self.chat_id, message);

        let receipt = self.messenger.send_message(&self.chat_id, message).await?;
        self.sent += 1;

        match receipt.message_id {
            Some(id) => log::info!("Message {} delivered to chat {}", id, receipt.chat_id),
            None => log::info!("Message delivered to chat {}", receipt.chat_id),
        }
        Ok(receipt)
    }

    /// Number of messages delivered so far.
    pub fn sent_count(&self) -> u64 {
        self.sent
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}
