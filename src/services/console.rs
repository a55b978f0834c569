//! Messenger that prints to stdout, for dry runs.

use async_trait::async_trait;

use crate::error::Result;
use crate::services::{DeliveryReceipt, Messenger};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<DeliveryReceipt> {
        println!("--- message for chat {chat_id} ---\n{text}");
        Ok(DeliveryReceipt {
            chat_id: chat_id.to_string(),
            message_id: None,
        })
    }
}
