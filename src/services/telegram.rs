// src/services/telegram.rs

//! Telegram Bot API messenger.
//!
//! Only `sendMessage` is used. Docs: <https://core.telegram.org/bots/api#sendmessage>

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::TelegramConfig;
use crate::services::{DeliveryReceipt, Messenger};
use crate::utils::http::{create_async_client, describe};
use crate::utils::scrub;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Messenger backed by the Telegram Bot API.
pub struct TelegramMessenger {
    client: Client,
    send_url: Url,
    token: String,
}

impl TelegramMessenger {
    pub fn new(config: &TelegramConfig, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let base = config.api_base.trim_end_matches('/');
        let send_url = Url::parse(&format!("{base}/bot{token}/sendMessage")).map_err(|e| {
            AppError::config(format!(
                "Invalid telegram.api_base '{}': {e}",
                config.api_base
            ))
        })?;
        let client = create_async_client(
            concat!("homework-bot/", env!("CARGO_PKG_VERSION")),
            config.timeout_secs,
        )?;

        Ok(Self {
            client,
            send_url,
            token,
        })
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<DeliveryReceipt> {
        let response = self
            .client
            .post(self.send_url.clone())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| AppError::delivery(chat_id, scrub(&describe(&e), &self.token)))?;

        let status = response.status();
        let answer: SendMessageResponse = response.json().await.map_err(|e| {
            AppError::delivery(
                chat_id,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    scrub(&describe(&e), &self.token)
                ),
            )
        })?;

        receipt_from(chat_id, status.as_u16(), answer)
    }
}

fn receipt_from(
    chat_id: &str,
    status: u16,
    answer: SendMessageResponse,
) -> Result<DeliveryReceipt> {
    if !answer.ok || !(200..300).contains(&status) {
        let reason = answer
            .description
            .unwrap_or_else(|| "message not accepted".to_string());
        return Err(AppError::delivery(chat_id, format!("HTTP {status}: {reason}")));
    }

    Ok(DeliveryReceipt {
        chat_id: chat_id.to_string(),
        message_id: answer.result.map(|m| m.message_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(body: &str) -> SendMessageResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_send_url_contains_token_path() {
        let messenger =
            TelegramMessenger::new(&TelegramConfig::default(), "123456:ABCDEFGHIJ").unwrap();
        assert_eq!(
            messenger.send_url.as_str(),
            "https://api.telegram.org/bot123456:ABCDEFGHIJ/sendMessage"
        );
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let config = TelegramConfig {
            api_base: "http://localhost:8081/".into(),
            ..TelegramConfig::default()
        };
        let messenger = TelegramMessenger::new(&config, "t0ken").unwrap();
        assert_eq!(
            messenger.send_url.as_str(),
            "http://localhost:8081/bott0ken/sendMessage"
        );
    }

    #[test]
    fn test_accepted_message() {
        let receipt = receipt_from(
            "42",
            200,
            answer(r#"{"ok": true, "result": {"message_id": 917, "chat": {"id": 42}}}"#),
        )
        .unwrap();
        assert_eq!(
            receipt,
            DeliveryReceipt {
                chat_id: "42".into(),
                message_id: Some(917),
            }
        );
    }

    #[test]
    fn test_rejected_message() {
        let result = receipt_from(
            "42",
            400,
            answer(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#),
        );
        match result {
            Err(AppError::Delivery { chat_id, message }) => {
                assert_eq!(chat_id, "42");
                assert_eq!(message, "HTTP 400: Bad Request: chat not found");
            }
            other => panic!("expected Delivery error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SendMessageRequest {
            chat_id: "42",
            text: "hi",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": "42", "text": "hi"}));
    }
}
