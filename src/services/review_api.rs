// src/services/review_api.rs

//! Review API client.
//!
//! The service reports failures inside a JSON body that may come with a
//! 200 status, so the body is always inspected before the status code.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{ApiResponse, ReviewApiConfig};
use crate::services::HomeworkSource;
use crate::utils::http::{create_async_client, describe};

/// Keys whose presence marks an error-shaped body, checked in this order.
const ERROR_KEYS: [&str; 2] = ["error", "code"];

/// Header context attached to transport errors; the token never leaves the client.
const REDACTED_HEADERS: &str = "Authorization: OAuth ***";

/// HTTP client for the homework statuses endpoint.
pub struct ReviewApiClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl ReviewApiClient {
    /// Create a client for the configured endpoint, authenticating with `token`.
    pub fn new(config: &ReviewApiConfig, token: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            AppError::config(format!(
                "Invalid review_api.endpoint '{}': {e}",
                config.endpoint
            ))
        })?;
        let client = create_async_client(&config.user_agent, config.timeout_secs)?;

        Ok(Self {
            client,
            endpoint,
            token: token.into(),
        })
    }

    fn request_url(&self, since: i64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("from_date", &since.to_string());
        url
    }
}

#[async_trait]
impl HomeworkSource for ReviewApiClient {
    async fn fetch(&self, since: i64) -> Result<ApiResponse> {
        let url = self.request_url(since);
        log::debug!("GET {} ({})", url, REDACTED_HEADERS);

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .send()
            .await
            .map_err(|e| {
                AppError::transport(url.as_str(), None, describe(&e)).with_headers(REDACTED_HEADERS)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            AppError::transport(url.as_str(), Some(status), describe(&e))
                .with_headers(REDACTED_HEADERS)
        })?;

        interpret_body(url.as_str(), status, &body).map_err(|e| e.with_headers(REDACTED_HEADERS))
    }
}

/// Validate a raw response and decode it.
///
/// Order matters: an `error`/`code` key is an API error whatever the HTTP
/// status says, and only a body without one is judged by its status.
pub fn interpret_body(url: &str, status: u16, body: &[u8]) -> Result<ApiResponse> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        AppError::transport(url, Some(status), format!("unparsable payload: {e}"))
    })?;

    if let Some((key, reported)) = ERROR_KEYS
        .iter()
        .find_map(|key| value.get(key).map(|v| (*key, v)))
    {
        return Err(AppError::api(key, value_text(reported)));
    }

    if !(200..300).contains(&status) {
        return Err(AppError::transport(url, Some(status), "unexpected HTTP status"));
    }

    serde_json::from_value(value).map_err(|e| {
        AppError::transport(url, Some(status), format!("unexpected payload shape: {e}"))
    })
}

/// String content for JSON strings, compact JSON for anything else.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HomeworkRecord;

    const URL: &str = "https://example.com/api/user_api/homework_statuses/?from_date=0";

    #[test]
    fn test_success_body() {
        let body = br#"{"homeworks": [{"homework_name": "task1", "status": "approved"}], "current_date": 1700000000}"#;
        let response = interpret_body(URL, 200, body).unwrap();

        assert_eq!(response.current_date, Some(1_700_000_000));
        assert_eq!(
            response.newest(),
            Some(HomeworkRecord::new("task1", "approved"))
        );
    }

    #[test]
    fn test_error_key_with_ok_status() {
        let result = interpret_body(URL, 200, br#"{"error": "bad_token"}"#);
        match result {
            Err(AppError::Api { key, value }) => {
                assert_eq!(key, "error");
                assert_eq!(value, "bad_token");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_code_key() {
        let body = r#"{"code": "not_authenticated", "message": "Учетные данные не были предоставлены."}"#;
        let result = interpret_body(URL, 401, body.as_bytes());
        assert!(matches!(
            result,
            Err(AppError::Api { ref key, ref value }) if key == "code" && value == "not_authenticated"
        ));
    }

    #[test]
    fn test_error_key_checked_before_code() {
        let body = br#"{"code": 7, "error": {"error": "Wrong from_date format"}}"#;
        match interpret_body(URL, 400, body) {
            Err(AppError::Api { key, value }) => {
                assert_eq!(key, "error");
                assert_eq!(value, r#"{"error":"Wrong from_date format"}"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrongly_typed_older_record_is_accepted() {
        let body = br#"{"homeworks": [{"homework_name": "task1", "status": "approved"}, {"homework_name": 7, "status": "rejected"}], "current_date": 1700000000}"#;
        let response = interpret_body(URL, 200, body).unwrap();

        assert_eq!(
            response.newest(),
            Some(HomeworkRecord::new("task1", "approved"))
        );
        assert_eq!(response.current_date, Some(1_700_000_000));
    }

    #[test]
    fn test_wrongly_typed_newest_record_reaches_parser() {
        let body = br#"{"homeworks": [{"homework_name": 7, "status": "approved"}]}"#;
        let record = interpret_body(URL, 200, body).unwrap().newest().unwrap();

        assert!(matches!(
            crate::services::parse_homework_status(&record),
            Err(AppError::MalformedRecord {
                missing: "homework_name"
            })
        ));
    }

    #[test]
    fn test_unparsable_body_is_transport() {
        let result = interpret_body(URL, 200, b"<html>502 Bad Gateway</html>");
        assert!(matches!(
            result,
            Err(AppError::Transport { status: Some(200), .. })
        ));
    }

    #[test]
    fn test_bad_status_without_error_key_is_transport() {
        let result = interpret_body(URL, 503, br#"{"detail": "maintenance"}"#);
        assert!(matches!(
            result,
            Err(AppError::Transport { status: Some(503), .. })
        ));
    }

    #[test]
    fn test_wrong_shape_is_transport() {
        let result = interpret_body(URL, 200, br#"{"homeworks": "none"}"#);
        assert!(matches!(result, Err(AppError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_connection_failure_carries_redacted_headers() {
        // Port 9 on localhost refuses connections; nothing leaves the machine.
        let config = ReviewApiConfig {
            endpoint: "http://127.0.0.1:9/homework_statuses/".into(),
            timeout_secs: 2,
            ..ReviewApiConfig::default()
        };
        let client = ReviewApiClient::new(&config, "y0_secret_review_token").unwrap();

        match client.fetch(1_700_000_000).await {
            Err(AppError::Transport {
                url,
                headers,
                status,
                ..
            }) => {
                assert_eq!(url, "http://127.0.0.1:9/homework_statuses/?from_date=1700000000");
                assert_eq!(headers.as_deref(), Some("Authorization: OAuth ***"));
                assert_eq!(status, None);
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_url_carries_from_date() {
        let client = ReviewApiClient::new(&ReviewApiConfig::default(), "token").unwrap();
        let url = client.request_url(1_700_000_000);
        assert_eq!(url.query(), Some("from_date=1700000000"));
        assert!(!url.as_str().contains("token"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = ReviewApiConfig {
            endpoint: "not a url".into(),
            ..ReviewApiConfig::default()
        };
        assert!(matches!(
            ReviewApiClient::new(&config, "token"),
            Err(AppError::Config(_))
        ));
    }
}
