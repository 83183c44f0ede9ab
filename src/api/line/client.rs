use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{ReplyRequest, MAX_REPLY_MESSAGES};
use crate::api::{ApiError, Notifier};
use crate::models::ReplyMessage;

/// LINE Messaging API client used to answer webhook events
pub struct LineClient {
    http_client: HttpClient,
    channel_access_token: String,
    base_url: String,
}

impl LineClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.line.me/v2/bot";

    pub fn new(channel_access_token: String) -> Self {
        Self::with_base_url(channel_access_token, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(channel_access_token: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            channel_access_token,
            base_url,
        }
    }

    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.channel_access_token))
            .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }
}

/// Reject replies LINE would refuse before spending the reply token on them
fn validate_reply(messages: &[ReplyMessage]) -> Result<(), ApiError> {
    if messages.is_empty() {
        return Err(ApiError::BadRequest("reply has no messages".to_string()));
    }
    if messages.len() > MAX_REPLY_MESSAGES {
        return Err(ApiError::BadRequest(format!(
            "reply has {} messages, LINE accepts at most {}",
            messages.len(),
            MAX_REPLY_MESSAGES
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
impl Notifier for LineClient {
    /// POST /message/reply
    ///
    /// Reply tokens are single use and expire shortly after the event. LINE
    /// answers a reused or stale token with 400, which comes back as
    /// `ApiError::BadRequest`.
    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<(), ApiError> {
        validate_reply(messages)?;

        let url = format!("{}/message/reply", self.base_url);
        let body = ReplyRequest { reply_token, messages };

        let response = self
            .http_client
            .post(&url)
            .headers(self.create_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        debug!("Sent {} reply message(s)", messages.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_request_body() {
        let messages = vec![ReplyMessage::text("hello")];
        let body = ReplyRequest {
            reply_token: "token-1",
            messages: &messages,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "replyToken": "token-1",
                "messages": [{ "type": "text", "text": "hello" }]
            })
        );
    }

    #[test]
    fn test_validate_reply_limits() {
        assert!(validate_reply(&[ReplyMessage::text("a")]).is_ok());
        assert!(matches!(validate_reply(&[]), Err(ApiError::BadRequest(_))));

        let too_many: Vec<ReplyMessage> = (0..6).map(|i| ReplyMessage::text(i.to_string())).collect();
        assert!(matches!(validate_reply(&too_many), Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_oversized_reply_fails_without_request() {
        // Unroutable base URL: reaching the network would yield RequestError
        let client = LineClient::with_base_url("token".into(), "http://127.0.0.1:9".into());
        let too_many: Vec<ReplyMessage> = (0..6).map(|i| ReplyMessage::text(i.to_string())).collect();
        let err = client.reply("r", &too_many).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
