use tracing::warn;

/// Error type shared by the HTTP clients
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited { retry_after_secs: Option<u64> },
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => write!(f, "Rate Limited. Retry after {} s", secs),
                None => write!(f, "Rate Limited"),
            },
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Build an error from a non-success response
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        if status == 429 {
            warn!("Rate limited, retry after {:?} s", retry_after_secs);
            return ApiError::RateLimited { retry_after_secs };
        }
        Self::from_status(status, &body_text)
    }

    /// Map a status code and body to an error.
    ///
    /// LINE reports `{"message": ...}`, Airtable reports
    /// `{"error": {"type": ..., "message": ...}}` or `{"error": "TYPE"}`.
    pub fn from_status(status: u16, body_text: &str) -> Self {
        let message = extract_error_message(body_text);

        match status {
            400 | 422 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            429 => ApiError::RateLimited { retry_after_secs: None },
            500..=599 => {
                warn!("Server error {}: {}", status, message);
                ApiError::ServerError(status, message)
            }
            _ => ApiError::HttpError(status, message),
        }
    }
}

fn extract_error_message(body_text: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body_text) else {
        return body_text.to_string();
    };

    json.get("message")
        .and_then(|v| v.as_str())
        .or_else(|| json.pointer("/error/message").and_then(|v| v.as_str()))
        .or_else(|| json.get("error").and_then(|v| v.as_str()))
        .unwrap_or(body_text)
        .to_string()
}
