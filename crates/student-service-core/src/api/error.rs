use serde_json::Value;
use thiserror::Error;

/// Message used when neither the body nor the status line says anything useful
pub const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Request {
        status: u16,
        message: String,
        body: Value,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in log lines
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Build a request error, deriving the message from the body and status.
    pub fn from_status(status: reqwest::StatusCode, body: Value) -> Self {
        ApiError::Request {
            status: status.as_u16(),
            message: error_message(status, &body),
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Request { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &Value) -> String {
        let text = match body {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.len() <= MAX_ERROR_BODY_LENGTH {
            return text;
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &text[..end], text.len())
    }
}

/// Pick the human-readable message for a failed response.
///
/// Order: the body's `message`, then its `error`, then the status reason
/// phrase, then a generic fallback. Empty strings are skipped.
pub fn error_message(status: reqwest::StatusCode, body: &Value) -> String {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("message")
        .or_else(|| field("error"))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
