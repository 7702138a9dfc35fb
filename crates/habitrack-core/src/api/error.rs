//! Errors returned by the habit tracker API client.

use std::fmt;

use serde_json::Value;

/// Failure of a single API call.
///
/// Authentication failures are the only kind that force a logout; every other
/// failure is surfaced to the user and left for them to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Token missing, expired, or rejected (HTTP 400/401).
    Authentication { message: String },
    /// Any other non-2xx response or transport failure.
    Request {
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            status: None,
            message: message.into(),
        }
    }

    /// Builds the error for a non-2xx response.
    ///
    /// 400 and 401 are authentication failures; everything else is generic.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| format!("HTTP {status}"));
        if matches!(status, 400 | 401) {
            Self::Authentication { message }
        } else {
            Self::Request {
                status: Some(status),
                message,
            }
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message } | Self::Request { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => None,
            Self::Request { status, .. } => *status,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Extracts the user-facing message from an error body.
///
/// Habit endpoints answer with `{"message": ..}`, user endpoints with
/// `{"error": ..}`; anything else is taken verbatim.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(Value::as_str) {
                return Some(msg.to_string());
            }
        }
    }

    Some(body.to_string())
}

/// Maps a transport-level failure to a generic request error.
pub(crate) fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    let message = if e.is_timeout() {
        format!("Request timed out: {e}")
    } else if e.is_connect() {
        format!("Connection failed: {e}")
    } else if e.is_decode() {
        format!("Failed to decode response: {e}")
    } else {
        format!("Request failed: {e}")
    };
    ApiError::Request {
        status: e.status().map(|s| s.as_u16()),
        message,
    }
}
