// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Errors raised at the adapter boundary, before or around a forward call.
///
/// Everything fallible in a route handler is converted into one of these and
/// rendered as a `{"error": ...}` JSON body; nothing is allowed to propagate
/// to the framework's default error path.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (inbound payload not valid JSON/shape)
    MalformedInput(String),

    // 401 Unauthorized (missing/invalid credential)
    Unauthorized(String),

    // 500 Internal Server Error (network/parse failure talking upstream)
    Transport(String),

    // 500 Internal Server Error (anything else; never a raw stack trace)
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MalformedInput(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Transport(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::MalformedInput(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Transport(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        ApiError::MalformedInput(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
