//! Client-facing proxy errors.
//!
//! Every error renders as a JSON object `{"detail": ...}`. Upstream
//! application errors keep their original status and raw text.

use std::time::Duration;

use axum::{
    http::{uri::InvalidUri, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors produced while proxying a single request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No configured prefix owns the path.
    #[error("No matching route for {0}")]
    NoRoute(String),

    /// Upstream answered with status >= 400.
    #[error("Upstream returned {status}")]
    Upstream { status: StatusCode, detail: String },

    /// Body-carrying request whose body is not JSON.
    #[error("Request body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Inbound body exceeded the configured limit.
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Inbound body could not be read from the client connection.
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// The joined upstream URL is not a valid URI.
    #[error("Invalid upstream target: {0}")]
    InvalidTarget(#[from] InvalidUri),

    /// The outbound request could not be assembled.
    #[error("Failed to build upstream request: {0}")]
    Build(#[from] axum::http::Error),

    /// Connection refused, DNS failure, reset, oversized reply.
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// No full reply within the request timeout.
    #[error("Upstream timed out after {0:?}")]
    Timeout(Duration),
}

impl ProxyError {
    /// Status code returned to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::NoRoute(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::InvalidBody(_) | ProxyError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::InvalidTarget(_) | ProxyError::Build(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Transport(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Text placed in the `detail` field.
    pub fn detail(&self) -> String {
        match self {
            ProxyError::Upstream { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
