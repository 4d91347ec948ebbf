//! Response handling and transformation.
//!
//! # Responsibilities
//! - Classify the upstream reply (empty, JSON, opaque text, error)
//! - Render the classification as the client-facing response
//!
//! # Design Decisions
//! - Upstream bodies are buffered (bounded) so they can be classified
//! - 204 never carries a body, whatever the upstream sent
//! - Non-JSON success bodies are wrapped, never surfaced as errors
//! - Every non-empty success is sent as 200; the upstream 2xx/3xx code is
//!   only kept inside the opaque wrapper

use axum::{
    body::{Body, Bytes},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::error::ProxyError;

/// Fully buffered upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Translated upstream reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxiedResponse {
    /// Upstream replied 204.
    Empty,
    /// Upstream replied with a JSON body, sent as 200.
    Structured(Value),
    /// Upstream success body that is not JSON, with the original status.
    Opaque { text: String, status: StatusCode },
}

impl ProxiedResponse {
    /// Classify an upstream reply. Statuses >= 400 become
    /// [`ProxyError::Upstream`] with the raw text as detail.
    pub fn translate(reply: UpstreamReply) -> Result<Self, ProxyError> {
        let UpstreamReply { status, body } = reply;

        if status == StatusCode::NO_CONTENT {
            return Ok(ProxiedResponse::Empty);
        }

        if status.as_u16() >= 400 {
            return Err(ProxyError::Upstream {
                status,
                detail: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Ok(ProxiedResponse::Structured(value)),
            Err(_) => Ok(ProxiedResponse::Opaque {
                text: String::from_utf8_lossy(&body).into_owned(),
                status,
            }),
        }
    }

    /// Status code sent to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxiedResponse::Empty => StatusCode::NO_CONTENT,
            ProxiedResponse::Structured(_) | ProxiedResponse::Opaque { .. } => StatusCode::OK,
        }
    }
}

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        match self {
            ProxiedResponse::Empty => {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::NO_CONTENT;
                response
            }
            ProxiedResponse::Structured(value) => (StatusCode::OK, Json(value)).into_response(),
            ProxiedResponse::Opaque { text, status } => (
                StatusCode::OK,
                Json(json!({ "message": text, "status": status.as_u16() })),
            )
                .into_response(),
        }
    }
}
