//! Request handling and transformation.
//!
//! # Responsibilities
//! - Decide whether the method carries a body
//! - Read and JSON-decode the inbound body for POST/PUT/PATCH
//! - Drop connection-specific headers (Host, Content-Length)
//! - Assemble the outbound request for the matched upstream
//!
//! # Design Decisions
//! - The inbound request is consumed; the forwarded copy is rebuilt
//! - Content-Length is regenerated by the transport from the new body
//! - An empty body on a body-carrying method is forwarded as no body

use std::error::Error as _;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, Uri},
};
use http_body_util::LengthLimitError;
use serde_json::Value;

use crate::http::error::ProxyError;
use crate::routing::Route;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Methods whose body is parsed and forwarded.
pub fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Copy every header except Host and Content-Length, keeping repeated values.
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}

/// Outbound request descriptor for one upstream call.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ForwardRequest {
    /// Build the outbound descriptor from an inbound request already matched
    /// to `route`.
    pub async fn from_inbound(
        route: &Route,
        request: Request<Body>,
        max_body_bytes: usize,
    ) -> Result<Self, ProxyError> {
        let (parts, body) = request.into_parts();

        let uri = route
            .upstream
            .target_uri(parts.uri.path(), parts.uri.query())?;

        let body = if carries_body(&parts.method) {
            decode_json_body(body, max_body_bytes).await?
        } else {
            None
        };

        Ok(Self {
            method: parts.method,
            uri,
            headers: forwarded_headers(&parts.headers),
            body,
        })
    }

    /// Convert into an HTTP request ready for the client.
    pub fn into_http(self) -> Result<Request<Body>, ProxyError> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);

        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }

        let body = match self.body {
            Some(value) => {
                if let Some(headers) = builder.headers_mut() {
                    headers
                        .entry(header::CONTENT_TYPE)
                        .or_insert(HeaderValue::from_static("application/json"));
                }
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };

        Ok(builder.body(body)?)
    }
}

async fn decode_json_body(body: Body, limit: usize) -> Result<Option<Value>, ProxyError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        if exceeds_limit(&e) {
            ProxyError::PayloadTooLarge { limit }
        } else {
            ProxyError::BodyRead(e.to_string())
        }
    })?;

    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&bytes)?))
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source = err.source();
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
