//! Upstream HTTP client.
//!
//! Wraps the pooled hyper-util client. One call per inbound request, bounded
//! by the configured request timeout. Compressed replies (gzip, deflate,
//! br, zstd) are decoded before the body is classified.

use std::time::Duration;

use axum::body::Body;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::decompression::{Decompression, DecompressionLayer};

use crate::http::error::ProxyError;
use crate::http::request::ForwardRequest;
use crate::http::response::UpstreamReply;
use crate::resilience::with_deadline;

type PooledClient = Client<HttpConnector, Body>;

/// Pooled client for the entity services.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Decompression<PooledClient>,
    timeout: Duration,
    max_body_bytes: usize,
}

impl UpstreamClient {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Self {
        let pooled: PooledClient =
            Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let client = ServiceBuilder::new()
            .layer(DecompressionLayer::new())
            .service(pooled);

        Self {
            client,
            timeout,
            max_body_bytes,
        }
    }

    /// Send the request and buffer the full, decoded reply.
    pub async fn dispatch(&self, request: ForwardRequest) -> Result<UpstreamReply, ProxyError> {
        let request = request.into_http()?;

        with_deadline(self.timeout, async {
            let response = self
                .client
                .clone()
                .oneshot(request)
                .await
                .map_err(|e| ProxyError::Transport(e.to_string()))?;

            let (parts, body) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(body), self.max_body_bytes)
                .await
                .map_err(|e| ProxyError::Transport(e.to_string()))?;

            Ok(UpstreamReply {
                status: parts.status,
                body,
            })
        })
        .await
    }
}
