//! The gateway proxy core: match, forward, translate.

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request};

use crate::config::GatewayConfig;
use crate::http::client::UpstreamClient;
use crate::http::error::ProxyError;
use crate::http::request::ForwardRequest;
use crate::http::response::ProxiedResponse;
use crate::routing::{Route, RouteTable};

/// Stateless proxy over an immutable route table.
#[derive(Clone)]
pub struct GatewayProxy {
    routes: Arc<RouteTable>,
    client: UpstreamClient,
    max_body_bytes: usize,
}

impl GatewayProxy {
    pub fn new(routes: Arc<RouteTable>, client: UpstreamClient, max_body_bytes: usize) -> Self {
        Self {
            routes,
            client,
            max_body_bytes,
        }
    }

    /// Build the route table and upstream client from configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let routes = Arc::new(RouteTable::from_config(&config.upstreams));
        let client = UpstreamClient::new(
            Duration::from_secs(config.timeouts.request_secs),
            config.limits.max_body_bytes,
        );
        Self::new(routes, client, config.limits.max_body_bytes)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Match the request path, then forward. Paths outside every prefix
    /// yield [`ProxyError::NoRoute`].
    pub async fn route(&self, request: Request<Body>) -> Result<ProxiedResponse, ProxyError> {
        let path = request.uri().path();
        let route = self
            .routes
            .match_path(path)
            .ok_or_else(|| ProxyError::NoRoute(path.to_string()))?;

        self.forward(route, request).await
    }

    /// Forward one inbound request to an already matched route and translate
    /// the reply.
    pub async fn forward(
        &self,
        route: &Route,
        request: Request<Body>,
    ) -> Result<ProxiedResponse, ProxyError> {
        let outbound = ForwardRequest::from_inbound(route, request, self.max_body_bytes).await?;

        tracing::debug!(
            service = %route.service,
            method = %outbound.method,
            target = %outbound.uri,
            "Dispatching to upstream"
        );

        let reply = self.client.dispatch(outbound).await?;
        ProxiedResponse::translate(reply)
    }
}
