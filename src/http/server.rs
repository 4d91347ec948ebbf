//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the info endpoints and one proxy route per prefix
//! - Restrict proxied methods to GET/POST/PUT/DELETE/PATCH
//! - Wire up middleware (tracing, request ID, CORS)
//! - Serve on a listener until the shutdown signal fires
//! - Record per-request metrics

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{get, on, MethodFilter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::error::ProxyError;
use crate::http::info::{get_health, get_info};
use crate::http::proxy::GatewayProxy;
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;

/// Methods the gateway forwards.
const PROXIED_METHODS: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE)
    .or(MethodFilter::PATCH);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: GatewayProxy,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let proxy = GatewayProxy::from_config(&config);
        let router = Self::build_router(&config, AppState { proxy });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(get_info))
            .route("/health", get(get_health));

        for route in state.proxy.routes().routes() {
            let prefix = route.prefix();
            router = router
                .route(prefix, on(PROXIED_METHODS, proxy_handler))
                .route(&format!("{prefix}/"), on(PROXIED_METHODS, proxy_handler))
                .route(&format!("{prefix}/{{*rest}}"), on(PROXIED_METHODS, proxy_handler));
        }

        let mut router = router
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    request_id = %request_id,
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        if config.cors.enabled {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router
    }

    /// The fully layered router, for driving the gateway without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            users = %self.config.upstreams.users,
            products = %self.config.upstreams.products,
            orders = %self.config.upstreams.orders,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Proxy handler for every prefixed route.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = state.proxy.routes().match_path(&path);
    let service = route.map(|route| route.service.name()).unwrap_or("none");

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        service = service,
        "Proxying request"
    );

    let result = match route {
        Some(route) => state.proxy.forward(route, request).await,
        None => Err(ProxyError::NoRoute(path.clone())),
    };

    let response = match result {
        Ok(proxied) => proxied.into_response(),
        Err(e) => {
            let status = e.status();
            if status.is_server_error() && !matches!(e, ProxyError::Upstream { .. }) {
                tracing::error!(
                    request_id = %request_id,
                    service = service,
                    error = %e,
                    "Upstream unavailable"
                );
            } else {
                tracing::warn!(
                    request_id = %request_id,
                    service = service,
                    status = %status,
                    error = %e,
                    "Request failed"
                );
            }
            e.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), service, start_time);
    response
}
