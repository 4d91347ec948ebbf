//! Booking Gateway Library
//!
//! Reverse-proxy gateway for the auto-service booking services. Requests
//! under `/users`, `/products` and `/orders` are forwarded to the matching
//! entity service and the replies are normalized for the client.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use config::GatewayConfig;
pub use http::{GatewayProxy, HttpServer, ProxiedResponse, ProxyError};
pub use lifecycle::Shutdown;
pub use routing::{RouteTable, Service};
