//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, method filter)
//!     → proxy.rs (route lookup via routing::RouteTable)
//!     → request.rs (target URI, header filter, JSON body)
//!     → client.rs (pooled upstream call under a deadline)
//!     → response.rs (Empty / Structured / Opaque / upstream error)
//!     → Send to client
//! ```

pub mod client;
pub mod error;
pub mod info;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use client::UpstreamClient;
pub use error::ProxyError;
pub use proxy::GatewayProxy;
pub use request::{ForwardRequest, X_REQUEST_ID};
pub use response::{ProxiedResponse, UpstreamReply};
pub use server::HttpServer;
