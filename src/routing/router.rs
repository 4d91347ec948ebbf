//! Route lookup.
//!
//! # Responsibilities
//! - Hold the three entity-service routes
//! - Look up the route for a request path
//! - Build the upstream target URI for a matched route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan over three disjoint prefixes
//! - Explicit None rather than a silent default

use std::fmt;

use axum::http::uri::{InvalidUri, Uri};
use serde::Serialize;

use crate::config::UpstreamsConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// The entity services behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Users,
    Products,
    Orders,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Users, Service::Products, Service::Orders];

    pub fn name(self) -> &'static str {
        match self {
            Service::Users => "users",
            Service::Products => "products",
            Service::Orders => "orders",
        }
    }

    /// Path prefix owned by this service.
    pub fn prefix(self) -> &'static str {
        match self {
            Service::Users => "/users",
            Service::Products => "/products",
            Service::Orders => "/orders",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Base URL of an upstream service, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the full request path and raw query onto the base URL.
    ///
    /// The path is forwarded whole (prefix included) with exactly one `/`
    /// at the boundary. The query string is copied byte for byte so order
    /// and repeated keys survive.
    pub fn target_uri(&self, path: &str, query: Option<&str>) -> Result<Uri, InvalidUri> {
        let path = path.trim_start_matches('/');
        let target = match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", self.base_url, path, q),
            _ => format!("{}/{}", self.base_url, path),
        };
        target.parse()
    }
}

/// A single prefix → upstream mapping.
#[derive(Debug, Clone)]
pub struct Route {
    pub service: Service,
    pub upstream: Upstream,
    matcher: PathPrefixMatcher,
}

impl Route {
    pub fn new(service: Service, upstream: Upstream) -> Self {
        Self {
            service,
            upstream,
            matcher: PathPrefixMatcher::new(service.prefix()),
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}

/// Immutable route table built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build the table from the configured upstream base URLs.
    pub fn from_config(upstreams: &UpstreamsConfig) -> Self {
        let routes = Service::ALL
            .into_iter()
            .map(|service| {
                let base = match service {
                    Service::Users => &upstreams.users,
                    Service::Products => &upstreams.products,
                    Service::Orders => &upstreams.orders,
                };
                Route::new(service, Upstream::new(base))
            })
            .collect();

        Self { routes }
    }

    /// Find the route owning `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    pub fn route(&self, service: Service) -> Option<&Route> {
        self.routes.iter().find(|route| route.service == service)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::from_config(&UpstreamsConfig {
            users: "http://users-host:8001".into(),
            products: "http://products-host/".into(),
            orders: "http://orders-host:8002/api".into(),
        })
    }

    #[test]
    fn test_each_prefix_routes_to_its_upstream() {
        let table = table();

        let route = table.match_path("/users/42").unwrap();
        assert_eq!(route.service, Service::Users);
        assert_eq!(route.upstream.base_url(), "http://users-host:8001");

        let route = table.match_path("/products").unwrap();
        assert_eq!(route.service, Service::Products);
        assert_eq!(route.upstream.base_url(), "http://products-host");

        let route = table.match_path("/orders/7/items").unwrap();
        assert_eq!(route.service, Service::Orders);
    }

    #[test]
    fn test_unknown_path_has_no_route() {
        let table = table();
        assert!(table.match_path("/").is_none());
        assert!(table.match_path("/health").is_none());
        assert!(table.match_path("/Users/1").is_none());
    }

    #[test]
    fn test_target_uri_keeps_full_path() {
        let table = table();
        let route = table.route(Service::Products).unwrap();

        let uri = route.upstream.target_uri("/products/7", None).unwrap();
        assert_eq!(uri.to_string(), "http://products-host/products/7");
    }

    #[test]
    fn test_target_uri_preserves_query_order_and_duplicates() {
        let upstream = Upstream::new("http://users-host:8001/");
        let uri = upstream
            .target_uri("/users", Some("tag=b&tag=a&limit=10"))
            .unwrap();

        assert_eq!(uri.path(), "/users");
        assert_eq!(uri.query(), Some("tag=b&tag=a&limit=10"));
        assert_eq!(uri.to_string(), "http://users-host:8001/users?tag=b&tag=a&limit=10");
    }

    #[test]
    fn test_target_uri_with_base_path() {
        let table = table();
        let route = table.route(Service::Orders).unwrap();
        let uri = route.upstream.target_uri("/orders/1", Some("")).unwrap();
        assert_eq!(uri.to_string(), "http://orders-host:8002/api/orders/1");
    }
}
