//! Static gateway endpoints outside the proxy core.

use axum::Json;
use serde::Serialize;

use crate::routing::Service;

#[derive(Debug, Serialize)]
pub struct GatewayInfo {
    pub message: &'static str,
    pub services: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// `GET /`
pub async fn get_info() -> Json<GatewayInfo> {
    Json(GatewayInfo {
        message: "API Gateway",
        services: Service::ALL.iter().map(|s| s.name()).collect(),
    })
}

/// `GET /health`
pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_info_lists_services() {
        let Json(info) = get_info().await;
        assert_eq!(
            serde_json::to_value(info).unwrap(),
            json!({ "message": "API Gateway", "services": ["users", "products", "orders"] })
        );
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let Json(health) = get_health().await;
        assert_eq!(health.status, "ok");
    }
}
