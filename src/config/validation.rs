//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate upstream URLs are plain-HTTP with a host
//! - Validate value ranges (timeouts > 0, limits > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid upstream URL {value:?} ({reason})")]
    InvalidUpstream {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a loaded configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    check_upstream("upstreams.users", &config.upstreams.users, &mut errors);
    check_upstream("upstreams.products", &config.upstreams.products, &mut errors);
    check_upstream("upstreams.orders", &config.upstreams.orders, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.request_secs",
        });
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero {
            field: "limits.max_body_bytes",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_upstream(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason: String| ValidationError::InvalidUpstream {
        field,
        value: value.to_string(),
        reason,
    };

    match Url::parse(value) {
        Ok(url) if url.scheme() != "http" => {
            errors.push(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        Ok(url) if url.host_str().is_none() => errors.push(invalid("missing host".into())),
        Ok(url) if url.query().is_some() || url.fragment().is_some() => {
            errors.push(invalid("query or fragment not allowed".into()));
        }
        Ok(_) => {}
        Err(e) => errors.push(invalid(e.to_string())),
    }
}
