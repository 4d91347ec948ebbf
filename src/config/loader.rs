//! Configuration loading from disk and environment.
//!
//! Precedence, lowest first: defaults, TOML file, environment variables,
//! command-line flags. A `.env` file, when present, only feeds the
//! environment layer.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the users upstream.
pub const ENV_USER_SERVICE_URL: &str = "USER_SERVICE_URL";
/// Environment variable overriding the products upstream.
pub const ENV_PRODUCT_SERVICE_URL: &str = "PRODUCT_SERVICE_URL";
/// Environment variable overriding the orders upstream.
pub const ENV_ORDER_SERVICE_URL: &str = "ORDER_SERVICE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT: &str = "TIMEOUT";
/// Environment variable overriding the listener bind address.
pub const ENV_BIND_ADDRESS: &str = "GATEWAY_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load `.env` from the working directory or its parents into the process
/// environment. Returns `false` when there is no such file.
pub fn load_dotenv() -> Result<bool, ConfigError> {
    dotenv_result(dotenvy::dotenv().map(|_| ()))
}

/// Load a specific `.env`-style file into the process environment.
pub fn load_dotenv_from(path: &Path) -> Result<bool, ConfigError> {
    dotenv_result(dotenvy::from_path(path))
}

fn dotenv_result(result: Result<(), dotenvy::Error>) -> Result<bool, ConfigError> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Load configuration from an optional TOML file, the process environment
/// and the command line, then validate it.
pub fn load_config(
    path: Option<&Path>,
    cli: &CliOverrides,
) -> Result<GatewayConfig, ConfigError> {
    load_config_from(path, cli, |name| std::env::var(name).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_from<F>(
    path: Option<&Path>,
    cli: &CliOverrides,
    lookup: F,
) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    apply_cli_overrides(&mut config, cli);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply command-line overrides.
pub fn apply_cli_overrides(config: &mut GatewayConfig, cli: &CliOverrides) {
    if let Some(addr) = &cli.bind_address {
        config.listener.bind_address = addr.clone();
    }
}

/// Apply environment overrides using `lookup` to resolve variable names.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_USER_SERVICE_URL) {
        config.upstreams.users = url;
    }
    if let Some(url) = lookup(ENV_PRODUCT_SERVICE_URL) {
        config.upstreams.products = url;
    }
    if let Some(url) = lookup(ENV_ORDER_SERVICE_URL) {
        config.upstreams.orders = url;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT) {
        config.timeouts.request_secs = raw.trim().parse().map_err(|_| ConfigError::Env {
            name: ENV_TIMEOUT,
            value: raw.clone(),
        })?;
    }
    Ok(())
}
