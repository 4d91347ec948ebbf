//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, feeds the environment)
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides, CLI overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → route table + upstream client built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_dotenv, CliOverrides, ConfigError};
pub use schema::{
    CorsConfig, GatewayConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    TimeoutConfig, UpstreamsConfig,
};
pub use validation::{validate_config, ValidationError};
