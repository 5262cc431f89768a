//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PLANNING_POKER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use planning_poker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod features;
mod poker;
mod server;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use poker::PokerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

use crate::domain::poker::SessionPolicy;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Session limits and delivery tuning
    #[serde(default)]
    pub poker: PokerConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PLANNING_POKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PLANNING_POKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PLANNING_POKER__FEATURES__HOST_ONLY_ROUND_CONTROL=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLANNING_POKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.poker.validate()?;
        Ok(())
    }

    /// Rules handed to the session registry.
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            enforce_scoring_roles: self.features.enforce_scoring_roles,
            host_only_round_control: self.features.host_only_round_control,
            max_round_duration_secs: self.poker.max_round_duration_secs,
            max_name_length: self.poker.max_name_length,
        }
    }
}
