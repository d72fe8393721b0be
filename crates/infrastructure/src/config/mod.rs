//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `maps`: geocoder, routing chain and static map providers

mod maps;
mod server;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub use maps::{
    GOOGLE_MAPS_KEY_VAR, GeocoderAppConfig, GeocoderProvider, MapsAppConfig, RoutingAppConfig,
    RoutingProviderConfig, RoutingProviderKind, StaticMapAppConfig, StaticMapProvider,
    YANDEX_GEOCODER_KEY_VAR, YANDEX_MAPS_KEY_VAR, YANDEX_STATIC_KEY_VAR,
};
pub use server::ServerConfig;

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Configuration rejected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A configured endpoint is blank
    #[error("{0}: base_url must not be empty")]
    EmptyBaseUrl(String),

    /// A timeout of zero seconds would fail every request
    #[error("{0}: timeout must be greater than zero")]
    ZeroTimeout(String),

    /// Routing chain has no providers
    #[error("routing.providers must contain at least one provider")]
    NoRoutingProviders,

    /// Static map path limit must allow at least one point
    #[error("static_map.max_path_points must be greater than zero")]
    ZeroPathPoints,

    /// Stop-ordering limit must allow at least one stop
    #[error("routing.max_stops must be greater than zero")]
    ZeroMaxStops,
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Map provider configuration
    #[serde(default)]
    pub maps: MapsAppConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file and the
    /// environment
    ///
    /// Environment variables use the `FLEETROUTE_` prefix with `__` between
    /// nested keys (e.g. `FLEETROUTE_SERVER__PORT=9000`). Empty provider keys
    /// are then filled from the well-known provider variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., FLEETROUTE_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("FLEETROUTE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config
            .maps
            .apply_key_fallbacks(|name| std::env::var(name).ok());
        debug!(environment = %config.environment, "Configuration loaded");
        Ok(config)
    }

    /// Check the settings that would make every request fail
    ///
    /// Missing API keys are not checked here; they surface as
    /// configuration errors on the requests that need them.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let maps = &self.maps;

        check_endpoint("geocoder", maps.geocoder.base_url.as_deref(), maps.geocoder.timeout_secs)?;

        if maps.routing.providers.is_empty() {
            return Err(ConfigValidationError::NoRoutingProviders);
        }
        for (index, provider) in maps.routing.providers.iter().enumerate() {
            check_endpoint(
                &format!("routing.providers[{index}]"),
                provider.base_url.as_deref(),
                provider.timeout_secs,
            )?;
        }
        if maps.routing.attempt_timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout(
                "routing.attempt_timeout_secs".to_string(),
            ));
        }
        if maps.routing.max_stops == 0 {
            return Err(ConfigValidationError::ZeroMaxStops);
        }

        if maps
            .static_map
            .base_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyBaseUrl("static_map".to_string()));
        }
        if maps.static_map.max_path_points == 0 {
            return Err(ConfigValidationError::ZeroPathPoints);
        }

        Ok(())
    }
}

fn check_endpoint(
    name: &str,
    base_url: Option<&str>,
    timeout_secs: u64,
) -> Result<(), ConfigValidationError> {
    if base_url.is_some_and(|url| url.trim().is_empty()) {
        return Err(ConfigValidationError::EmptyBaseUrl(name.to_string()));
    }
    if timeout_secs == 0 {
        return Err(ConfigValidationError::ZeroTimeout(name.to_string()));
    }
    Ok(())
}
