//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the map provider clients,
//! and owns configuration loading, logging setup and service wiring.

pub mod adapters;
pub mod config;
pub mod factory;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigValidationError, Environment, MapsAppConfig, ServerConfig};
pub use factory::{MapsServices, build_maps_services};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
