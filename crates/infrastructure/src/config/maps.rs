//! Map provider configuration: geocoder, routing chain and static maps.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known environment variables consulted when a key is not configured
pub const YANDEX_GEOCODER_KEY_VAR: &str = "YANDEX_GEOCODER_API_KEY";
/// Static map key for Yandex
pub const YANDEX_STATIC_KEY_VAR: &str = "YANDEX_STATIC_API_KEY";
/// Shared Yandex key, used when a service-specific one is absent
pub const YANDEX_MAPS_KEY_VAR: &str = "YANDEX_MAPS_API_KEY";
/// Google Maps Platform key
pub const GOOGLE_MAPS_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

// ==============================
// Geocoder
// ==============================

/// Geocoding provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    /// Yandex HTTP geocoder (API key required)
    #[default]
    Yandex,
    /// Nominatim / OpenStreetMap
    Nominatim,
}

/// Geocoder configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocoderAppConfig {
    /// Which geocoder to use
    #[serde(default)]
    pub provider: GeocoderProvider,

    /// Endpoint override; provider default when absent
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_geocoder_timeout")]
    pub timeout_secs: u64,

    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

const fn default_geocoder_timeout() -> u64 {
    10
}

impl Default for GeocoderAppConfig {
    fn default() -> Self {
        Self {
            provider: GeocoderProvider::default(),
            base_url: None,
            timeout_secs: default_geocoder_timeout(),
            api_key: None,
        }
    }
}

impl fmt::Debug for GeocoderAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderAppConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeocoderAppConfig {
    /// Convert to `integration_maps`'s `YandexGeocoderConfig`
    #[must_use]
    pub fn to_yandex_config(&self) -> integration_maps::YandexGeocoderConfig {
        let defaults = integration_maps::YandexGeocoderConfig::default();
        integration_maps::YandexGeocoderConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout_secs: self.timeout_secs,
            api_key: expose(self.api_key.as_ref()),
            ..defaults
        }
    }

    /// Convert to `integration_maps`'s `NominatimConfig`
    #[must_use]
    pub fn to_nominatim_config(&self) -> integration_maps::NominatimConfig {
        let defaults = integration_maps::NominatimConfig::default();
        integration_maps::NominatimConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout_secs: self.timeout_secs,
            ..defaults
        }
    }
}

// ==============================
// Routing
// ==============================

/// Routing provider kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProviderKind {
    /// OSRM server
    Osrm,
    /// Google Directions API
    Google,
}

/// One entry of the ordered routing chain
#[derive(Clone, Serialize, Deserialize)]
pub struct RoutingProviderConfig {
    /// Provider kind
    pub kind: RoutingProviderKind,

    /// Endpoint override; provider default when absent
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 12)
    #[serde(default = "default_routing_timeout")]
    pub timeout_secs: u64,

    /// API key (sensitive, Google only)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl fmt::Debug for RoutingProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingProviderConfig")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RoutingProviderConfig {
    /// OSRM entry pointing at `base_url`
    #[must_use]
    pub fn osrm(base_url: impl Into<String>) -> Self {
        Self {
            kind: RoutingProviderKind::Osrm,
            base_url: Some(base_url.into()),
            timeout_secs: default_routing_timeout(),
            api_key: None,
        }
    }

    /// Google Directions entry with the default endpoint
    #[must_use]
    pub fn google() -> Self {
        Self {
            kind: RoutingProviderKind::Google,
            base_url: None,
            timeout_secs: default_routing_timeout(),
            api_key: None,
        }
    }

    /// Convert to `integration_maps`'s `OsrmConfig`
    #[must_use]
    pub fn to_osrm_config(&self) -> integration_maps::OsrmConfig {
        let defaults = integration_maps::OsrmConfig::default();
        integration_maps::OsrmConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout_secs: self.timeout_secs,
            ..defaults
        }
    }

    /// Convert to `integration_maps`'s `GoogleDirectionsConfig`
    #[must_use]
    pub fn to_google_config(&self) -> integration_maps::GoogleDirectionsConfig {
        let defaults = integration_maps::GoogleDirectionsConfig::default();
        integration_maps::GoogleDirectionsConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout_secs: self.timeout_secs,
            api_key: expose(self.api_key.as_ref()),
            ..defaults
        }
    }
}

const fn default_routing_timeout() -> u64 {
    12
}

/// Routing chain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// Providers in priority order
    #[serde(default = "default_routing_providers")]
    pub providers: Vec<RoutingProviderConfig>,

    /// Upper bound for a single provider attempt in seconds (default: 12)
    #[serde(default = "default_routing_timeout")]
    pub attempt_timeout_secs: u64,

    /// Maximum number of stops accepted by the exact stop-ordering search
    #[serde(default = "default_max_stops")]
    pub max_stops: usize,
}

fn default_routing_providers() -> Vec<RoutingProviderConfig> {
    vec![RoutingProviderConfig::osrm("https://router.project-osrm.org")]
}

const fn default_max_stops() -> usize {
    application::MAX_EXACT_STOPS
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            providers: default_routing_providers(),
            attempt_timeout_secs: default_routing_timeout(),
            max_stops: default_max_stops(),
        }
    }
}

// ==============================
// Static map
// ==============================

/// Static map provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticMapProvider {
    /// Yandex static maps
    #[default]
    Yandex,
    /// Google static maps
    Google,
}

/// Static map configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct StaticMapAppConfig {
    /// Which static map service to build URLs for
    #[serde(default)]
    pub provider: StaticMapProvider,

    /// Endpoint override; provider default when absent
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Maximum number of path points per URL (default: 50)
    #[serde(default = "default_max_path_points")]
    pub max_path_points: usize,
}

const fn default_max_path_points() -> usize {
    application::DEFAULT_MAX_PATH_POINTS
}

impl Default for StaticMapAppConfig {
    fn default() -> Self {
        Self {
            provider: StaticMapProvider::default(),
            base_url: None,
            api_key: None,
            max_path_points: default_max_path_points(),
        }
    }
}

impl fmt::Debug for StaticMapAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMapAppConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_path_points", &self.max_path_points)
            .finish()
    }
}

impl StaticMapAppConfig {
    /// Convert to `integration_maps`'s `StaticMapConfig`
    #[must_use]
    pub fn to_static_map_config(&self) -> integration_maps::StaticMapConfig {
        integration_maps::StaticMapConfig {
            base_url: self.base_url.clone().unwrap_or_default(),
            api_key: expose(self.api_key.as_ref()),
            max_path_points: self.max_path_points,
            ..integration_maps::StaticMapConfig::default()
        }
    }
}

// ==============================
// Maps (aggregate)
// ==============================

/// All map provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsAppConfig {
    /// Geocoder settings
    #[serde(default)]
    pub geocoder: GeocoderAppConfig,

    /// Routing chain settings
    #[serde(default)]
    pub routing: RoutingAppConfig,

    /// Static map settings
    #[serde(default)]
    pub static_map: StaticMapAppConfig,
}

impl MapsAppConfig {
    /// Fill empty credentials from the well-known provider variables
    ///
    /// Explicitly configured keys are never overridden. `lookup` is usually
    /// `std::env::var(..).ok()`.
    pub fn apply_key_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |vars: &[&str]| -> Option<SecretString> {
            vars.iter()
                .filter_map(|var| lookup(var))
                .find(|value| !value.trim().is_empty())
                .map(SecretString::from)
        };

        if is_empty(self.geocoder.api_key.as_ref()) && self.geocoder.provider == GeocoderProvider::Yandex {
            self.geocoder.api_key = first(&[YANDEX_GEOCODER_KEY_VAR, YANDEX_MAPS_KEY_VAR]);
        }

        if is_empty(self.static_map.api_key.as_ref()) {
            self.static_map.api_key = match self.static_map.provider {
                StaticMapProvider::Yandex => first(&[YANDEX_STATIC_KEY_VAR, YANDEX_MAPS_KEY_VAR]),
                StaticMapProvider::Google => first(&[GOOGLE_MAPS_KEY_VAR]),
            };
        }

        for provider in &mut self.routing.providers {
            if provider.kind == RoutingProviderKind::Google && is_empty(provider.api_key.as_ref()) {
                provider.api_key = first(&[GOOGLE_MAPS_KEY_VAR]);
            }
        }
    }
}

fn is_empty(secret: Option<&SecretString>) -> bool {
    secret.is_none_or(|s| s.expose_secret().trim().is_empty())
}

fn expose(secret: Option<&SecretString>) -> Option<String> {
    secret
        .map(|s| s.expose_secret().trim().to_string())
        .filter(|s| !s.is_empty())
}
