//! Map provider configuration
//!
//! Plain settings for each concrete client. Credentials are held as
//! `Option<String>`; a missing key is reported by the client at request time.

use serde::{Deserialize, Serialize};

/// Yandex geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexGeocoderConfig {
    /// Base URL of the geocoder endpoint
    #[serde(default = "default_yandex_geocoder_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoder_timeout_secs")]
    pub timeout_secs: u64,

    /// API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Response language
    #[serde(default = "default_yandex_lang")]
    pub lang: String,
}

fn default_yandex_geocoder_url() -> String {
    "https://geocode-maps.yandex.ru/1.x/".to_string()
}

const fn default_geocoder_timeout_secs() -> u64 {
    10
}

fn default_yandex_lang() -> String {
    "ru_RU".to_string()
}

impl Default for YandexGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_yandex_geocoder_url(),
            timeout_secs: default_geocoder_timeout_secs(),
            api_key: None,
            lang: default_yandex_lang(),
        }
    }
}

impl YandexGeocoderConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }
}

/// Nominatim geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoder_timeout_secs")]
    pub timeout_secs: u64,

    /// Country code filter (e.g. "ru"), empty for none
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Preferred result language
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_country_filter() -> String {
    "ru".to_string()
}

fn default_accept_language() -> String {
    "ru,en".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_url(),
            timeout_secs: default_geocoder_timeout_secs(),
            country_filter: default_country_filter(),
            accept_language: default_accept_language(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            country_filter: String::new(),
            ..Default::default()
        }
    }
}

/// OSRM routing server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Server base URL, without the `/route/v1` suffix
    #[serde(default = "default_osrm_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout_secs")]
    pub timeout_secs: u64,

    /// Routing profile
    #[serde(default = "default_osrm_profile")]
    pub profile: String,
}

fn default_osrm_url() -> String {
    "https://router.project-osrm.org".to_string()
}

const fn default_routing_timeout_secs() -> u64 {
    12
}

fn default_osrm_profile() -> String {
    "driving".to_string()
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_osrm_url(),
            timeout_secs: default_routing_timeout_secs(),
            profile: default_osrm_profile(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }
}

/// Google Directions API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleDirectionsConfig {
    /// Endpoint URL
    #[serde(default = "default_google_directions_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout_secs")]
    pub timeout_secs: u64,

    /// API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Response language
    #[serde(default = "default_google_language")]
    pub language: String,

    /// Region bias
    #[serde(default = "default_google_region")]
    pub region: String,
}

fn default_google_directions_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}

fn default_google_language() -> String {
    "ru".to_string()
}

fn default_google_region() -> String {
    "ru".to_string()
}

impl Default for GoogleDirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_google_directions_url(),
            timeout_secs: default_routing_timeout_secs(),
            api_key: None,
            language: default_google_language(),
            region: default_google_region(),
        }
    }
}

impl GoogleDirectionsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }
}

/// Static map image settings shared by both providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticMapConfig {
    /// Endpoint URL; provider default when empty
    #[serde(default)]
    pub base_url: String,

    /// API key; Yandex accepts requests without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Maximum number of path points encoded into the URL
    #[serde(default = "default_max_path_points")]
    pub max_path_points: usize,
}

const fn default_width() -> u32 {
    960
}

const fn default_height() -> u32 {
    420
}

const fn default_max_path_points() -> usize {
    50
}

impl Default for StaticMapConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            width: default_width(),
            height: default_height(),
            max_path_points: default_max_path_points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yandex_geocoder_defaults() {
        let config = YandexGeocoderConfig::default();
        assert_eq!(config.base_url, "https://geocode-maps.yandex.ru/1.x/");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.lang, "ru_RU");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_osrm_defaults() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, "https://router.project-osrm.org");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.profile, "driving");
    }

    #[test]
    fn test_google_directions_defaults() {
        let config = GoogleDirectionsConfig::default();
        assert_eq!(config.language, "ru");
        assert_eq!(config.region, "ru");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_static_map_defaults() {
        let config = StaticMapConfig::default();
        assert_eq!((config.width, config.height), (960, 420));
        assert_eq!(config.max_path_points, 50);
        assert!(config.base_url.is_empty());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: OsrmConfig =
            serde_json::from_str(r#"{"base_url": "http://osrm.local:5000"}"#).unwrap();
        assert_eq!(config.base_url, "http://osrm.local:5000");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_for_testing_sets_key() {
        let config = GoogleDirectionsConfig::for_testing("http://127.0.0.1:1");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.timeout_secs, 5);
    }
}
