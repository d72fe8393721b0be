//! Geocoding clients
//!
//! Free-text address to coordinate lookup. [`YandexGeocodingClient`] talks to
//! the Yandex HTTP geocoder (API key required); [`NominatimGeocodingClient`]
//! uses OpenStreetMap's Nominatim and needs no key. Each call is a single
//! request: no retries, no caching.

use async_trait::async_trait;
use domain::Coordinate;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    config::{NominatimConfig, YandexGeocoderConfig},
    error::MapsError,
    http::{build_client, get_json},
    models::{NominatimResult, YandexGeocodeResponse},
};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to coordinates
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError>;

    /// Check that required credentials are present
    fn ensure_configured(&self) -> Result<(), MapsError> {
        Ok(())
    }

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}

/// Yandex HTTP geocoder client
#[derive(Debug)]
pub struct YandexGeocodingClient {
    client: Client,
    config: YandexGeocoderConfig,
}

impl YandexGeocodingClient {
    /// Create a new Yandex geocoder client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &YandexGeocoderConfig) -> Result<Self, MapsError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config: config.clone(),
        })
    }

    fn api_key(&self) -> Result<&str, MapsError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| MapsError::MissingApiKey("YANDEX_GEOCODER_API_KEY".to_string()))
    }
}

/// Parse the Yandex `"<lon> <lat>"` position string
fn parse_pos(pos: &str) -> Result<Coordinate, MapsError> {
    let mut parts = pos.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(lon)), Some(Ok(lat)), None) => Coordinate::from_lon_lat(lon, lat)
            .map_err(|e| MapsError::ParseError(format!("pos {pos:?}: {e}"))),
        _ => Err(MapsError::ParseError(format!("malformed pos {pos:?}"))),
    }
}

#[async_trait]
impl GeocodingClient for YandexGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(MapsError::InvalidInput(
                "Address must not be empty".to_string(),
            ));
        }
        let api_key = self.api_key()?;

        let params = [
            ("apikey", api_key),
            ("format", "json"),
            ("lang", self.config.lang.as_str()),
            ("geocode", address),
        ];

        debug!(%address, "Geocoding address");

        let response: YandexGeocodeResponse = get_json(
            self.client.get(&self.config.base_url).query(&params),
            self.config.timeout_secs,
        )
        .await?;

        let member = response
            .response
            .collection
            .feature_member
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::NotFound(address.to_string()))?;

        let coordinate = parse_pos(&member.geo_object.point.pos)?;
        debug!(%address, %coordinate, "Geocoded address");
        Ok(coordinate)
    }

    fn ensure_configured(&self) -> Result<(), MapsError> {
        self.api_key().map(|_| ())
    }

    fn provider_name(&self) -> &'static str {
        "yandex-geocoder"
    }
}

/// Nominatim (OpenStreetMap) geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, MapsError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(MapsError::InvalidInput(
                "Address must not be empty".to_string(),
            ));
        }

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", address),
            ("format", "jsonv2"),
            ("limit", "1"),
            ("accept-language", self.config.accept_language.as_str()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.as_str()));
        }

        debug!(%address, "Geocoding address");

        let results: Vec<NominatimResult> = get_json(
            self.client.get(&url).query(&params),
            self.config.timeout_secs,
        )
        .await?;

        let result = results
            .first()
            .ok_or_else(|| MapsError::NotFound(address.to_string()))?;

        let lat: f64 = result
            .lat
            .parse()
            .map_err(|_| MapsError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = result
            .lon
            .parse()
            .map_err(|_| MapsError::ParseError("Invalid longitude".to_string()))?;

        debug!(%address, %lat, %lon, "Geocoded address");
        Coordinate::new(lat, lon).map_err(|e| MapsError::ParseError(e.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pos_lon_first() {
        let coord = parse_pos("37.617698 55.755864").unwrap();
        assert!((coord.longitude() - 37.617_698).abs() < 1e-9);
        assert!((coord.latitude() - 55.755_864).abs() < 1e-9);
    }

    #[test]
    fn test_parse_pos_malformed() {
        assert!(matches!(parse_pos("37.6"), Err(MapsError::ParseError(_))));
        assert!(matches!(parse_pos("abc def"), Err(MapsError::ParseError(_))));
        assert!(matches!(parse_pos("1 2 3"), Err(MapsError::ParseError(_))));
        assert!(matches!(parse_pos("37.6 95.0"), Err(MapsError::ParseError(_))));
    }

    #[test]
    fn test_yandex_requires_key() {
        let config = YandexGeocoderConfig {
            api_key: None,
            ..YandexGeocoderConfig::for_testing("http://127.0.0.1:1")
        };
        let client = YandexGeocodingClient::new(&config).unwrap();
        assert!(matches!(
            client.ensure_configured(),
            Err(MapsError::MissingApiKey(_))
        ));
    }

    #[test]
    fn test_yandex_empty_key_is_missing() {
        let config = YandexGeocoderConfig {
            api_key: Some(String::new()),
            ..YandexGeocoderConfig::for_testing("http://127.0.0.1:1")
        };
        let client = YandexGeocodingClient::new(&config).unwrap();
        assert!(client.ensure_configured().is_err());
    }

    #[tokio::test]
    async fn test_empty_address_rejected_without_request() {
        let client =
            NominatimGeocodingClient::new(&NominatimConfig::for_testing("http://127.0.0.1:1"))
                .unwrap();
        let result = client.geocode("   ").await;
        assert!(matches!(result, Err(MapsError::InvalidInput(_))));
    }

    #[test]
    fn test_nominatim_needs_no_key() {
        let client =
            NominatimGeocodingClient::new(&NominatimConfig::for_testing("http://127.0.0.1:1"))
                .unwrap();
        assert!(client.ensure_configured().is_ok());
        assert_eq!(client.provider_name(), "nominatim");
    }
}
