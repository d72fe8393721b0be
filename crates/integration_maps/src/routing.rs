//! Driving route clients
//!
//! [`OsrmRoutingClient`] queries an OSRM server (the public demo server or a
//! self-hosted mirror); [`GoogleDirectionsClient`] queries the Google
//! Directions API. Both return a [`DrivingRoute`] for the first route of the
//! answer.

use async_trait::async_trait;
use domain::{Coordinate, RoutePreference};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    config::{GoogleDirectionsConfig, OsrmConfig},
    error::MapsError,
    http::{build_client, get_json, parse_json, send},
    models::{DrivingRoute, GoogleDirectionsResponse, GoogleLeg, GoogleValue, OsrmResponse},
    polyline,
};

/// OSRM result codes meaning the server answered but found no route
const OSRM_NO_ROUTE_CODES: &[&str] = &["NoRoute", "NoSegment"];

/// Google statuses meaning the request was valid but no route exists
const GOOGLE_NO_ROUTE_STATUSES: &[&str] = &["ZERO_RESULTS"];

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Compute a driving route through `points` in travel order
    async fn route(
        &self,
        points: &[Coordinate],
        preference: RoutePreference,
    ) -> Result<DrivingRoute, MapsError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

fn join_points(
    points: &[Coordinate],
    render: fn(&Coordinate) -> String,
    separator: &str,
) -> String {
    points.iter().map(render).collect::<Vec<_>>().join(separator)
}

/// Sum a per-leg value; absent as soon as any leg lacks it
fn sum_legs(
    legs: &[GoogleLeg],
    field: fn(&GoogleLeg) -> Option<&GoogleValue>,
) -> Option<f64> {
    if legs.is_empty() {
        return None;
    }
    legs.iter().map(|leg| field(leg).map(|v| v.value)).sum()
}

/// OSRM HTTP API client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: OsrmConfig,
    name: String,
}

impl OsrmRoutingClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, MapsError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config: config.clone(),
            name: format!("osrm({})", config.base_url),
        })
    }

    /// OSRM `exclude` class for a preference
    ///
    /// OSRM has no notion of departure time, so `Fast` maps to nothing.
    fn exclude_class(preference: RoutePreference) -> Option<&'static str> {
        preference
            .query_params()
            .iter()
            .find_map(|(key, value)| match (*key, *value) {
                ("avoid", "tolls") => Some("toll"),
                ("avoid", "ferries") => Some("ferry"),
                _ => None,
            })
    }

    fn route_url(&self, points: &[Coordinate]) -> String {
        format!(
            "{}/route/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            join_points(points, Coordinate::to_lon_lat_string, ";")
        )
    }

    fn convert(raw: OsrmResponse) -> Result<DrivingRoute, MapsError> {
        let route = raw
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::NotFound("OSRM returned no routes".to_string()))?;

        let geometry = route
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default()
            .into_iter()
            .map(|[lon, lat]| {
                Coordinate::from_lon_lat(lon, lat)
                    .map_err(|e| MapsError::ParseError(format!("OSRM geometry: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DrivingRoute {
            distance_meters: route.distance,
            duration_seconds: route.duration,
            geometry,
            ..DrivingRoute::default()
        })
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self, points), fields(provider = %self.name, points = points.len()))]
    async fn route(
        &self,
        points: &[Coordinate],
        preference: RoutePreference,
    ) -> Result<DrivingRoute, MapsError> {
        if points.len() < 2 {
            return Err(MapsError::InvalidInput(
                "at least two points are required".to_string(),
            ));
        }

        let mut params = vec![("overview", "full"), ("geometries", "geojson")];
        if let Some(class) = Self::exclude_class(preference) {
            params.push(("exclude", class));
        }

        debug!("Requesting OSRM route");

        let raw = send(
            self.client.get(self.route_url(points)).query(&params),
            self.config.timeout_secs,
        )
        .await?;

        if !raw.status.is_success() {
            // OSRM reports "no route" as HTTP 400 with a JSON code
            return match parse_json::<OsrmResponse>(&raw.body) {
                Ok(body) if OSRM_NO_ROUTE_CODES.contains(&body.code.as_str()) => {
                    Err(MapsError::NotFound(
                        body.message.unwrap_or_else(|| body.code.clone()),
                    ))
                },
                _ => Err(MapsError::RequestFailed(format!("HTTP {}", raw.status))),
            };
        }

        let body: OsrmResponse = parse_json(&raw.body)?;
        if !body.code.is_empty() && body.code != "Ok" {
            return Err(MapsError::NotFound(format!("OSRM code {}", body.code)));
        }

        Self::convert(body)
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

/// Google Directions API client
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: GoogleDirectionsConfig,
}

impl GoogleDirectionsClient {
    /// Create a new Google Directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GoogleDirectionsConfig) -> Result<Self, MapsError> {
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
            .ok_or_else(|| MapsError::MissingApiKey("GOOGLE_MAPS_API_KEY".to_string()))
    }

    fn convert(raw: GoogleDirectionsResponse) -> Result<DrivingRoute, MapsError> {
        let route = raw
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::NotFound("Google returned no routes".to_string()))?;

        let encoded = route.overview_polyline.map(|p| p.points);
        let geometry = match encoded.as_deref() {
            Some(points) => polyline::decode(points)?,
            None => Vec::new(),
        };

        let distance_meters = sum_legs(&route.legs, |leg| leg.distance.as_ref());
        let duration_seconds = sum_legs(&route.legs, |leg| leg.duration.as_ref());
        let start_address = route.legs.first().and_then(|leg| leg.start_address.clone());
        let end_address = route.legs.last().and_then(|leg| leg.end_address.clone());

        Ok(DrivingRoute {
            distance_meters,
            duration_seconds,
            geometry,
            encoded_polyline: encoded,
            start_address,
            end_address,
        })
    }
}

#[async_trait]
impl RoutingClient for GoogleDirectionsClient {
    #[instrument(skip(self, points), fields(points = points.len()))]
    async fn route(
        &self,
        points: &[Coordinate],
        preference: RoutePreference,
    ) -> Result<DrivingRoute, MapsError> {
        let [origin, intermediate @ .., destination] = points else {
            return Err(MapsError::InvalidInput(
                "at least two points are required".to_string(),
            ));
        };
        let api_key = self.api_key()?;

        let origin = origin.to_lat_lon_string();
        let destination = destination.to_lat_lon_string();
        let waypoints = join_points(intermediate, Coordinate::to_lat_lon_string, "|");

        let mut params: Vec<(&str, &str)> = vec![
            ("origin", origin.as_str()),
            ("destination", destination.as_str()),
            ("mode", "driving"),
            ("language", self.config.language.as_str()),
            ("region", self.config.region.as_str()),
            ("units", "metric"),
            ("key", api_key),
        ];
        if !waypoints.is_empty() {
            params.push(("waypoints", waypoints.as_str()));
        }
        params.extend_from_slice(preference.query_params());

        debug!("Requesting Google directions");

        let body: GoogleDirectionsResponse = get_json(
            self.client.get(&self.config.base_url).query(&params),
            self.config.timeout_secs,
        )
        .await?;

        if body.status != "OK" {
            if GOOGLE_NO_ROUTE_STATUSES.contains(&body.status.as_str()) {
                return Err(MapsError::NotFound(body.status));
            }
            let message = body
                .error_message
                .unwrap_or_else(|| format!("Directions API returned {}", body.status));
            return Err(MapsError::Rejected {
                status: body.status,
                message,
            });
        }

        Self::convert(body)
    }

    fn provider_name(&self) -> &str {
        "google-directions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_class_mapping() {
        assert_eq!(
            OsrmRoutingClient::exclude_class(RoutePreference::AvoidTolls),
            Some("toll")
        );
        assert_eq!(
            OsrmRoutingClient::exclude_class(RoutePreference::Short),
            Some("ferry")
        );
        assert_eq!(OsrmRoutingClient::exclude_class(RoutePreference::Fast), None);
        assert_eq!(OsrmRoutingClient::exclude_class(RoutePreference::None), None);
    }

    #[test]
    fn test_osrm_route_url_uses_lon_lat() {
        let client = OsrmRoutingClient::new(&OsrmConfig::for_testing("http://osrm.local/")).unwrap();
        let points = [
            Coordinate::new(55.75, 37.61).unwrap(),
            Coordinate::new(55.88, 37.44).unwrap(),
        ];
        assert_eq!(
            client.route_url(&points),
            "http://osrm.local/route/v1/driving/37.61,55.75;37.44,55.88"
        );
    }

    #[test]
    fn test_osrm_provider_name_includes_url() {
        let client =
            OsrmRoutingClient::new(&OsrmConfig::for_testing("http://mirror.local")).unwrap();
        assert_eq!(client.provider_name(), "osrm(http://mirror.local)");
    }

    #[test]
    fn test_osrm_convert_empty_routes() {
        let raw = OsrmResponse {
            code: "Ok".to_string(),
            message: None,
            routes: Vec::new(),
        };
        assert!(matches!(
            OsrmRoutingClient::convert(raw),
            Err(MapsError::NotFound(_))
        ));
    }

    #[test]
    fn test_google_convert_sums_legs() {
        let json = r#"{
            "status": "OK",
            "routes": [{
                "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC"},
                "legs": [
                    {"distance": {"value": 1000}, "duration": {"value": 60}, "start_address": "A", "end_address": "B"},
                    {"distance": {"value": 2500}, "duration": {"value": 120}, "start_address": "B", "end_address": "C"}
                ]
            }]
        }"#;
        let raw: GoogleDirectionsResponse = serde_json::from_str(json).unwrap();
        let route = GoogleDirectionsClient::convert(raw).unwrap();

        assert_eq!(route.distance_meters, Some(3500.0));
        assert_eq!(route.duration_seconds, Some(180.0));
        assert_eq!(route.geometry.len(), 2);
        assert_eq!(route.encoded_polyline.as_deref(), Some("_p~iF~ps|U_ulLnnqC"));
        assert_eq!(route.start_address.as_deref(), Some("A"));
        assert_eq!(route.end_address.as_deref(), Some("C"));
    }

    #[test]
    fn test_google_convert_missing_leg_value() {
        let json = r#"{
            "status": "OK",
            "routes": [{"legs": [{"distance": {"value": 1000}}, {}]}]
        }"#;
        let raw: GoogleDirectionsResponse = serde_json::from_str(json).unwrap();
        let route = GoogleDirectionsClient::convert(raw).unwrap();

        assert!(route.distance_meters.is_none());
        assert!(route.duration_seconds.is_none());
        assert!(route.geometry.is_empty());
    }

    #[tokio::test]
    async fn test_google_requires_key() {
        let config = GoogleDirectionsConfig {
            api_key: None,
            ..GoogleDirectionsConfig::for_testing("http://127.0.0.1:1")
        };
        let client = GoogleDirectionsClient::new(&config).unwrap();
        let points = [
            Coordinate::new(55.75, 37.61).unwrap(),
            Coordinate::new(55.88, 37.44).unwrap(),
        ];

        let result = client.route(&points, RoutePreference::None).await;
        assert!(matches!(result, Err(MapsError::MissingApiKey(_))));
    }
}
