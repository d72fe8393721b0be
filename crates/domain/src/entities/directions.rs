//! Directions request and route entities

use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{Coordinate, RoutePreference},
};

/// A validated request for driving directions between free-text addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    origin: String,
    destination: String,
    waypoint: Option<String>,
    preference: RoutePreference,
}

impl DirectionsRequest {
    /// Build a request, trimming all addresses
    ///
    /// A blank waypoint is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if origin or destination is
    /// empty after trimming.
    pub fn new(
        origin: &str,
        destination: &str,
        waypoint: Option<&str>,
        preference: RoutePreference,
    ) -> Result<Self, DomainError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(DomainError::validation(
                "origin and destination must both be provided",
            ));
        }

        let waypoint = waypoint
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(ToString::to_string);

        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            waypoint,
            preference,
        })
    }

    /// Origin address
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination address
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Optional intermediate stop
    #[must_use]
    pub fn waypoint(&self) -> Option<&str> {
        self.waypoint.as_deref()
    }

    /// Routing preference
    #[must_use]
    pub const fn preference(&self) -> RoutePreference {
        self.preference
    }
}

/// Resolved request points, in travel order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarkers {
    /// Start of the route
    pub origin: Coordinate,
    /// Optional intermediate stop
    pub waypoint: Option<Coordinate>,
    /// End of the route
    pub destination: Coordinate,
}

impl MapMarkers {
    /// Points in travel order: origin, optional waypoint, destination
    #[must_use]
    pub fn points(&self) -> Vec<Coordinate> {
        let mut points = Vec::with_capacity(3);
        points.push(self.origin);
        if let Some(waypoint) = self.waypoint {
            points.push(waypoint);
        }
        points.push(self.destination);
        points
    }
}

/// Route fragment as returned by a routing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RouteGeometry {
    /// Total distance in meters, if the provider reported it
    pub distance_meters: Option<f64>,
    /// Total duration in seconds, if the provider reported it
    pub duration_seconds: Option<f64>,
    /// Path from origin to destination
    pub geometry: Vec<Coordinate>,
    /// Provider's own encoded polyline, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_polyline: Option<String>,
    /// Start address as normalised by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,
    /// End address as normalised by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
}

impl RouteGeometry {
    /// Create a fragment, dropping negative or non-finite measurements
    #[must_use]
    pub fn new(
        distance_meters: Option<f64>,
        duration_seconds: Option<f64>,
        geometry: Vec<Coordinate>,
    ) -> Self {
        Self {
            distance_meters: distance_meters.filter(|d| d.is_finite() && *d >= 0.0),
            duration_seconds: duration_seconds.filter(|d| d.is_finite() && *d >= 0.0),
            geometry,
            encoded_polyline: None,
            start_address: None,
            end_address: None,
        }
    }

    /// Attach the provider's encoded polyline
    #[must_use]
    pub fn with_encoded_polyline(mut self, polyline: impl Into<String>) -> Self {
        self.encoded_polyline = Some(polyline.into());
        self
    }

    /// Attach provider-normalised start and end addresses
    #[must_use]
    pub fn with_addresses(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start_address = start;
        self.end_address = end;
        self
    }
}

/// Complete directions answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Total distance in meters
    pub distance_meters: Option<f64>,
    /// Human-readable distance
    pub distance_text: Option<String>,
    /// Total duration in seconds
    pub duration_seconds: Option<f64>,
    /// Human-readable duration
    pub duration_text: Option<String>,
    /// Route path from origin to destination
    pub geometry: Vec<Coordinate>,
    /// Provider's encoded polyline, when available
    pub polyline: Option<String>,
    /// Static map image request URL
    pub map_url: String,
    /// Start address
    pub start_address: String,
    /// End address
    pub end_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_addresses() {
        let req = DirectionsRequest::new(
            "  Москва, Тверская 1 ",
            " Химки ",
            Some("  "),
            RoutePreference::None,
        )
        .unwrap();
        assert_eq!(req.origin(), "Москва, Тверская 1");
        assert_eq!(req.destination(), "Химки");
        assert!(req.waypoint().is_none());
    }

    #[test]
    fn request_keeps_waypoint() {
        let req =
            DirectionsRequest::new("A", "C", Some(" B "), RoutePreference::Fast).unwrap();
        assert_eq!(req.waypoint(), Some("B"));
        assert_eq!(req.preference(), RoutePreference::Fast);
    }

    #[test]
    fn request_rejects_blank_origin() {
        let result = DirectionsRequest::new("   ", "B", None, RoutePreference::None);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn request_rejects_blank_destination() {
        let result = DirectionsRequest::new("A", "", None, RoutePreference::None);
        assert!(result.is_err());
    }

    #[test]
    fn markers_points_without_waypoint() {
        let origin = Coordinate::new(55.0, 37.0).unwrap();
        let destination = Coordinate::new(56.0, 38.0).unwrap();
        let markers = MapMarkers {
            origin,
            waypoint: None,
            destination,
        };
        assert_eq!(markers.points(), vec![origin, destination]);
    }

    #[test]
    fn markers_points_with_waypoint() {
        let origin = Coordinate::new(55.0, 37.0).unwrap();
        let waypoint = Coordinate::new(55.5, 37.5).unwrap();
        let destination = Coordinate::new(56.0, 38.0).unwrap();
        let markers = MapMarkers {
            origin,
            waypoint: Some(waypoint),
            destination,
        };
        assert_eq!(markers.points(), vec![origin, waypoint, destination]);
    }

    #[test]
    fn geometry_drops_negative_measurements() {
        let route = RouteGeometry::new(Some(-5.0), Some(f64::NAN), Vec::new());
        assert!(route.distance_meters.is_none());
        assert!(route.duration_seconds.is_none());

        let route = RouteGeometry::new(Some(1200.0), Some(300.0), Vec::new());
        assert_eq!(route.distance_meters, Some(1200.0));
        assert_eq!(route.duration_seconds, Some(300.0));
    }

    #[test]
    fn geometry_builders() {
        let route = RouteGeometry::new(None, None, Vec::new())
            .with_encoded_polyline("_p~iF~ps|U")
            .with_addresses(Some("Start".to_string()), None);
        assert_eq!(route.encoded_polyline.as_deref(), Some("_p~iF~ps|U"));
        assert_eq!(route.start_address.as_deref(), Some("Start"));
        assert!(route.end_address.is_none());
    }
}
