//! Route model and raw provider response shapes

use domain::Coordinate;
use serde::{Deserialize, Serialize};

/// A driving route as reported by a routing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DrivingRoute {
    /// Total distance in meters
    pub distance_meters: Option<f64>,
    /// Total duration in seconds
    pub duration_seconds: Option<f64>,
    /// Decoded route path
    pub geometry: Vec<Coordinate>,
    /// Encoded overview polyline, when the provider supplies one
    pub encoded_polyline: Option<String>,
    /// Provider-normalised start address
    pub start_address: Option<String>,
    /// Provider-normalised end address
    pub end_address: Option<String>,
}

// ---------------------------------------------------------------------------
// Yandex geocoder
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct YandexGeocodeResponse {
    pub response: YandexGeocodeBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct YandexGeocodeBody {
    #[serde(rename = "GeoObjectCollection")]
    pub collection: YandexGeoObjectCollection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct YandexGeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    pub feature_member: Vec<YandexFeatureMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct YandexFeatureMember {
    #[serde(rename = "GeoObject")]
    pub geo_object: YandexGeoObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct YandexGeoObject {
    #[serde(rename = "Point")]
    pub point: YandexPoint,
}

#[derive(Debug, Deserialize)]
pub(crate) struct YandexPoint {
    /// `"<lon> <lat>"`
    pub pos: String,
}

// ---------------------------------------------------------------------------
// Nominatim
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct NominatimResult {
    pub lat: String,
    pub lon: String,
}

// ---------------------------------------------------------------------------
// OSRM
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRoute {
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmGeometry {
    /// GeoJSON `[lon, lat]` pairs
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

// ---------------------------------------------------------------------------
// Google Directions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleDirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<GoogleRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleRoute {
    pub overview_polyline: Option<GooglePolyline>,
    #[serde(default)]
    pub legs: Vec<GoogleLeg>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GooglePolyline {
    pub points: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleLeg {
    pub distance: Option<GoogleValue>,
    pub duration: Option<GoogleValue>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleValue {
    pub value: f64,
}
