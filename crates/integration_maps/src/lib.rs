//! Map provider integration for FleetRoute
//!
//! Provides address geocoding via the [Yandex geocoder](https://yandex.com/dev/geocode/)
//! or [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org), driving
//! routes via [OSRM](https://project-osrm.org) or the Google Directions API,
//! and static map image URLs for Yandex and Google.
//!
//! # Architecture
//!
//! [`GeocodingClient`] and [`RoutingClient`] define the provider interfaces;
//! each concrete client performs exactly one HTTP request per call and
//! reports failures as [`MapsError`]. Static map builders are pure.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_maps::{OsrmConfig, OsrmRoutingClient, RoutingClient};
//!
//! let client = OsrmRoutingClient::new(&OsrmConfig::default())?;
//! let route = client.route(&[origin, destination], RoutePreference::None).await?;
//! ```

mod config;
mod error;
mod geocoding;
mod http;
mod models;
pub mod polyline;
mod routing;
mod static_map;

pub use config::{
    GoogleDirectionsConfig, NominatimConfig, OsrmConfig, StaticMapConfig, YandexGeocoderConfig,
};
pub use error::MapsError;
pub use geocoding::{GeocodingClient, NominatimGeocodingClient, YandexGeocodingClient};
pub use models::DrivingRoute;
pub use routing::{GoogleDirectionsClient, OsrmRoutingClient, RoutingClient};
pub use static_map::{GoogleStaticMap, YandexStaticMap};
