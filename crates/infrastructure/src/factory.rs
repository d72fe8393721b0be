//! Service wiring
//!
//! Turns [`MapsAppConfig`] into ready-to-use application services with the
//! configured provider clients behind their ports.

use std::{sync::Arc, time::Duration};

use application::{
    DirectionsService, RouteFetcher, StopOrderingOptimizer,
    ports::{GeocodingPort, RoutingPort, StaticMapPort},
};
use integration_maps::{
    GeocodingClient, GoogleDirectionsClient, MapsError, NominatimGeocodingClient,
    OsrmRoutingClient, RoutingClient, YandexGeocodingClient,
};
use tracing::info;

use crate::{
    adapters::{GeocodingAdapter, RoutingAdapter, StaticMapAdapter},
    config::{
        GeocoderAppConfig, GeocoderProvider, MapsAppConfig, RoutingAppConfig,
        RoutingProviderKind, StaticMapAppConfig, StaticMapProvider,
    },
};

/// Application services built from configuration
#[derive(Debug)]
pub struct MapsServices {
    /// `POST /directions` use case
    pub directions: DirectionsService,
    /// `POST /routes/optimal` use case
    pub stop_ordering: StopOrderingOptimizer,
}

/// Build every map service from configuration
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be initialized.
pub fn build_maps_services(config: &MapsAppConfig) -> Result<MapsServices, MapsError> {
    let geocoder = build_geocoder(&config.geocoder)?;
    let route_fetcher = build_route_fetcher(&config.routing)?;
    let static_map = build_static_map(&config.static_map);

    info!(
        geocoder = geocoder.provider_name(),
        routing_providers = route_fetcher.provider_count(),
        "Map services initialized"
    );

    Ok(MapsServices {
        directions: DirectionsService::new(geocoder, route_fetcher, static_map),
        stop_ordering: StopOrderingOptimizer::new(config.routing.max_stops),
    })
}

/// Geocoder port for the configured provider
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialized.
pub fn build_geocoder(config: &GeocoderAppConfig) -> Result<Arc<dyn GeocodingPort>, MapsError> {
    let client: Arc<dyn GeocodingClient> = match config.provider {
        GeocoderProvider::Yandex => Arc::new(YandexGeocodingClient::new(&config.to_yandex_config())?),
        GeocoderProvider::Nominatim => {
            Arc::new(NominatimGeocodingClient::new(&config.to_nominatim_config())?)
        },
    };
    Ok(Arc::new(GeocodingAdapter::new(client)))
}

/// Routing fallback chain in configured order
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be initialized.
pub fn build_route_fetcher(config: &RoutingAppConfig) -> Result<RouteFetcher, MapsError> {
    let providers = config
        .providers
        .iter()
        .map(|provider| {
            let client: Arc<dyn RoutingClient> = match provider.kind {
                RoutingProviderKind::Osrm => {
                    Arc::new(OsrmRoutingClient::new(&provider.to_osrm_config())?)
                },
                RoutingProviderKind::Google => {
                    Arc::new(GoogleDirectionsClient::new(&provider.to_google_config())?)
                },
            };
            Ok(Arc::new(RoutingAdapter::new(client)) as Arc<dyn RoutingPort>)
        })
        .collect::<Result<Vec<_>, MapsError>>()?;

    Ok(RouteFetcher::new(
        providers,
        Duration::from_secs(config.attempt_timeout_secs),
    ))
}

/// Static map port for the configured provider
#[must_use]
pub fn build_static_map(config: &StaticMapAppConfig) -> Arc<dyn StaticMapPort> {
    let settings = config.to_static_map_config();
    match config.provider {
        StaticMapProvider::Yandex => Arc::new(StaticMapAdapter::yandex(&settings)),
        StaticMapProvider::Google => Arc::new(StaticMapAdapter::google(&settings)),
    }
}
