//! Geocoding adapter - Implements GeocodingPort using integration_maps

use std::{fmt, sync::Arc};

use application::{ApplicationError, ports::GeocodingPort};
use async_trait::async_trait;
use domain::Coordinate;
use integration_maps::GeocodingClient;
use tracing::{debug, instrument};

use super::{Lookup, map_maps_error};

/// Adapter exposing a geocoding client through `GeocodingPort`
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

impl GeocodingAdapter {
    /// Wrap a geocoding client
    #[must_use]
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError> {
        let coordinate = self
            .client
            .geocode(address)
            .await
            .map_err(|e| map_maps_error(e, Lookup::Address(address)))?;
        debug!(%coordinate, "Address resolved");
        Ok(coordinate)
    }

    fn ensure_configured(&self) -> Result<(), ApplicationError> {
        self.client
            .ensure_configured()
            .map_err(|e| map_maps_error(e, Lookup::Address("")))
    }

    fn provider_name(&self) -> &str {
        self.client.provider_name()
    }
}
