//! Routing adapter - Implements RoutingPort using integration_maps

use std::{fmt, sync::Arc};

use application::{ApplicationError, ports::RoutingPort};
use async_trait::async_trait;
use domain::{Coordinate, RouteGeometry, RoutePreference};
use integration_maps::{DrivingRoute, RoutingClient};
use tracing::{debug, instrument};

use super::{Lookup, map_maps_error};

/// Adapter exposing one routing provider through `RoutingPort`
pub struct RoutingAdapter {
    client: Arc<dyn RoutingClient>,
}

impl fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

impl RoutingAdapter {
    /// Wrap a routing client
    #[must_use]
    pub fn new(client: Arc<dyn RoutingClient>) -> Self {
        Self { client }
    }

    fn convert(route: DrivingRoute) -> RouteGeometry {
        let mut geometry =
            RouteGeometry::new(route.distance_meters, route.duration_seconds, route.geometry)
                .with_addresses(route.start_address, route.end_address);
        if let Some(polyline) = route.encoded_polyline {
            geometry = geometry.with_encoded_polyline(polyline);
        }
        geometry
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, points), fields(provider = self.client.provider_name(), points = points.len()))]
    async fn route(
        &self,
        points: &[Coordinate],
        preference: RoutePreference,
    ) -> Result<RouteGeometry, ApplicationError> {
        let route = self
            .client
            .route(points, preference)
            .await
            .map_err(|e| map_maps_error(e, Lookup::Route))?;
        debug!(
            distance_meters = ?route.distance_meters,
            path_points = route.geometry.len(),
            "Route received"
        );
        Ok(Self::convert(route))
    }

    fn provider_name(&self) -> &str {
        self.client.provider_name()
    }
}
