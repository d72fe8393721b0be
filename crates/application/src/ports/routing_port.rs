//! Routing service port
//!
//! Computes driving geometry, distance and duration through an ordered list
//! of coordinates. Several implementations can be chained as fallbacks by
//! [`crate::services::RouteFetcher`].

use async_trait::async_trait;
use domain::{RouteGeometry, RoutePreference, value_objects::Coordinate};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a route through `points` (at least two, in travel order)
    ///
    /// Returns `NoRouteFound` when the provider answered without a usable
    /// route.
    async fn route(
        &self,
        points: &[Coordinate],
        preference: RoutePreference,
    ) -> Result<RouteGeometry, ApplicationError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
