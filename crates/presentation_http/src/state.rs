//! Application state shared across handlers

use std::sync::Arc;

use application::{DirectionsService, StopOrderingOptimizer};
use infrastructure::MapsServices;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directions use case
    pub directions: Arc<DirectionsService>,
    /// Stop-ordering solver
    pub stop_ordering: StopOrderingOptimizer,
}

impl From<MapsServices> for AppState {
    fn from(services: MapsServices) -> Self {
        Self {
            directions: Arc::new(services.directions),
            stop_ordering: services.stop_ordering,
        }
    }
}
