//! Domain entities - Per-request objects of the directions engine

mod directions;
mod stop_ordering;

pub use directions::{DirectionsRequest, MapMarkers, RouteGeometry, RouteResult};
pub use stop_ordering::{StopOrderingRequest, StopOrderingResult, closed_tour_km};
