//! Application services - Use case implementations

mod directions_service;
mod route_fetcher;
mod stop_ordering;

pub use directions_service::DirectionsService;
pub use route_fetcher::{DEFAULT_ATTEMPT_TIMEOUT_SECS, RouteFetcher};
pub use stop_ordering::{MAX_EXACT_STOPS, StopOrderingOptimizer};
